//! State that outlives a composition.
//!
//! `rememberSaveable` registers a provider under the composite key of its
//! call site. Saving collects every live provider into a [`SavedState`];
//! a composition restored from that bundle hands each value back to the
//! call site with the same key on its first pass.
//!
//! Call sites repeated in a loop share one composite key. Their values are
//! kept as a list under that key, in registration order, and handed back
//! in the same order.

#![allow(non_snake_case)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::collections::map::HashMap;
use crate::composer::with_current_composer;
use crate::state::MutableState;
use crate::{remember, RuntimeError};

type SaveProvider = Box<dyn Fn() -> Option<Result<Value, serde_json::Error>>>;

/// Serializable bundle of saved values, keyed by call-site identity.
///
/// Keys are derived from hashed group keys. A bundle restores reliably
/// into the same build that wrote it; other builds may hash differently
/// and start from their initial values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SavedState {
    entries: BTreeMap<String, Vec<Value>>,
}

impl SavedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of saved values across all keys.
    pub fn len(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&[Value]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.values().flatten()
    }

    /// Encodes the bundle. See the type docs on restoring into other builds.
    pub fn to_json(&self) -> Result<String, RuntimeError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, RuntimeError> {
        Ok(serde_json::from_str(json)?)
    }
}

#[derive(Default)]
pub struct SaveableStateRegistry {
    restored: HashMap<String, Vec<Value>>,
    providers: HashMap<String, Vec<(u64, SaveProvider)>>,
    next_token: Cell<u64>,
}

impl SaveableStateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restore(&mut self, saved: SavedState) {
        self.restored.extend(saved.entries);
    }

    /// Takes the oldest restored value left for `key`. Each value is handed
    /// out once.
    pub fn consume_restored(&mut self, key: &str) -> Option<Value> {
        let values = self.restored.get_mut(key)?;
        let value = (!values.is_empty()).then(|| values.remove(0));
        if values.is_empty() {
            self.restored.remove(key);
        }
        value
    }

    fn register(&mut self, key: String, provider: SaveProvider) -> u64 {
        let token = self.next_token.get();
        self.next_token.set(token + 1);
        self.providers.entry(key).or_default().push((token, provider));
        token
    }

    fn unregister(&mut self, key: &str, token: u64) {
        if let Some(providers) = self.providers.get_mut(key) {
            providers.retain(|(current, _)| *current != token);
            if providers.is_empty() {
                self.providers.remove(key);
            }
        }
    }

    pub fn is_registered(&self, key: &str) -> bool {
        self.providers.contains_key(key)
    }

    pub fn perform_save(&self) -> Result<SavedState, RuntimeError> {
        let mut entries = BTreeMap::new();
        for (key, providers) in &self.providers {
            let mut values = Vec::with_capacity(providers.len());
            for (_, provider) in providers {
                if let Some(value) = provider() {
                    values.push(value?);
                }
            }
            if !values.is_empty() {
                entries.insert(key.clone(), values);
            }
        }
        Ok(SavedState { entries })
    }
}

struct SaveableEntry<T> {
    key: String,
    token: u64,
    state: MutableState<T>,
    registry: Weak<RefCell<SaveableStateRegistry>>,
}

impl<T> Drop for SaveableEntry<T> {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().unregister(&self.key, self.token);
        }
    }
}

/// Like `useState`, but the value is written into [`SavedState`] on save and
/// read back from it when the composition is restored.
pub fn rememberSaveable<T>(init: impl FnOnce() -> T) -> MutableState<T>
where
    T: Serialize + DeserializeOwned + 'static,
{
    let (key, runtime, registry) = with_current_composer(|composer| {
        (
            format!("{:016x}", composer.composite_key()),
            composer.runtime_handle(),
            composer.saveable_registry(),
        )
    });
    let entry = remember(move || {
        let restored = registry
            .borrow_mut()
            .consume_restored(&key)
            .and_then(|value| match serde_json::from_value::<T>(value) {
                Ok(value) => Some(value),
                Err(err) => {
                    log::warn!("discarding saved value for {key}: {err}");
                    None
                }
            });
        let state = MutableState::with_runtime(restored.unwrap_or_else(init), runtime);
        let weak = state.downgrade();
        let token = registry.borrow_mut().register(
            key.clone(),
            Box::new(move || {
                weak.upgrade()
                    .map(|state| state.with(|value| serde_json::to_value(value)))
            }),
        );
        SaveableEntry {
            key,
            token,
            state,
            registry: Rc::downgrade(&registry),
        }
    });
    entry.with(|entry| entry.state.clone())
}
