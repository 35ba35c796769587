#![allow(non_snake_case)]

use std::cell::Cell;
use std::hash::Hash;
use std::rc::Rc;

use crate::composer::with_current_composer;
use crate::runtime::RuntimeHandle;
use crate::{hash, remember, with_group, Key};

#[derive(Default)]
struct LaunchedEffectState {
    key: Option<Key>,
    active: Option<Rc<Cell<bool>>>,
}

impl LaunchedEffectState {
    fn should_run(&self, key: Key) -> bool {
        self.key != Some(key)
    }

    fn set_key(&mut self, key: Key) {
        self.key = Some(key);
    }

    fn launch(&mut self, runtime: &RuntimeHandle, effect: impl FnOnce(LaunchedEffectScope) + 'static) {
        self.cancel_current();
        let active = Rc::new(Cell::new(true));
        let scope = LaunchedEffectScope {
            active: Rc::clone(&active),
        };
        self.active = Some(active);
        runtime.spawn_task(Box::new(move || {
            if scope.is_active() {
                effect(scope);
            } else {
                log::trace!("skipping effect cancelled before it started");
            }
        }));
    }

    fn cancel_current(&mut self) {
        if let Some(flag) = self.active.take() {
            flag.set(false);
        }
    }
}

impl Drop for LaunchedEffectState {
    fn drop(&mut self) {
        self.cancel_current();
    }
}

/// Handed to a launched effect; turns inactive once the effect's owner
/// leaves the composition or its key changes.
#[derive(Clone)]
pub struct LaunchedEffectScope {
    active: Rc<Cell<bool>>,
}

impl LaunchedEffectScope {
    pub fn is_active(&self) -> bool {
        self.active.get()
    }
}

/// Runs `effect` after every committed pass that reaches this call site.
pub fn SideEffect(effect: impl FnOnce() + 'static) {
    with_current_composer(|composer| composer.register_side_effect(effect));
}

#[doc(hidden)]
pub fn __launched_effect_impl<K, F>(group_key: Key, keys: K, effect: F)
where
    K: Hash,
    F: FnOnce(LaunchedEffectScope) + 'static,
{
    // The call site gets its own group so effects in sibling branches never
    // share state.
    with_group(group_key, move || {
        let key_hash = hash::hash_one(&keys);
        let state = remember(LaunchedEffectState::default);
        if state.with(|state| state.should_run(key_hash)) {
            state.update(|state| state.set_key(key_hash));
            let runtime = with_current_composer(|composer| composer.runtime_handle());
            let state_for_effect = state.clone();
            SideEffect(move || {
                state_for_effect.update(|state| state.launch(&runtime, effect));
            });
        }
    });
}

/// Launches `$effect` on the runtime task queue once per distinct `$keys`
/// value for as long as the call site stays in the composition.
#[macro_export]
macro_rules! LaunchedEffect {
    ($keys:expr, $effect:expr) => {
        $crate::__launched_effect_impl(
            $crate::location_key(file!(), line!(), column!()),
            $keys,
            $effect,
        )
    };
}
