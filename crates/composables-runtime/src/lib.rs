//! Composition runtime: positional memoization, observable state, effects,
//! saveable state and the node tree the UI crates emit into.

#![allow(non_snake_case)]

extern crate self as composables_runtime;

pub mod applier;
pub mod collections;
pub mod composer;
pub mod composition;
pub mod effects;
pub mod error;
pub mod frame_clock;
pub mod hash;
pub mod local;
pub mod owned;
pub mod platform;
pub mod runtime;
pub mod saveable;
mod slot_table;
pub mod state;

use std::hash::Hash;

pub use applier::{Applier, AsAny, MemoryApplier, Node};
pub use composer::{try_with_current_composer, with_current_composer, Composer};
pub use composition::Composition;
pub use effects::{LaunchedEffectScope, SideEffect, __launched_effect_impl};
pub use error::{NodeError, RuntimeError};
pub use frame_clock::{FrameCallbackRegistration, FrameClock};
pub use local::{CompositionLocal, CompositionLocalProvider, ProvidedValue};
pub use owned::Owned;
pub use platform::{DefaultScheduler, RuntimeScheduler};
pub use runtime::{FrameCallbackId, Runtime, RuntimeHandle};
pub use saveable::{rememberSaveable, SaveableStateRegistry, SavedState};
pub use state::{MutableState, State, WeakState};

pub type Key = u64;
pub type NodeId = usize;

/// Group key for a source location. `#[composable]` and the effect macros
/// key their groups with it.
pub fn location_key(file: &str, line: u32, column: u32) -> Key {
    hash::hash_one(&(file, line, column))
}

/// Runs `content` inside a group identified by `key`.
pub fn with_group<R>(key: Key, content: impl FnOnce() -> R) -> R {
    with_current_composer(|composer| composer.start_group(key));
    let result = content();
    with_current_composer(|composer| composer.end_group());
    result
}

/// Runs `content` inside a group identified by a caller key, so its
/// remembered state follows the key when siblings are reordered.
pub fn with_key<K: Hash + ?Sized, R>(key: &K, content: impl FnOnce() -> R) -> R {
    with_group(hash::hash_one(key), content)
}

/// Returns the value stored at this position, creating it with `init` on the
/// first pass.
pub fn remember<T: 'static>(init: impl FnOnce() -> T) -> Owned<T> {
    if let Some(existing) = with_current_composer(|composer| composer.reuse_value::<T>()) {
        return existing;
    }
    // `init` runs outside the composer borrow so it may create state.
    let owned = Owned::new(init());
    with_current_composer(|composer| composer.store_value(owned.clone()));
    owned
}

pub fn mutableStateOf<T: 'static>(initial: T) -> MutableState<T> {
    let runtime = with_current_composer(|composer| composer.runtime_handle());
    MutableState::with_runtime(initial, runtime)
}

/// Remembered [`MutableState`] created from `init` on the first pass.
pub fn useState<T: 'static>(init: impl FnOnce() -> T) -> MutableState<T> {
    remember(|| mutableStateOf(init())).with(|state| state.clone())
}

pub fn current_runtime_handle() -> RuntimeHandle {
    with_current_composer(|composer| composer.runtime_handle())
}

pub fn emit_node<N: Node>(init: impl FnOnce() -> N) -> NodeId {
    with_current_composer(|composer| composer.emit_node(init))
}

pub fn with_node_mut<N: Node, R>(id: NodeId, f: impl FnOnce(&mut N) -> R) -> Result<R, NodeError> {
    with_current_composer(|composer| composer.with_node_mut(id, f))
}

pub fn push_parent(id: NodeId) {
    with_current_composer(|composer| composer.push_parent(id));
}

pub fn pop_parent() {
    with_current_composer(|composer| composer.pop_parent());
}

#[cfg(test)]
#[path = "tests/composition_tests.rs"]
mod composition_tests;
