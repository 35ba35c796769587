//! Animated wrappers for composables: content that always enters once
//! mounted, a container that cross-fades between the states of a loaded
//! view, animated layouts and list items, and a paged pull-to-refresh list.

#![allow(non_snake_case)]

mod always_enter;
mod defaults;
mod direction;
mod fab;
mod item;
mod layout;
pub mod paging;
mod presets;
mod pull_to_refresh;
mod scaffold;
mod stateful_container;
mod ui_state;

pub use always_enter::{AnimateAlwaysEnter, AlwaysEnterSpec, VisibilityPersistence};
pub use defaults::{AnimationDefaults, LocalAnimationDefaults, ProvideAnimationDefaults};
pub use direction::*;
pub use fab::AnimatedFab;
pub use item::AnimatedLazyListScope;
pub use layout::{AnimatedBox, AnimatedColumn, AnimatedLayoutSpec, AnimatedRow, TransitionTiming};
pub use paging::{
    paging_load_state_item, rememberLazyPagingItems, CombinedLoadStates, LazyPagingItems, LoadState, LoadType,
    PagedListPhase,
};
pub use presets::*;
pub use pull_to_refresh::{AnimatedLazyPullToRefresh, PagedListNode, PagedListSlots, PagedListSpec};
pub use scaffold::{AnimatedScaffold, AnimatedScaffoldSpec, ScaffoldBars};
pub use stateful_container::{StateBranches, StatefulContainer, StatefulContainerSpec};
pub use ui_state::{ErrorState, ScrollPosition, Success, UiState, UiStateKind};

pub mod prelude {
    pub use crate::always_enter::{AnimateAlwaysEnter, AlwaysEnterSpec, VisibilityPersistence};
    pub use crate::direction::AnimationDirection;
    pub use crate::item::AnimatedLazyListScope;
    pub use crate::layout::{AnimatedBox, AnimatedColumn, AnimatedLayoutSpec, AnimatedRow};
    pub use crate::paging::{LazyPagingItems, LoadState, LoadType};
    pub use crate::presets::{default_animation, fade_animation, slide_animation};
    pub use crate::pull_to_refresh::{AnimatedLazyPullToRefresh, PagedListSlots, PagedListSpec};
    pub use crate::scaffold::{AnimatedScaffold, AnimatedScaffoldSpec, ScaffoldBars};
    pub use crate::stateful_container::{StateBranches, StatefulContainer, StatefulContainerSpec};
    pub use crate::ui_state::{ErrorState, Success, UiState};
}

#[cfg(test)]
#[path = "tests/ui_state_tests.rs"]
mod ui_state_tests;

#[cfg(test)]
#[path = "tests/direction_tests.rs"]
mod direction_tests;
