//! Content that always plays its enter transition once it is mounted.

use composables_animation::{fade_in, fade_out, tween, EnterTransition, ExitTransition};
use composables_macros::composable;
use composables_runtime::{rememberSaveable, useState, with_key, LaunchedEffect, MutableState, NodeId};
use composables_ui::{AnimatedVisibility, AnimatedVisibilityScope, Modifier};

const ENTER_DURATION_MILLIS: u64 = 400;
const EXIT_DURATION_MILLIS: u64 = 250;

/// Where the visibility flag of [`AnimateAlwaysEnter`] lives.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum VisibilityPersistence {
    /// Reset to hidden on every fresh mount.
    #[default]
    Transient,
    /// Written to saved state, so a restored composition shows the content
    /// without replaying the entrance.
    Saveable,
}

#[derive(Clone, Debug)]
pub struct AlwaysEnterSpec {
    pub enter: EnterTransition,
    pub exit: ExitTransition,
    /// The flag starts at `!condition`; `false` shows the content right away.
    pub condition: bool,
    pub persistence: VisibilityPersistence,
}

impl AlwaysEnterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(mut self, enter: EnterTransition) -> Self {
        self.enter = enter;
        self
    }

    pub fn exit(mut self, exit: ExitTransition) -> Self {
        self.exit = exit;
        self
    }

    pub fn condition(mut self, condition: bool) -> Self {
        self.condition = condition;
        self
    }

    pub fn persistence(mut self, persistence: VisibilityPersistence) -> Self {
        self.persistence = persistence;
        self
    }

    pub fn saveable(self) -> Self {
        self.persistence(VisibilityPersistence::Saveable)
    }
}

impl Default for AlwaysEnterSpec {
    fn default() -> Self {
        Self {
            enter: fade_in(tween(ENTER_DURATION_MILLIS, 0)),
            exit: fade_out(tween(EXIT_DURATION_MILLIS, 0)),
            condition: true,
            persistence: VisibilityPersistence::Transient,
        }
    }
}

fn remember_visibility_flag(condition: bool, persistence: VisibilityPersistence) -> MutableState<bool> {
    with_key(&persistence, || match persistence {
        VisibilityPersistence::Transient => useState(|| !condition),
        VisibilityPersistence::Saveable => rememberSaveable(|| !condition),
    })
}

/// Starts hidden and flips to visible once, right after the first pass, so
/// `content` enters with `spec.enter` every time it is mounted.
///
/// `visible` replaces the internal flag with a caller-owned one; the flip is
/// still performed exactly once per mount.
#[composable]
pub fn AnimateAlwaysEnter(
    modifier: Modifier,
    spec: AlwaysEnterSpec,
    visible: Option<MutableState<bool>>,
    content: impl FnOnce(&AnimatedVisibilityScope),
) -> NodeId {
    let AlwaysEnterSpec {
        enter,
        exit,
        condition,
        persistence,
    } = spec;
    let own = remember_visibility_flag(condition, persistence);
    let flag = visible.unwrap_or(own);

    {
        let flag = flag.clone();
        LaunchedEffect!((), move |scope| {
            if scope.is_active() && flag.set_if_changed(true) {
                log::debug!("always-enter content became visible");
            }
        });
    }

    AnimatedVisibility(flag.value(), modifier, enter, exit, content)
}
