//! Box, row and column that enter with a direction preset once mounted.

use std::fmt;
use std::rc::Rc;

use composables_animation::{EnterTransition, ExitTransition};
use composables_macros::composable;
use composables_runtime::NodeId;
use composables_ui::{Box, BoxScope, BoxSpec, Column, ColumnScope, ColumnSpec, Modifier, Row, RowScope, RowSpec};

use crate::always_enter::{AnimateAlwaysEnter, AlwaysEnterSpec, VisibilityPersistence};
use crate::defaults::LocalAnimationDefaults;
use crate::direction::AnimationDirection;

/// Resolved timing handed to transition factories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TransitionTiming {
    /// Position in a staggered sequence, starting at 1.
    pub order: u32,
    pub duration_millis: u64,
    pub delay_millis: u64,
}

type EnterFactory = Rc<dyn Fn(TransitionTiming) -> EnterTransition>;
type ExitFactory = Rc<dyn Fn(TransitionTiming) -> ExitTransition>;

/// How an animated layout enters and exits.
///
/// Duration and delay left unset come from [`LocalAnimationDefaults`]. The
/// transitions come from `direction` unless a factory overrides them.
#[derive(Clone)]
pub struct AnimatedLayoutSpec {
    pub direction: AnimationDirection,
    pub duration_millis: Option<u64>,
    pub delay_millis: Option<u64>,
    pub order: u32,
    pub persistence: VisibilityPersistence,
    enter: Option<EnterFactory>,
    exit: Option<ExitFactory>,
}

impl AnimatedLayoutSpec {
    /// Box, column and item defaults: slide up, remembered across restores.
    pub fn new() -> Self {
        Self {
            direction: AnimationDirection::VerticalUp,
            duration_millis: None,
            delay_millis: None,
            order: 1,
            persistence: VisibilityPersistence::Saveable,
            enter: None,
            exit: None,
        }
    }

    /// Row defaults: slide down, replayed on every mount.
    pub fn row() -> Self {
        Self::new()
            .direction(AnimationDirection::VerticalDown)
            .persistence(VisibilityPersistence::Transient)
    }

    pub fn direction(mut self, direction: AnimationDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn duration_millis(mut self, duration_millis: u64) -> Self {
        self.duration_millis = Some(duration_millis);
        self
    }

    pub fn delay_millis(mut self, delay_millis: u64) -> Self {
        self.delay_millis = Some(delay_millis);
        self
    }

    pub fn order(mut self, order: u32) -> Self {
        self.order = order;
        self
    }

    pub fn persistence(mut self, persistence: VisibilityPersistence) -> Self {
        self.persistence = persistence;
        self
    }

    pub fn enter_transition(mut self, factory: impl Fn(TransitionTiming) -> EnterTransition + 'static) -> Self {
        self.enter = Some(Rc::new(factory));
        self
    }

    pub fn exit_transition(mut self, factory: impl Fn(TransitionTiming) -> ExitTransition + 'static) -> Self {
        self.exit = Some(Rc::new(factory));
        self
    }

    pub fn timing(&self) -> TransitionTiming {
        let defaults = LocalAnimationDefaults.current();
        TransitionTiming {
            order: self.order,
            duration_millis: self.duration_millis.unwrap_or(defaults.duration_millis),
            delay_millis: self.delay_millis.unwrap_or(defaults.delay_millis),
        }
    }

    pub fn transitions(&self) -> (EnterTransition, ExitTransition) {
        let timing = self.timing();
        let enter = match &self.enter {
            Some(factory) => factory(timing),
            None => self
                .direction
                .enter_transition(timing.duration_millis, timing.delay_millis),
        };
        let exit = match &self.exit {
            Some(factory) => factory(timing),
            None => self
                .direction
                .exit_transition(timing.duration_millis, timing.delay_millis),
        };
        (enter, exit)
    }

    pub(crate) fn always_enter_spec(&self) -> AlwaysEnterSpec {
        let (enter, exit) = self.transitions();
        AlwaysEnterSpec::new()
            .enter(enter)
            .exit(exit)
            .persistence(self.persistence)
    }
}

impl Default for AnimatedLayoutSpec {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for AnimatedLayoutSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnimatedLayoutSpec")
            .field("direction", &self.direction)
            .field("duration_millis", &self.duration_millis)
            .field("delay_millis", &self.delay_millis)
            .field("order", &self.order)
            .field("persistence", &self.persistence)
            .field("custom_enter", &self.enter.is_some())
            .field("custom_exit", &self.exit.is_some())
            .finish()
    }
}

#[composable]
pub fn AnimatedBox(
    modifier: Modifier,
    spec: AnimatedLayoutSpec,
    box_spec: BoxSpec,
    content: impl FnOnce(&BoxScope),
) -> NodeId {
    AnimateAlwaysEnter(Modifier::empty(), spec.always_enter_spec(), None, move |_| {
        Box(modifier, box_spec, content);
    })
}

#[composable]
pub fn AnimatedRow(
    modifier: Modifier,
    spec: AnimatedLayoutSpec,
    row_spec: RowSpec,
    content: impl FnOnce(&RowScope),
) -> NodeId {
    AnimateAlwaysEnter(Modifier::empty(), spec.always_enter_spec(), None, move |_| {
        Row(modifier, row_spec, content);
    })
}

#[composable]
pub fn AnimatedColumn(
    modifier: Modifier,
    spec: AnimatedLayoutSpec,
    column_spec: ColumnSpec,
    content: impl FnOnce(&ColumnScope),
) -> NodeId {
    AnimateAlwaysEnter(Modifier::empty(), spec.always_enter_spec(), None, move |_| {
        Column(modifier, column_spec, content);
    })
}

#[cfg(test)]
mod tests {
    use composables_ui_graphics::{IntOffset, IntSize};

    use super::*;

    #[test]
    fn unset_timing_falls_back_to_defaults() {
        let timing = AnimatedLayoutSpec::new().delay_millis(40).timing();
        assert_eq!(
            timing,
            TransitionTiming {
                order: 1,
                duration_millis: 500,
                delay_millis: 40,
            }
        );
    }

    #[test]
    fn row_slides_down_and_is_transient() {
        let spec = AnimatedLayoutSpec::row();
        assert_eq!(spec.direction, AnimationDirection::VerticalDown);
        assert_eq!(spec.persistence, VisibilityPersistence::Transient);
        let (enter, _) = spec.transitions();
        assert_eq!(enter.offset_at(0, IntSize::new(100, 80)), IntOffset::new(0, -40));
    }

    #[test]
    fn factories_receive_order_and_delay() {
        let spec = AnimatedLayoutSpec::new()
            .order(3)
            .delay_millis(100)
            .enter_transition(|timing| {
                AnimationDirection::Fade.enter_transition(timing.duration_millis, timing.delay_millis * timing.order as u64)
            });
        let (enter, exit) = spec.transitions();
        assert_eq!(enter.duration_millis(), 800);
        assert_eq!(exit.duration_millis(), 600);
    }
}
