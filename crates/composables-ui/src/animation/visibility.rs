#![allow(non_snake_case)]

use composables_animation::{
    expand_in, fade_in, fade_out, shrink_out, EnterTransition, ExitTransition, FiniteAnimationSpec,
};
use composables_macros::composable;
use composables_runtime::{current_runtime_handle, remember, Node, NodeId, RuntimeHandle};
use composables_ui_graphics::{Alignment, IntOffset, IntSize};
use indexmap::IndexSet;

use super::clock::FrameTimer;
use crate::modifier::Modifier;
use crate::widgets::nodes::{compose_container, replace_children};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VisibilityPhase {
    Hidden,
    Entering,
    Visible,
    Exiting,
}

impl VisibilityPhase {
    /// Whether content is composed in this phase.
    pub fn is_composed(self) -> bool {
        self != VisibilityPhase::Hidden
    }
}

struct VisibilityTransition {
    phase: VisibilityPhase,
    timer: Option<FrameTimer>,
}

impl VisibilityTransition {
    fn new(visible: bool) -> Self {
        let phase = if visible {
            VisibilityPhase::Visible
        } else {
            VisibilityPhase::Hidden
        };
        Self { phase, timer: None }
    }

    fn settle(&mut self) {
        if !self.timer.as_ref().is_some_and(FrameTimer::is_finished) {
            return;
        }
        self.timer = None;
        self.phase = match self.phase {
            VisibilityPhase::Entering => VisibilityPhase::Visible,
            VisibilityPhase::Exiting => VisibilityPhase::Hidden,
            settled => settled,
        };
        log::debug!("visibility settled at {:?}", self.phase);
    }

    fn retarget(
        &mut self,
        visible: bool,
        enter: &EnterTransition,
        exit: &ExitTransition,
        runtime: &RuntimeHandle,
    ) {
        let (duration, running, settled) = match (self.phase, visible) {
            (VisibilityPhase::Hidden | VisibilityPhase::Exiting, true) => (
                enter.duration_millis(),
                VisibilityPhase::Entering,
                VisibilityPhase::Visible,
            ),
            (VisibilityPhase::Visible | VisibilityPhase::Entering, false) => (
                exit.duration_millis(),
                VisibilityPhase::Exiting,
                VisibilityPhase::Hidden,
            ),
            _ => return,
        };
        if duration == 0 {
            self.phase = settled;
            self.timer = None;
        } else {
            self.phase = running;
            self.timer = Some(FrameTimer::start(runtime.clone(), duration));
        }
        log::debug!("visibility {:?} over {duration}ms", self.phase);
    }
}

/// Node emitted by [`AnimatedVisibility`]. It stays in the tree while the
/// content is hidden, with no children.
#[derive(Debug)]
pub struct AnimatedVisibilityNode {
    pub modifier: Modifier,
    pub visible: bool,
    pub phase: VisibilityPhase,
    pub enter: EnterTransition,
    pub exit: ExitTransition,
    timer: Option<FrameTimer>,
    pub children: IndexSet<NodeId>,
}

impl AnimatedVisibilityNode {
    pub fn play_time_millis(&self) -> u64 {
        self.timer.as_ref().map_or(0, FrameTimer::play_time_millis)
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, VisibilityPhase::Entering | VisibilityPhase::Exiting)
    }

    pub fn alpha(&self) -> f32 {
        match self.phase {
            VisibilityPhase::Hidden => 0.0,
            VisibilityPhase::Visible => 1.0,
            VisibilityPhase::Entering => self.enter.alpha_at(self.play_time_millis()),
            VisibilityPhase::Exiting => self.exit.alpha_at(self.play_time_millis()),
        }
    }

    pub fn offset(&self, full_size: IntSize) -> IntOffset {
        match self.phase {
            VisibilityPhase::Entering => self.enter.offset_at(self.play_time_millis(), full_size),
            VisibilityPhase::Exiting => self.exit.offset_at(self.play_time_millis(), full_size),
            _ => IntOffset::ZERO,
        }
    }

    pub fn scale(&self) -> f32 {
        match self.phase {
            VisibilityPhase::Entering => self.enter.scale_at(self.play_time_millis()),
            VisibilityPhase::Exiting => self.exit.scale_at(self.play_time_millis()),
            _ => 1.0,
        }
    }
}

impl Node for AnimatedVisibilityNode {
    fn update_children(&mut self, children: &[NodeId]) {
        replace_children(&mut self.children, children);
    }

    fn children(&self) -> Vec<NodeId> {
        self.children.iter().copied().collect()
    }

    fn describe(&self) -> String {
        format!("AnimatedVisibility({:?})", self.phase)
    }

    fn test_tag(&self) -> Option<&str> {
        self.modifier.tag()
    }
}

/// Receiver for content shown by [`AnimatedVisibility`] or
/// [`AnimatedContent`](super::AnimatedContent).
#[derive(Clone, Copy, Debug)]
pub struct AnimatedVisibilityScope {
    phase: VisibilityPhase,
}

impl AnimatedVisibilityScope {
    pub(crate) fn new(phase: VisibilityPhase) -> Self {
        Self { phase }
    }

    pub fn transition_phase(&self) -> VisibilityPhase {
        self.phase
    }

    /// Extra enter/exit animation for one child, run alongside the parent's.
    pub fn animate_enter_exit(
        &self,
        modifier: Modifier,
        enter: EnterTransition,
        exit: ExitTransition,
    ) -> Modifier {
        modifier.then(Modifier::animate_enter_exit(enter, exit))
    }
}

pub fn default_enter_transition() -> EnterTransition {
    fade_in(FiniteAnimationSpec::default()) + expand_in(FiniteAnimationSpec::default(), Alignment::BOTTOM_END)
}

pub fn default_exit_transition() -> ExitTransition {
    shrink_out(FiniteAnimationSpec::default(), Alignment::BOTTOM_END) + fade_out(FiniteAnimationSpec::default())
}

/// Animates `content` in when `visible` turns true and out when it turns
/// false. Content that is already visible on the first pass appears without
/// animation. While exiting, the content stays composed.
#[composable]
pub fn AnimatedVisibility(
    visible: bool,
    modifier: Modifier,
    enter: EnterTransition,
    exit: ExitTransition,
    content: impl FnOnce(&AnimatedVisibilityScope),
) -> NodeId {
    let runtime = current_runtime_handle();
    let transition = remember(|| VisibilityTransition::new(visible));
    let (phase, timer) = transition.update(|transition| {
        transition.settle();
        transition.retarget(visible, &enter, &exit, &runtime);
        (transition.phase, transition.timer.clone())
    });

    let (id, ()) = compose_container(
        || AnimatedVisibilityNode {
            modifier: modifier.clone(),
            visible,
            phase,
            enter: enter.clone(),
            exit: exit.clone(),
            timer: timer.clone(),
            children: IndexSet::new(),
        },
        |node: &mut AnimatedVisibilityNode| {
            node.modifier = modifier.clone();
            node.visible = visible;
            node.phase = phase;
            node.enter = enter.clone();
            node.exit = exit.clone();
            node.timer = timer.clone();
        },
        || {
            if phase.is_composed() {
                content(&AnimatedVisibilityScope::new(phase));
            }
        },
    );
    id
}
