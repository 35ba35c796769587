//! Composables that drive enter/exit transitions from the frame clock.

mod clock;
mod content;
mod visibility;

pub use clock::FrameTimer;
pub use content::{AnimatedContent, AnimatedContentNode, ContentEntryNode};
pub use visibility::{
    default_enter_transition, default_exit_transition, AnimatedVisibility, AnimatedVisibilityNode,
    AnimatedVisibilityScope, VisibilityPhase,
};
