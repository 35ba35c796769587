//! Animation specs and transitions.
//!
//! Transitions are plain data: they describe what changes (alpha, offset,
//! scale, size) and with which spec. Hosts ask them for values at a given
//! play time; nothing here owns a clock.

mod content;
mod easing;
mod spec;
mod transition;

pub use content::*;
pub use easing::*;
pub use spec::*;
pub use transition::*;

pub mod prelude {
    pub use crate::content::{ContentTransform, SizeTransform};
    pub use crate::easing::Easing;
    pub use crate::spec::{spring, tween, AnimationSpec, FiniteAnimationSpec, KeyframesSpec, Spring, SpringSpec};
    pub use crate::transition::{
        expand_horizontally, expand_in, expand_vertically, fade_in, fade_in_from, fade_out, fade_out_to,
        scale_in, scale_out, shrink_horizontally, shrink_out, shrink_vertically, slide_in,
        slide_in_horizontally, slide_in_vertically, slide_out, slide_out_horizontally,
        slide_out_vertically, EnterTransition, ExitTransition,
    };
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
