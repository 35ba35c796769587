//! Direction presets for the animated layouts.
//!
//! Every preset fades over the full duration. The directional ones also
//! slide by half the content size over half the duration. All components
//! start after the same delay.

use composables_animation::{
    fade_in, fade_out, slide_in_horizontally, slide_in_vertically, slide_out_horizontally,
    slide_out_vertically, tween, EnterTransition, ExitTransition,
};
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnimationDirection {
    Fade,
    /// Enters from above, exits upwards.
    VerticalDown,
    /// Enters from below, exits downwards.
    VerticalUp,
    /// Enters from the start edge, exits towards it.
    HorizontalRight,
    /// Enters from the end edge, exits towards it.
    HorizontalLeft,
}

impl AnimationDirection {
    pub const ALL: [AnimationDirection; 5] = [
        AnimationDirection::Fade,
        AnimationDirection::VerticalDown,
        AnimationDirection::VerticalUp,
        AnimationDirection::HorizontalRight,
        AnimationDirection::HorizontalLeft,
    ];

    pub fn enter_transition(self, duration_millis: u64, delay_millis: u64) -> EnterTransition {
        match self {
            AnimationDirection::Fade => fade_in(tween(duration_millis, delay_millis)),
            AnimationDirection::VerticalDown => fade_in_with_slide_down(duration_millis, delay_millis),
            AnimationDirection::VerticalUp => fade_in_with_slide_up(duration_millis, delay_millis),
            AnimationDirection::HorizontalRight => {
                fade_in_with_slide_right(duration_millis, delay_millis)
            }
            AnimationDirection::HorizontalLeft => fade_in_with_slide_left(duration_millis, delay_millis),
        }
    }

    pub fn exit_transition(self, duration_millis: u64, delay_millis: u64) -> ExitTransition {
        match self {
            AnimationDirection::Fade => fade_out(tween(duration_millis, delay_millis)),
            AnimationDirection::VerticalDown => fade_out_with_slide_down(duration_millis, delay_millis),
            AnimationDirection::VerticalUp => fade_out_with_slide_up(duration_millis, delay_millis),
            AnimationDirection::HorizontalRight => {
                fade_out_with_slide_right(duration_millis, delay_millis)
            }
            AnimationDirection::HorizontalLeft => {
                fade_out_with_slide_left(duration_millis, delay_millis)
            }
        }
    }
}

pub fn fade_in_with_slide_down(duration_millis: u64, delay_millis: u64) -> EnterTransition {
    fade_in(tween(duration_millis, delay_millis))
        + slide_in_vertically(tween(duration_millis / 2, delay_millis), |height| -height / 2)
}

pub fn fade_in_with_slide_up(duration_millis: u64, delay_millis: u64) -> EnterTransition {
    fade_in(tween(duration_millis, delay_millis))
        + slide_in_vertically(tween(duration_millis / 2, delay_millis), |height| height / 2)
}

pub fn fade_in_with_slide_right(duration_millis: u64, delay_millis: u64) -> EnterTransition {
    fade_in(tween(duration_millis, delay_millis))
        + slide_in_horizontally(tween(duration_millis / 2, delay_millis), |width| -width / 2)
}

pub fn fade_in_with_slide_left(duration_millis: u64, delay_millis: u64) -> EnterTransition {
    fade_in(tween(duration_millis, delay_millis))
        + slide_in_horizontally(tween(duration_millis / 2, delay_millis), |width| width / 2)
}

pub fn fade_out_with_slide_down(duration_millis: u64, delay_millis: u64) -> ExitTransition {
    fade_out(tween(duration_millis, delay_millis))
        + slide_out_vertically(tween(duration_millis / 2, delay_millis), |height| -height / 2)
}

pub fn fade_out_with_slide_up(duration_millis: u64, delay_millis: u64) -> ExitTransition {
    fade_out(tween(duration_millis, delay_millis))
        + slide_out_vertically(tween(duration_millis / 2, delay_millis), |height| height / 2)
}

pub fn fade_out_with_slide_right(duration_millis: u64, delay_millis: u64) -> ExitTransition {
    fade_out(tween(duration_millis, delay_millis))
        + slide_out_horizontally(tween(duration_millis / 2, delay_millis), |width| -width / 2)
}

pub fn fade_out_with_slide_left(duration_millis: u64, delay_millis: u64) -> ExitTransition {
    fade_out(tween(duration_millis, delay_millis))
        + slide_out_horizontally(tween(duration_millis / 2, delay_millis), |width| width / 2)
}
