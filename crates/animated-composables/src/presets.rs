//! Ready-made content transforms and transitions.

use composables_animation::{
    expand_horizontally, expand_vertically, fade_in, fade_in_from, fade_out, scale_in,
    shrink_horizontally, slide_in_horizontally, slide_in_vertically, slide_out_horizontally,
    slide_out_vertically, spring, tween, ContentTransform, EnterTransition, ExitTransition,
    FiniteAnimationSpec, KeyframesSpec, SizeTransform, Spring, DEFAULT_DURATION_MILLIS,
};
use composables_ui_graphics::{Density, Dp, HorizontalAlignment, IntSize, VerticalAlignment};

const SWITCH_DURATION_MILLIS: u64 = 250;
const SLIDE_DURATION_MILLIS: u64 = 600;
const SLIDE_INSET_PX: i32 = 60;
const ENTRANCE_SCALE: f32 = 1.10;
const ENTRANCE_DISTANCE: Dp = Dp(40.0);
const ENTRANCE_ALPHA: f32 = 0.3;

/// Fade in with a slight zoom, fade out quickly.
pub fn default_animation() -> ContentTransform {
    fade_in_with_scale(DEFAULT_DURATION_MILLIS, 0)
        .together_with(fade_out(tween(SWITCH_DURATION_MILLIS, 0)))
}

/// Cross-fade used by [`StatefulContainer`](crate::StatefulContainer) unless
/// told otherwise.
pub fn fade_animation() -> ContentTransform {
    fade_in(tween(SWITCH_DURATION_MILLIS, 0)).together_with(fade_out(tween(SWITCH_DURATION_MILLIS, 0)))
}

pub fn slide_animation() -> ContentTransform {
    slide_in_vertically(tween(SLIDE_DURATION_MILLIS, 0), |height| height - SLIDE_INSET_PX).together_with(
        slide_out_vertically(tween(SLIDE_DURATION_MILLIS, 0), |height| height - SLIDE_INSET_PX),
    )
}

pub fn fade_in_with_scale(duration_millis: u64, delay_millis: u64) -> EnterTransition {
    fade_in(tween(duration_millis, delay_millis))
        + scale_in(tween(duration_millis, delay_millis), ENTRANCE_SCALE)
}

/// Fade between a collapsed and an expanded state. Expanding grows the width
/// first, collapsing shrinks the height first.
pub fn expand_animation(expanding: bool) -> ContentTransform {
    fade_in(tween(150, 150))
        .together_with(fade_out(tween(150, 0)))
        .using(SizeTransform::new(true, move |initial, target| {
            let midpoint = if expanding {
                IntSize::new(target.width, initial.height)
            } else {
                IntSize::new(initial.width, target.height)
            };
            KeyframesSpec::new(300).at(midpoint, 150).into()
        }))
}

/// Slides in from 40dp towards the start while expanding from `expand_from`.
pub fn slide_enter_horizontal_animation(
    density: Density,
    expand_from: HorizontalAlignment,
) -> EnterTransition {
    slide_in_horizontally(FiniteAnimationSpec::default(), move |_| {
        -density.round_to_px(ENTRANCE_DISTANCE)
    }) + expand_horizontally(FiniteAnimationSpec::default(), expand_from)
        + fade_in_from(ENTRANCE_ALPHA, FiniteAnimationSpec::default())
}

pub fn slide_enter_vertical_animation(
    density: Density,
    expand_from: VerticalAlignment,
    spec: impl Into<FiniteAnimationSpec>,
) -> EnterTransition {
    slide_in_vertically(spec, move |_| -density.round_to_px(ENTRANCE_DISTANCE))
        + expand_vertically(FiniteAnimationSpec::default(), expand_from)
        + fade_in_from(ENTRANCE_ALPHA, FiniteAnimationSpec::default())
}

/// Spec [`slide_enter_vertical_animation`] is usually paired with.
pub fn slide_enter_vertical_spec() -> FiniteAnimationSpec {
    spring(Spring::DAMPING_RATIO_NO_BOUNCY, Spring::STIFFNESS_MEDIUM_LOW).into()
}

pub fn slide_exit_horizontal_animation() -> ExitTransition {
    slide_out_horizontally(FiniteAnimationSpec::default(), |width| -width / 2)
        + shrink_horizontally(FiniteAnimationSpec::default(), HorizontalAlignment::End)
        + fade_out(FiniteAnimationSpec::default())
}
