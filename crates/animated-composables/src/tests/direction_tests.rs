use composables_ui_graphics::{IntOffset, IntSize};

use crate::direction::*;
use crate::presets::*;

const SIZE: IntSize = IntSize::new(200, 100);

#[test]
fn every_direction_yields_a_full_transition_pair() {
    for direction in AnimationDirection::ALL {
        let enter = direction.enter_transition(500, 0);
        let exit = direction.exit_transition(500, 0);
        assert!(enter.fade().is_some(), "{direction:?} enter has no fade");
        assert!(exit.fade().is_some(), "{direction:?} exit has no fade");
        assert_eq!(enter.duration_millis(), 500);
        assert_eq!(exit.duration_millis(), 500);
        assert_eq!(enter.alpha_at(0), 0.0);
        assert_eq!(exit.alpha_at(500), 0.0);
    }
}

#[test]
fn fade_has_no_slide() {
    assert!(AnimationDirection::Fade.enter_transition(500, 0).slide().is_none());
    assert!(AnimationDirection::Fade.exit_transition(500, 0).slide().is_none());
}

#[test]
fn slides_start_half_a_size_away() {
    let cases = [
        (AnimationDirection::VerticalDown, IntOffset::new(0, -50)),
        (AnimationDirection::VerticalUp, IntOffset::new(0, 50)),
        (AnimationDirection::HorizontalRight, IntOffset::new(-100, 0)),
        (AnimationDirection::HorizontalLeft, IntOffset::new(100, 0)),
    ];
    for (direction, offset) in cases {
        let enter = direction.enter_transition(500, 0);
        assert_eq!(enter.offset_at(0, SIZE), offset, "{direction:?} enter");
        assert_eq!(enter.offset_at(250, SIZE), IntOffset::ZERO, "{direction:?} enter");

        let exit = direction.exit_transition(500, 0);
        assert_eq!(exit.offset_at(0, SIZE), IntOffset::ZERO, "{direction:?} exit");
        assert_eq!(exit.offset_at(250, SIZE), offset, "{direction:?} exit");
    }
}

#[test]
fn delay_holds_every_component() {
    let enter = fade_in_with_slide_up(400, 100);
    assert_eq!(enter.duration_millis(), 500);
    assert_eq!(enter.alpha_at(100), 0.0);
    assert_eq!(enter.offset_at(100, SIZE), IntOffset::new(0, 50));
    assert_eq!(enter.offset_at(300, SIZE), IntOffset::ZERO);

    let exit = fade_out_with_slide_left(400, 100);
    assert_eq!(exit.alpha_at(100), 1.0);
    assert_eq!(exit.offset_at(100, SIZE), IntOffset::ZERO);
}

#[test]
fn fade_animation_cross_fades_in_250ms() {
    let transform = fade_animation();
    assert_eq!(transform.duration_millis(), 250);
    assert!(transform.target_content_enter.slide().is_none());
}

#[test]
fn default_animation_zooms_in() {
    let transform = default_animation();
    assert_eq!(transform.target_content_enter.scale_at(0), 1.10);
    assert_eq!(transform.target_content_enter.scale_at(300), 1.0);
    assert_eq!(transform.initial_content_exit.duration_millis(), 250);
}

#[test]
fn slide_animation_enters_from_near_the_bottom() {
    let transform = slide_animation();
    assert_eq!(transform.target_content_enter.offset_at(0, SIZE), IntOffset::new(0, 40));
    assert_eq!(transform.duration_millis(), 600);
}

#[test]
fn expand_animation_grows_width_first() {
    let expanding = expand_animation(true);
    let size_transform = expanding.size_transform.expect("size transform");
    let spec = size_transform.spec_for(IntSize::new(10, 10), IntSize::new(100, 50));
    assert_eq!(spec.total_duration_millis(), 300);
    assert_eq!(
        spec.value_at(IntSize::new(10, 10), IntSize::new(100, 50), 150),
        IntSize::new(100, 10)
    );

    let collapsing = expand_animation(false).size_transform.expect("size transform");
    let spec = collapsing.spec_for(IntSize::new(100, 50), IntSize::new(10, 10));
    assert_eq!(
        spec.value_at(IntSize::new(100, 50), IntSize::new(10, 10), 150),
        IntSize::new(100, 10)
    );
}
