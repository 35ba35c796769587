use super::*;
use composables_ui_graphics::{IntOffset, IntSize, VerticalAlignment};

fn linear(duration_millis: u64) -> AnimationSpec {
    AnimationSpec::linear(duration_millis)
}

#[test]
fn easing_bounds_are_correct() {
    let easings = [
        Easing::LinearEasing,
        Easing::EaseIn,
        Easing::EaseOut,
        Easing::EaseInOut,
        Easing::FastOutSlowInEasing,
        Easing::LinearOutSlowInEasing,
        Easing::FastOutLinearInEasing,
    ];

    for easing in easings {
        assert!(easing.transform(0.0).abs() < 0.01, "start should be ~0 for {:?}", easing);
        assert!((easing.transform(1.0) - 1.0).abs() < 0.01, "end should be ~1 for {:?}", easing);
    }
}

#[test]
fn fast_out_slow_in_runs_ahead_of_linear() {
    let eased = Easing::FastOutSlowInEasing.transform(0.5);
    assert!(eased > 0.5, "expected the curve to lead at the midpoint, got {eased}");
}

#[test]
fn animation_spec_default_has_reasonable_values() {
    let spec = AnimationSpec::default();
    assert_eq!(spec.duration_millis, DEFAULT_DURATION_MILLIS);
    assert_eq!(spec.easing, Easing::FastOutSlowInEasing);
    assert_eq!(spec.delay_millis, 0);
}

#[test]
fn tween_waits_for_its_delay() {
    let spec = tween(100, 50);
    assert_eq!(spec.total_duration_millis(), 150);
    assert_eq!(spec.fraction_at(25), 0.0);
    assert_eq!(spec.fraction_at(150), 1.0);
    assert_eq!(spec.fraction_at(1_000), 1.0);
}

#[test]
fn spring_settles_to_one_at_its_estimated_duration() {
    let spec = FiniteAnimationSpec::default();
    let duration = spec.total_duration_millis();
    assert!(duration > 0 && duration < 10_000, "unexpected spring duration {duration}");
    assert_eq!(spec.fraction_at(0), 0.0);
    assert_eq!(spec.fraction_at(duration), 1.0);
}

#[test]
fn bouncy_spring_overshoots() {
    let spec = SpringSpec::new(Spring::DAMPING_RATIO_HIGH_BOUNCY, Spring::STIFFNESS_MEDIUM);
    let peak = (0..500)
        .map(|millis| spec.fraction_at(millis))
        .fold(f32::MIN, f32::max);
    assert!(peak > 1.0, "expected overshoot, peak was {peak}");
}

#[test]
fn fade_in_interpolates_alpha() {
    let enter = fade_in(linear(100));
    assert_eq!(enter.alpha_at(0), 0.0);
    assert!((enter.alpha_at(50) - 0.5).abs() < 1e-4);
    assert_eq!(enter.alpha_at(100), 1.0);
    assert_eq!(enter.duration_millis(), 100);
}

#[test]
fn delayed_fade_out_holds_full_alpha_until_the_delay_passes() {
    let exit = fade_out(linear(100).with_delay(50));
    assert_eq!(exit.alpha_at(50), 1.0);
    assert!((exit.alpha_at(100) - 0.5).abs() < 1e-4);
    assert_eq!(exit.alpha_at(150), 0.0);
    assert_eq!(exit.duration_millis(), 150);
}

#[test]
fn combined_transition_reports_the_longest_component() {
    let enter = fade_in(linear(400)) + slide_in_vertically(linear(200), |height| height / 2);
    let size = IntSize::new(100, 80);

    assert_eq!(enter.duration_millis(), 400);
    assert_eq!(enter.offset_at(0, size), IntOffset::new(0, 40));
    assert_eq!(enter.offset_at(100, size), IntOffset::new(0, 20));
    assert_eq!(enter.offset_at(200, size), IntOffset::ZERO);
}

#[test]
fn first_component_of_a_kind_wins() {
    let enter = fade_in(linear(100)) + fade_in_from(0.5, linear(900));
    assert_eq!(enter.duration_millis(), 100);
    assert_eq!(enter.fade().map(|fade| fade.alpha), Some(0.0));
}

#[test]
fn slide_out_moves_towards_the_target() {
    let exit = slide_out_horizontally(linear(100), |width| -width);
    let size = IntSize::new(60, 10);
    assert_eq!(exit.offset_at(0, size), IntOffset::ZERO);
    assert_eq!(exit.offset_at(100, size), IntOffset::new(-60, 0));
}

#[test]
fn expand_vertically_grows_height_only() {
    let enter = expand_vertically(linear(100), VerticalAlignment::Top);
    let size = IntSize::new(100, 80);
    assert_eq!(enter.size_at(0, size), IntSize::new(100, 0));
    assert_eq!(enter.size_at(50, size), IntSize::new(100, 40));
    assert_eq!(enter.size_at(100, size), size);
}

#[test]
fn scale_out_shrinks_towards_the_target_scale() {
    let exit = scale_out(linear(100), 0.8);
    assert_eq!(exit.scale_at(0), 1.0);
    assert!((exit.scale_at(100) - 0.8).abs() < 1e-4);
}

#[test]
fn none_transitions_leave_content_untouched() {
    let enter = EnterTransition::none();
    let exit = ExitTransition::none();
    assert!(enter.is_none() && exit.is_none());
    assert_eq!(enter.alpha_at(0), 1.0);
    assert_eq!(exit.alpha_at(1_000), 1.0);
    assert_eq!(enter.duration_millis(), 0);
}

#[test]
fn keyframes_pass_through_pinned_values() {
    let spec = KeyframesSpec::new(100).at(IntSize::new(10, 10), 50);
    let start = IntSize::ZERO;
    let end = IntSize::new(20, 20);
    assert_eq!(spec.value_at(&start, &end, 25), IntSize::new(5, 5));
    assert_eq!(spec.value_at(&start, &end, 50), IntSize::new(10, 10));
    assert_eq!(spec.value_at(&start, &end, 75), IntSize::new(15, 15));
    assert_eq!(spec.value_at(&start, &end, 100), end);
}

#[test]
fn content_transform_lasts_as_long_as_its_slowest_side() {
    let transform = fade_in(linear(350)).together_with(fade_out(linear(90)));
    assert_eq!(transform.duration_millis(), 350);
    assert!(transform.size_transform.is_some());

    let keyframed = transform.using(SizeTransform::new(false, |_, _| {
        SizeAnimationSpec::Keyframes(KeyframesSpec::new(300))
    }));
    let size_transform = keyframed.size_transform.expect("size transform");
    assert!(!size_transform.clip);
    assert_eq!(
        size_transform
            .spec_for(IntSize::ZERO, IntSize::new(10, 10))
            .total_duration_millis(),
        300
    );
}
