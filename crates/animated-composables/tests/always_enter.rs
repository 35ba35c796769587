use animated_composables::{AnimateAlwaysEnter, AlwaysEnterSpec};
use composables_runtime::MutableState;
use composables_testing::ComposeTestRule;
use composables_ui::*;

fn visibility_phase(rule: &ComposeTestRule) -> VisibilityPhase {
    let id = rule.find_nodes::<AnimatedVisibilityNode>()[0];
    rule.with_node(id, |node: &mut AnimatedVisibilityNode| node.phase)
        .expect("visibility node")
}

fn greeting(spec: AlwaysEnterSpec) -> impl FnMut() + 'static {
    move || {
        AnimateAlwaysEnter(Modifier::test_tag("greeting"), spec.clone(), None, |_| {
            Text("hello", Modifier::empty());
        });
    }
}

#[test]
fn content_enters_right_after_the_first_pass() {
    let mut rule = ComposeTestRule::new();
    rule.set_content(greeting(AlwaysEnterSpec::new())).expect("initial render");
    assert_eq!(visibility_phase(&rule), VisibilityPhase::Hidden);
    assert!(rule.texts().is_empty());

    rule.pump_until_idle().expect("pump");
    assert_eq!(visibility_phase(&rule), VisibilityPhase::Entering);
    assert_eq!(rule.texts(), vec!["hello".to_string()]);

    rule.settle_animations().expect("settle");
    assert_eq!(visibility_phase(&rule), VisibilityPhase::Visible);
    assert_eq!(rule.find_by_tag("greeting").len(), 1);
}

#[test]
fn caller_flag_is_flipped_exactly_once() {
    let mut rule = ComposeTestRule::new();
    let visible = MutableState::with_runtime(false, rule.runtime_handle());
    rule.set_content({
        let visible = visible.clone();
        move || {
            AnimateAlwaysEnter(Modifier::empty(), AlwaysEnterSpec::new(), Some(visible.clone()), |_| {
                Text("hello", Modifier::empty());
            });
        }
    })
    .expect("initial render");
    assert!(!visible.value());

    rule.pump_until_idle().expect("pump");
    assert!(visible.value());
    rule.settle_animations().expect("settle");

    visible.set(false);
    rule.pump_until_idle().expect("pump");
    rule.settle_animations().expect("settle");
    assert!(!visible.value());
    assert_eq!(visibility_phase(&rule), VisibilityPhase::Hidden);
    assert!(rule.texts().is_empty());
}

#[test]
fn false_condition_shows_content_without_animating() {
    let mut rule = ComposeTestRule::new();
    rule.set_content(greeting(AlwaysEnterSpec::new().condition(false)))
        .expect("initial render");

    assert_eq!(visibility_phase(&rule), VisibilityPhase::Visible);
    assert_eq!(rule.texts(), vec!["hello".to_string()]);
    rule.pump_until_idle().expect("pump");
    assert!(!rule.runtime_handle().has_frame_callbacks());
    assert_eq!(visibility_phase(&rule), VisibilityPhase::Visible);
}

#[test]
fn saveable_flag_skips_the_entrance_after_restore() {
    let mut rule = ComposeTestRule::new();
    rule.set_content(greeting(AlwaysEnterSpec::new().saveable()))
        .expect("initial render");
    rule.settle_animations().expect("settle");
    let saved = rule.save_state().expect("save");
    assert!(!saved.is_empty());

    let mut restored = ComposeTestRule::with_saved_state(saved);
    restored
        .set_content(greeting(AlwaysEnterSpec::new().saveable()))
        .expect("restored render");
    assert_eq!(visibility_phase(&restored), VisibilityPhase::Visible);
    assert_eq!(restored.texts(), vec!["hello".to_string()]);
    restored.pump_until_idle().expect("pump");
    assert!(!restored.runtime_handle().has_frame_callbacks());
}

#[test]
fn transient_flag_replays_the_entrance_after_restore() {
    let mut rule = ComposeTestRule::new();
    rule.set_content(greeting(AlwaysEnterSpec::new())).expect("initial render");
    rule.settle_animations().expect("settle");
    let saved = rule.save_state().expect("save");

    let mut restored = ComposeTestRule::with_saved_state(saved);
    restored
        .set_content(greeting(AlwaysEnterSpec::new()))
        .expect("restored render");
    assert_eq!(visibility_phase(&restored), VisibilityPhase::Hidden);
    restored.pump_until_idle().expect("pump");
    assert_eq!(visibility_phase(&restored), VisibilityPhase::Entering);
}

#[test]
fn leaving_before_the_effect_runs_cancels_the_flip() {
    let mut rule = ComposeTestRule::new();
    let mounted = MutableState::with_runtime(true, rule.runtime_handle());
    let visible = MutableState::with_runtime(false, rule.runtime_handle());
    rule.set_content({
        let mounted = mounted.clone();
        let visible = visible.clone();
        move || {
            if mounted.value() {
                AnimateAlwaysEnter(Modifier::empty(), AlwaysEnterSpec::new(), Some(visible.clone()), |_| {
                    Text("hello", Modifier::empty());
                });
            }
        }
    })
    .expect("initial render");
    assert!(rule.runtime_handle().has_pending_tasks());

    mounted.set(false);
    rule.recomposition().expect("recompose");
    assert!(rule.find_nodes::<AnimatedVisibilityNode>().is_empty());

    rule.pump_until_idle().expect("pump");
    assert!(!visible.value());
}

#[test]
fn enter_transition_reaches_the_visibility_node() {
    let mut rule = ComposeTestRule::new();
    rule.set_content(greeting(AlwaysEnterSpec::new())).expect("initial render");
    rule.pump_until_idle().expect("pump");

    let id = rule.find_by_tag("greeting")[0];
    let alpha = rule
        .with_node(id, |node: &mut AnimatedVisibilityNode| node.alpha())
        .expect("visibility node");
    assert_eq!(alpha, 0.0);

    rule.advance_time_by(200).expect("advance");
    let alpha = rule
        .with_node(id, |node: &mut AnimatedVisibilityNode| node.alpha())
        .expect("visibility node");
    assert!(alpha > 0.0 && alpha < 1.0, "alpha mid-enter was {alpha}");
}

#[test]
fn saveable_flags_created_in_a_loop_restore_independently() {
    fn cards() -> impl FnMut() + 'static {
        || {
            for i in 0..3 {
                AnimateAlwaysEnter(Modifier::empty(), AlwaysEnterSpec::new().saveable(), None, move |_| {
                    Text(format!("card {i}"), Modifier::empty());
                });
            }
        }
    }

    let mut rule = ComposeTestRule::new();
    rule.set_content(cards()).expect("initial render");
    rule.settle_animations().expect("settle");
    let saved = rule.save_state().expect("save");
    assert_eq!(saved.len(), 3);

    let mut restored = ComposeTestRule::with_saved_state(saved);
    restored.set_content(cards()).expect("restored render");
    let phases: Vec<VisibilityPhase> = restored
        .find_nodes::<AnimatedVisibilityNode>()
        .into_iter()
        .map(|id| {
            restored
                .with_node(id, |node: &mut AnimatedVisibilityNode| node.phase)
                .expect("visibility node")
        })
        .collect();
    assert_eq!(phases, vec![VisibilityPhase::Visible; 3]);
    assert_eq!(
        restored.texts(),
        vec!["card 0".to_string(), "card 1".to_string(), "card 2".to_string()]
    );
}
