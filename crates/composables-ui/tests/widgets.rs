use std::cell::Cell;
use std::rc::Rc;

use composables_animation::{fade_in, fade_out, AnimationSpec};
use composables_runtime::{remember, MutableState};
use composables_testing::ComposeTestRule;
use composables_ui::*;

fn linear(duration_millis: u64) -> AnimationSpec {
    AnimationSpec::linear(duration_millis)
}

fn visibility_phase(rule: &ComposeTestRule) -> VisibilityPhase {
    let id = rule.find_nodes::<AnimatedVisibilityNode>()[0];
    rule.with_node(id, |node: &mut AnimatedVisibilityNode| node.phase)
        .expect("visibility node")
}

#[test]
fn initially_visible_content_appears_without_animation() {
    let mut rule = ComposeTestRule::new();
    rule.set_content(|| {
        AnimatedVisibility(
            true,
            Modifier::empty(),
            fade_in(linear(100)),
            fade_out(linear(100)),
            |_| {
                Text("hello", Modifier::empty());
            },
        );
    })
    .expect("initial render");

    assert_eq!(rule.texts(), vec!["hello".to_string()]);
    assert_eq!(visibility_phase(&rule), VisibilityPhase::Visible);
    assert!(!rule.runtime_handle().has_frame_callbacks());
}

#[test]
fn visibility_enters_and_exits_over_time() {
    let mut rule = ComposeTestRule::new();
    let visible = MutableState::with_runtime(false, rule.runtime_handle());
    rule.set_content({
        let visible = visible.clone();
        move || {
            AnimatedVisibility(
                visible.value(),
                Modifier::test_tag("panel"),
                fade_in(linear(100)),
                fade_out(linear(100)),
                |_| {
                    Text("hello", Modifier::empty());
                },
            );
        }
    })
    .expect("initial render");
    assert!(rule.texts().is_empty());
    assert_eq!(visibility_phase(&rule), VisibilityPhase::Hidden);

    visible.set(true);
    rule.pump_until_idle().expect("pump");
    assert_eq!(visibility_phase(&rule), VisibilityPhase::Entering);
    assert_eq!(rule.texts(), vec!["hello".to_string()]);

    rule.advance_time_by(48).expect("advance");
    let panel = rule.find_by_tag("panel")[0];
    let alpha = rule
        .with_node(panel, |node: &mut AnimatedVisibilityNode| node.alpha())
        .expect("panel");
    assert!(alpha > 0.0 && alpha < 1.0, "alpha mid-enter was {alpha}");

    rule.settle_animations().expect("settle");
    assert_eq!(visibility_phase(&rule), VisibilityPhase::Visible);

    visible.set(false);
    rule.pump_until_idle().expect("pump");
    assert_eq!(visibility_phase(&rule), VisibilityPhase::Exiting);
    assert_eq!(rule.texts(), vec!["hello".to_string()]);

    rule.settle_animations().expect("settle");
    assert_eq!(visibility_phase(&rule), VisibilityPhase::Hidden);
    assert!(rule.texts().is_empty());
    assert_eq!(rule.find_nodes::<AnimatedVisibilityNode>().len(), 1);
}

#[test]
fn animated_content_keeps_outgoing_content_until_the_switch_ends() {
    let mut rule = ComposeTestRule::new();
    let target = MutableState::with_runtime(0u32, rule.runtime_handle());
    rule.set_content({
        let target = target.clone();
        move || {
            AnimatedContent(
                target.value(),
                Modifier::empty(),
                |_, _| fade_in(linear(100)).together_with(fade_out(linear(100))),
                Alignment::TOP_START,
                |value: &u32| *value,
                |_, value| {
                    Text(format!("value {value}"), Modifier::empty());
                },
            );
        }
    })
    .expect("initial render");
    assert_eq!(rule.texts(), vec!["value 0".to_string()]);

    target.set(1);
    rule.pump_until_idle().expect("pump");
    assert_eq!(rule.texts(), vec!["value 0".to_string(), "value 1".to_string()]);
    assert_eq!(rule.find_nodes::<ContentEntryNode>().len(), 2);

    rule.settle_animations().expect("settle");
    assert_eq!(rule.texts(), vec!["value 1".to_string()]);
    assert_eq!(rule.find_nodes::<ContentEntryNode>().len(), 1);
}

#[test]
fn animated_content_updates_in_place_for_the_same_key() {
    let mut rule = ComposeTestRule::new();
    let target = MutableState::with_runtime(0u32, rule.runtime_handle());
    rule.set_content({
        let target = target.clone();
        move || {
            AnimatedContent(
                target.value(),
                Modifier::empty(),
                |_, _| fade_in(linear(100)).together_with(fade_out(linear(100))),
                Alignment::TOP_START,
                |value: &u32| *value / 10,
                |_, value| {
                    Text(format!("value {value}"), Modifier::empty());
                },
            );
        }
    })
    .expect("initial render");

    target.set(3);
    rule.pump_until_idle().expect("pump");
    assert_eq!(rule.texts(), vec!["value 3".to_string()]);
    assert_eq!(rule.find_nodes::<ContentEntryNode>().len(), 1);
    assert!(!rule.runtime_handle().has_frame_callbacks());
}

#[test]
fn lazy_items_keep_their_state_when_reordered() {
    let mut rule = ComposeTestRule::new();
    let order = MutableState::with_runtime(vec!["a", "b"], rule.runtime_handle());
    let created = Rc::new(Cell::new(0));
    rule.set_content({
        let order = order.clone();
        let created = Rc::clone(&created);
        move || {
            let labels = order.value();
            let created = Rc::clone(&created);
            LazyColumn(Modifier::empty(), LazyColumnSpec::new(), |scope| {
                for label in labels {
                    let created = Rc::clone(&created);
                    scope.item(Some(ItemKey::from(label)), None, move |_| {
                        let stamp = remember(|| {
                            created.set(created.get() + 1);
                            format!("{label}-{}", created.get())
                        });
                        Text(stamp.get(), Modifier::empty());
                    });
                }
            });
        }
    })
    .expect("initial render");
    assert_eq!(rule.texts(), vec!["a-1".to_string(), "b-2".to_string()]);

    order.set(vec!["b", "a"]);
    rule.pump_until_idle().expect("pump");
    assert_eq!(rule.texts(), vec!["b-2".to_string(), "a-1".to_string()]);
    assert_eq!(created.get(), 2);
}

#[test]
fn duplicate_lazy_keys_fall_back_to_positions() {
    let mut rule = ComposeTestRule::new();
    rule.set_content(|| {
        LazyColumn(Modifier::empty(), LazyColumnSpec::new(), |scope| {
            scope.items(
                2,
                Some(&|_: usize| ItemKey::from("same")),
                None,
                |_, index| {
                    Text(format!("row {index}"), Modifier::empty());
                },
            );
        });
    })
    .expect("initial render");

    assert_eq!(rule.texts(), vec!["row 0".to_string(), "row 1".to_string()]);
    let list = rule.find_nodes::<LazyColumnNode>()[0];
    let keys = rule
        .with_node(list, |node: &mut LazyColumnNode| node.item_keys.clone())
        .expect("list");
    assert_eq!(keys, vec![ItemKey::from("same"), ItemKey::Index(1)]);
}

#[test]
fn pull_to_refresh_calls_on_refresh_once_per_refresh() {
    let mut rule = ComposeTestRule::new();
    let refreshing = MutableState::with_runtime(false, rule.runtime_handle());
    let refreshes = Rc::new(Cell::new(0));
    rule.set_content({
        let refreshing = refreshing.clone();
        let refreshes = Rc::clone(&refreshes);
        move || {
            let state = rememberPullToRefreshState();
            let on_refresh = {
                let refreshing = refreshing.clone();
                let refreshes = Rc::clone(&refreshes);
                move || {
                    refreshes.set(refreshes.get() + 1);
                    refreshing.set(true);
                }
            };
            PullToRefreshBox(
                refreshing.value(),
                on_refresh,
                Modifier::empty(),
                &state,
                Alignment::TOP_START,
                |state, is_refreshing| {
                    PullToRefreshDefaults::Indicator(
                        Modifier::align(Alignment::TOP_CENTER),
                        state,
                        is_refreshing,
                    );
                },
                |_| {
                    Text("body", Modifier::empty());
                },
            );
        }
    })
    .expect("initial render");
    rule.pump_until_idle().expect("pump");
    assert!(rule.find_nodes::<ProgressIndicatorNode>().is_empty());

    let node = rule.find_nodes::<PullToRefreshNode>()[0];
    assert!(rule
        .with_node(node, |node: &mut PullToRefreshNode| node.trigger_refresh())
        .expect("refresh node"));
    rule.pump_until_idle().expect("pump");

    assert_eq!(refreshes.get(), 1);
    assert_eq!(rule.find_nodes::<ProgressIndicatorNode>().len(), 1);
    assert!(!rule
        .with_node(node, |node: &mut PullToRefreshNode| node.trigger_refresh())
        .expect("refresh node"));
    assert_eq!(refreshes.get(), 1);
    let fraction = rule
        .with_node(node, |node: &mut PullToRefreshNode| node.state().distance_fraction())
        .expect("refresh node");
    assert_eq!(fraction, 1.0);

    refreshing.set(false);
    rule.pump_until_idle().expect("pump");
    assert!(rule.find_nodes::<ProgressIndicatorNode>().is_empty());
}

#[test]
fn scaffold_hands_insets_to_content_and_orders_slots() {
    let mut rule = ComposeTestRule::new();
    let insets = PaddingValues::symmetric(Dp(0.0), Dp(24.0));
    let received = Rc::new(Cell::new(PaddingValues::ZERO));
    rule.set_content({
        let received = Rc::clone(&received);
        move || {
            Scaffold(
                Modifier::empty(),
                ScaffoldSpec::new()
                    .floating_action_button_position(FabPosition::Center)
                    .content_window_insets(insets),
                || {
                    Text("top", Modifier::empty());
                },
                || {},
                || {},
                || {
                    Text("fab", Modifier::empty());
                },
                |padding| {
                    received.set(padding);
                    Text("body", Modifier::empty());
                },
            );
        }
    })
    .expect("initial render");

    assert_eq!(received.get(), insets);
    assert_eq!(
        rule.texts(),
        vec!["top".to_string(), "body".to_string(), "fab".to_string()]
    );
    let slots: Vec<ScaffoldSlot> = rule
        .find_nodes::<ScaffoldSlotNode>()
        .into_iter()
        .map(|id| {
            rule.with_node(id, |node: &mut ScaffoldSlotNode| node.slot)
                .expect("slot")
        })
        .collect();
    assert_eq!(
        slots,
        vec![
            ScaffoldSlot::TopBar,
            ScaffoldSlot::Content,
            ScaffoldSlot::BottomBar,
            ScaffoldSlot::SnackbarHost,
            ScaffoldSlot::FloatingActionButton,
        ]
    );
}

#[test]
fn column_records_its_spec_and_children() {
    let mut rule = ComposeTestRule::new();
    rule.set_content(|| {
        Column(
            Modifier::fill_max_size(),
            ColumnSpec::new().vertical_arrangement(LinearArrangement::spaced_by(8.0)),
            |_| {
                Text("one", Modifier::empty());
                Text("two", Modifier::empty());
            },
        );
    })
    .expect("initial render");

    let root = rule.root_id().expect("root");
    let (policy, children) = rule
        .with_node(root, |node: &mut LayoutNode| (node.policy, node.children.len()))
        .expect("column");
    assert_eq!(
        policy,
        LayoutPolicy::Column(ColumnSpec::new().vertical_arrangement(LinearArrangement::SpacedBy(8.0)))
    );
    assert_eq!(children, 2);
    assert!(rule.dump_tree().contains("Column"));
}
