use std::cell::Cell;
use std::rc::Rc;

use animated_composables::{
    AnimatedLazyPullToRefresh, LazyPagingItems, LoadState, LoadType, PagedListNode, PagedListPhase,
    PagedListSlots, PagedListSpec, UiState,
};
use composables_runtime::MutableState;
use composables_testing::ComposeTestRule;
use composables_ui::*;

fn slots() -> PagedListSlots {
    PagedListSlots::new()
        .initial(|| {
            Text("initial", Modifier::empty());
        })
        .empty(|| {
            Text("nothing here", Modifier::empty());
        })
        .prepend_error(|message| {
            Text(format!("prepend failed: {message}"), Modifier::empty());
        })
        .append_error(|message| {
            Text(format!("append failed: {message}"), Modifier::empty());
        })
        .error(|error| {
            Text(
                format!("error {}", error.message().unwrap_or("unknown")),
                Modifier::empty(),
            );
        })
}

fn paged_feed(
    ui_state: UiState<LazyPagingItems<String>>,
    refreshing: MutableState<bool>,
    on_refresh: impl Fn() + Clone + 'static,
) -> impl FnMut() + 'static {
    move || {
        AnimatedLazyPullToRefresh(
            Modifier::empty(),
            PagedListSpec::new(),
            &ui_state,
            Some(refreshing.clone()),
            on_refresh.clone(),
            None,
            slots(),
            |list, paging| {
                let count = paging.item_count();
                let paging = paging.clone();
                list.items(count, None, None, move |_, index| {
                    if let Some(label) = paging.get(index) {
                        Text(label, Modifier::empty());
                    }
                });
            },
        );
    }
}

struct Feed {
    rule: ComposeTestRule,
    paging: LazyPagingItems<String>,
    refreshing: MutableState<bool>,
}

impl Feed {
    fn new(items: Option<Vec<&str>>) -> Self {
        Self::with_refresh(items, || {})
    }

    fn with_refresh(items: Option<Vec<&str>>, on_refresh: impl Fn() + Clone + 'static) -> Self {
        let mut rule = ComposeTestRule::new();
        let paging = LazyPagingItems::new(rule.runtime_handle());
        if let Some(items) = items {
            paging.submit(items.into_iter().map(String::from).collect());
        }
        let refreshing = MutableState::with_runtime(false, rule.runtime_handle());
        rule.set_content(paged_feed(
            UiState::success(paging.clone()),
            refreshing.clone(),
            on_refresh,
        ))
        .expect("initial render");
        Self {
            rule,
            paging,
            refreshing,
        }
    }

    fn phase(&self) -> PagedListPhase {
        let id = self.rule.find_nodes::<PagedListNode>()[0];
        self.rule
            .with_node(id, |node: &mut PagedListNode| node.phase)
            .expect("paged list")
    }

    fn item_keys(&self) -> Vec<ItemKey> {
        let id = self.rule.find_nodes::<LazyColumnNode>()[0];
        self.rule
            .with_node(id, |node: &mut LazyColumnNode| node.item_keys.clone())
            .expect("list")
    }

    fn indicator_active(&self) -> bool {
        let id = self.rule.find_nodes::<PullToRefreshNode>()[0];
        self.rule
            .with_node(id, |node: &mut PullToRefreshNode| node.is_refreshing)
            .expect("refresh box")
    }
}

#[test]
fn finished_load_without_items_shows_the_empty_slot() {
    let mut feed = Feed::new(Some(Vec::new()));
    feed.rule.pump_until_idle().expect("pump");

    assert_eq!(feed.phase(), PagedListPhase::Empty);
    assert_eq!(feed.rule.texts(), vec!["nothing here".to_string()]);
    assert!(feed.rule.find_nodes::<LazyColumnNode>().is_empty());
    assert!(!feed.indicator_active());
    assert!(!feed.refreshing.value());
}

#[test]
fn submitted_items_are_listed() {
    let mut feed = Feed::new(Some(vec!["a", "b"]));
    feed.rule.pump_until_idle().expect("pump");

    assert_eq!(feed.phase(), PagedListPhase::HasItems);
    assert_eq!(feed.rule.texts(), vec!["a".to_string(), "b".to_string()]);
    assert_eq!(feed.item_keys(), vec![ItemKey::Index(0), ItemKey::Index(1)]);
}

#[test]
fn load_slots_follow_append_and_prepend_states() {
    let mut feed = Feed::new(Some(vec!["a"]));

    feed.paging.set_load_state(LoadType::Append, LoadState::Loading);
    feed.paging.set_load_state(LoadType::Prepend, LoadState::Loading);
    feed.rule.pump_until_idle().expect("pump");
    let keys = feed.item_keys();
    assert_eq!(keys.first(), Some(&ItemKey::from("loading_prepend")));
    assert_eq!(keys.last(), Some(&ItemKey::from("loading_append")));
    assert_eq!(feed.rule.find_nodes::<ProgressIndicatorNode>().len(), 2);

    feed.paging.set_load_state(LoadType::Prepend, LoadState::not_loading());
    feed.paging
        .set_load_state(LoadType::Append, LoadState::error("offline"));
    feed.rule.pump_until_idle().expect("pump");
    let keys = feed.item_keys();
    assert!(!keys.contains(&ItemKey::from("loading_prepend")));
    assert!(!keys.contains(&ItemKey::from("loading_append")));
    assert_eq!(keys.last(), Some(&ItemKey::from("error_append")));
    assert_eq!(
        feed.rule.texts(),
        vec!["a".to_string(), "append failed: offline".to_string()]
    );

    feed.paging.append_page(vec!["b".to_string()], true);
    feed.rule.pump_until_idle().expect("pump");
    assert_eq!(feed.item_keys(), vec![ItemKey::Index(0), ItemKey::Index(1)]);
    assert_eq!(feed.rule.texts(), vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn refresh_drives_the_indicator_and_phase() {
    let mut feed = Feed::new(Some(vec!["a"]));
    feed.rule.pump_until_idle().expect("pump");
    assert_eq!(feed.phase(), PagedListPhase::HasItems);
    assert!(!feed.indicator_active());

    feed.paging.refresh();
    feed.rule.pump_until_idle().expect("pump");
    assert!(feed.refreshing.value());
    assert!(feed.indicator_active());
    assert_eq!(feed.phase(), PagedListPhase::LoadingFull);
    assert_eq!(feed.rule.texts(), vec!["a".to_string()]);

    feed.paging.submit(vec!["a".to_string(), "b".to_string()]);
    feed.rule.pump_until_idle().expect("pump");
    assert!(!feed.refreshing.value());
    assert!(!feed.indicator_active());
    assert_eq!(feed.phase(), PagedListPhase::HasItems);
    assert_eq!(feed.rule.texts(), vec!["a".to_string(), "b".to_string()]);
}

#[test]
fn pulling_calls_on_refresh_and_the_source_handler() {
    let pulls = Rc::new(Cell::new(0));
    let reloads = Rc::new(Cell::new(0));
    let source: Rc<Cell<Option<LazyPagingItems<String>>>> = Rc::default();

    let on_refresh = {
        let pulls = Rc::clone(&pulls);
        let source = Rc::clone(&source);
        move || {
            pulls.set(pulls.get() + 1);
            if let Some(paging) = source.take() {
                paging.refresh();
                source.set(Some(paging));
            }
        }
    };
    let mut feed = Feed::with_refresh(Some(vec!["a"]), on_refresh);
    let paging = feed.paging.clone().with_refresh_handler({
        let reloads = Rc::clone(&reloads);
        move || reloads.set(reloads.get() + 1)
    });
    source.set(Some(paging));
    feed.rule.pump_until_idle().expect("pump");

    let node = feed.rule.find_nodes::<PullToRefreshNode>()[0];
    assert!(feed
        .rule
        .with_node(node, |node: &mut PullToRefreshNode| node.trigger_refresh())
        .expect("refresh box"));
    feed.rule.pump_until_idle().expect("pump");

    assert_eq!(pulls.get(), 1);
    assert_eq!(reloads.get(), 1);
    assert!(feed.indicator_active());
    assert!(!feed
        .rule
        .with_node(node, |node: &mut PullToRefreshNode| node.trigger_refresh())
        .expect("refresh box"));
    assert_eq!(pulls.get(), 1);
}

#[test]
fn retry_reloads_only_failed_loads() {
    let retries = Rc::new(Cell::new(0));
    let mut feed = Feed::new(Some(vec!["a"]));
    let paging = feed.paging.clone().with_retry_handler({
        let retries = Rc::clone(&retries);
        move || retries.set(retries.get() + 1)
    });

    paging.retry();
    assert_eq!(retries.get(), 0);

    paging.set_load_state(LoadType::Append, LoadState::error("offline"));
    feed.rule.pump_until_idle().expect("pump");
    assert_eq!(feed.item_keys().last(), Some(&ItemKey::from("error_append")));

    paging.retry();
    feed.rule.pump_until_idle().expect("pump");
    assert_eq!(retries.get(), 1);
    assert!(paging.load_state().append.is_loading());
    assert_eq!(feed.item_keys().last(), Some(&ItemKey::from("loading_append")));
}

#[test]
fn initial_and_error_states_use_their_slots() {
    let mut rule = ComposeTestRule::new();
    let refreshing = MutableState::with_runtime(false, rule.runtime_handle());
    rule.set_content(paged_feed(UiState::Initial, refreshing.clone(), || {}))
        .expect("initial render");
    assert_eq!(rule.texts(), vec!["initial".to_string()]);
    assert!(rule.find_nodes::<PagedListNode>().is_empty());

    let mut rule = ComposeTestRule::new();
    rule.set_content(paged_feed(UiState::error("unreachable"), refreshing, || {}))
        .expect("initial render");
    assert_eq!(rule.texts(), vec!["error unreachable".to_string()]);
}

#[test]
fn first_load_in_flight_shows_neither_list_nor_empty_view() {
    let mut feed = Feed::new(None);
    feed.rule.pump_until_idle().expect("pump");

    assert_eq!(feed.phase(), PagedListPhase::LoadingFull);
    assert!(feed.refreshing.value());
    assert!(feed.indicator_active());
    assert!(feed.rule.texts().is_empty());
}

#[test]
fn leaving_success_mid_refresh_clears_the_indicator() {
    let mut rule = ComposeTestRule::new();
    let paging = LazyPagingItems::<String>::new(rule.runtime_handle());
    let state = MutableState::with_runtime(UiState::success(paging.clone()), rule.runtime_handle());
    let refreshing = MutableState::with_runtime(false, rule.runtime_handle());
    rule.set_content({
        let (state, refreshing) = (state.clone(), refreshing.clone());
        move || {
            let ui_state = state.value();
            paged_feed(ui_state, refreshing.clone(), || {})();
        }
    })
    .expect("initial render");
    rule.pump_until_idle().expect("pump");
    assert!(paging.load_state().refresh.is_loading());
    assert!(refreshing.value());

    state.set(UiState::error("offline"));
    rule.settle_animations().expect("settle");

    assert!(!refreshing.value());
    let id = rule.find_nodes::<PullToRefreshNode>()[0];
    let active = rule
        .with_node(id, |node: &mut PullToRefreshNode| node.is_refreshing)
        .expect("refresh box");
    assert!(!active);
    assert_eq!(rule.texts(), vec!["error offline".to_string()]);
}
