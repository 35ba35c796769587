//! Paged list with pull-to-refresh, loading slots and an animated empty
//! state.

use std::fmt;
use std::rc::Rc;

use composables_animation::{fade_in, fade_out, tween, ContentTransform, FiniteAnimationSpec, DEFAULT_DURATION_MILLIS};
use composables_macros::composable;
use composables_runtime::{useState, MutableState, Node, NodeId, SideEffect};
use composables_ui::{
    compose_container, default_enter_transition, default_exit_transition, rememberPullToRefreshState,
    replace_children, AnimatedContent, AnimatedVisibility, AnimatedVisibilityScope, Box, BoxSpec,
    CircularProgressIndicator, Column, ColumnSpec, LazyColumn, LazyColumnSpec, LazyItemScope,
    LazyListScope, Modifier, PullToRefreshBox, PullToRefreshDefaults, PullToRefreshState,
};
use composables_ui_graphics::{Alignment, Dp, LinearArrangement, PaddingValues};
use indexmap::IndexSet;

use crate::paging::{paging_load_state_item, CombinedLoadStates, LazyPagingItems, PagedListPhase};
use crate::presets::fade_animation;
use crate::stateful_container::{StateBranches, StatefulContainer, StatefulContainerSpec};
use crate::ui_state::{ErrorState, Success, UiState};

const CONTENT_FADE_MILLIS: u64 = 350;
const LOAD_SLOT_TOP_PADDING: Dp = Dp(20.0);
const APPEND_INDICATOR_SIZE: Dp = Dp(18.0);
const LIST_BOTTOM_PADDING: Dp = Dp(26.0);

#[derive(Clone, Debug)]
pub struct PagedListSpec {
    /// Applied to the lazy list, before its size and enter/exit animations.
    pub list_modifier: Modifier,
    pub list_spec: LazyColumnSpec,
    /// How the list enters and leaves when items appear or run out.
    pub content_animation: ContentTransform,
    /// How the empty view enters and leaves.
    pub empty_content_animation: ContentTransform,
    pub container: StatefulContainerSpec,
}

impl PagedListSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn list_modifier(mut self, modifier: Modifier) -> Self {
        self.list_modifier = modifier;
        self
    }

    pub fn list_spec(mut self, spec: LazyColumnSpec) -> Self {
        self.list_spec = spec;
        self
    }

    pub fn content_animation(mut self, transform: ContentTransform) -> Self {
        self.content_animation = transform;
        self
    }

    pub fn empty_content_animation(mut self, transform: ContentTransform) -> Self {
        self.empty_content_animation = transform;
        self
    }

    pub fn container(mut self, container: StatefulContainerSpec) -> Self {
        self.container = container;
        self
    }
}

impl Default for PagedListSpec {
    fn default() -> Self {
        Self {
            list_modifier: Modifier::empty(),
            list_spec: LazyColumnSpec::new()
                .vertical_arrangement(LinearArrangement::spaced_by(0.0))
                .content_padding(PaddingValues::bottom(LIST_BOTTOM_PADDING)),
            content_animation: fade_in(tween(CONTENT_FADE_MILLIS, 0))
                .together_with(fade_out(tween(CONTENT_FADE_MILLIS, 0))),
            empty_content_animation: fade_in(tween(DEFAULT_DURATION_MILLIS, CONTENT_FADE_MILLIS))
                .together_with(fade_out(FiniteAnimationSpec::default())),
            container: StatefulContainerSpec::default(),
        }
    }
}

type Slot = Rc<dyn Fn()>;
type ErrorSlot = Rc<dyn Fn(&str)>;

/// Caller content for everything around the items themselves.
#[derive(Clone)]
pub struct PagedListSlots {
    /// Shown centered while the state is initial or loading.
    pub initial: Slot,
    pub prepend_loading: Slot,
    pub prepend_error: ErrorSlot,
    pub append_loading: Slot,
    pub append_error: ErrorSlot,
    pub empty: Slot,
    /// Shown when the state itself is an error.
    pub error: Rc<dyn Fn(&ErrorState)>,
    pub header: Rc<dyn Fn(&AnimatedVisibilityScope)>,
    /// Pull indicator; receives the pull state and whether a refresh is in
    /// flight.
    pub indicator: Rc<dyn Fn(&PullToRefreshState, bool)>,
}

impl PagedListSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn initial(mut self, content: impl Fn() + 'static) -> Self {
        self.initial = Rc::new(content);
        self
    }

    pub fn prepend_loading(mut self, content: impl Fn() + 'static) -> Self {
        self.prepend_loading = Rc::new(content);
        self
    }

    pub fn prepend_error(mut self, content: impl Fn(&str) + 'static) -> Self {
        self.prepend_error = Rc::new(content);
        self
    }

    pub fn append_loading(mut self, content: impl Fn() + 'static) -> Self {
        self.append_loading = Rc::new(content);
        self
    }

    pub fn append_error(mut self, content: impl Fn(&str) + 'static) -> Self {
        self.append_error = Rc::new(content);
        self
    }

    pub fn empty(mut self, content: impl Fn() + 'static) -> Self {
        self.empty = Rc::new(content);
        self
    }

    pub fn error(mut self, content: impl Fn(&ErrorState) + 'static) -> Self {
        self.error = Rc::new(content);
        self
    }

    pub fn header(mut self, content: impl Fn(&AnimatedVisibilityScope) + 'static) -> Self {
        self.header = Rc::new(content);
        self
    }

    pub fn indicator(mut self, content: impl Fn(&PullToRefreshState, bool) + 'static) -> Self {
        self.indicator = Rc::new(content);
        self
    }
}

impl Default for PagedListSlots {
    fn default() -> Self {
        Self {
            initial: Rc::new(|| {
                CircularProgressIndicator(Modifier::empty(), PullToRefreshDefaults::INDICATOR_COLOR);
            }),
            prepend_loading: Rc::new(|| {
                CircularProgressIndicator(Modifier::empty(), PullToRefreshDefaults::INDICATOR_COLOR);
            }),
            prepend_error: Rc::new(|_: &str| {}),
            append_loading: Rc::new(|| {
                CircularProgressIndicator(
                    Modifier::size(APPEND_INDICATOR_SIZE, APPEND_INDICATOR_SIZE),
                    PullToRefreshDefaults::INDICATOR_COLOR,
                );
            }),
            append_error: Rc::new(|_: &str| {}),
            empty: Rc::new(|| {}),
            error: Rc::new(|_: &ErrorState| {}),
            header: Rc::new(|_: &AnimatedVisibilityScope| {}),
            indicator: Rc::new(|state: &PullToRefreshState, is_refreshing: bool| {
                PullToRefreshDefaults::Indicator(Modifier::align(Alignment::TOP_CENTER), state, is_refreshing);
            }),
        }
    }
}

impl fmt::Debug for PagedListSlots {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PagedListSlots").finish_non_exhaustive()
    }
}

/// Node grouping the empty view and the list of one paged snapshot.
#[derive(Debug)]
pub struct PagedListNode {
    pub phase: PagedListPhase,
    pub item_count: usize,
    pub load_states: CombinedLoadStates,
    pub children: IndexSet<NodeId>,
}

impl Node for PagedListNode {
    fn update_children(&mut self, children: &[NodeId]) {
        replace_children(&mut self.children, children);
    }

    fn children(&self) -> Vec<NodeId> {
        self.children.iter().copied().collect()
    }

    fn describe(&self) -> String {
        format!("PagedList({:?}, {} items)", self.phase, self.item_count)
    }
}

type ListContent<T> = Rc<dyn Fn(&mut LazyListScope<'_>, &LazyPagingItems<T>)>;

#[composable]
fn LoadSlot(item: &LazyItemScope, slot: &Slot) {
    let modifier = item
        .animate_item(Modifier::empty())
        .then(Modifier::padding_values(PaddingValues::top(LOAD_SLOT_TOP_PADDING)))
        .then(Modifier::fill_max_width());
    Box(modifier, BoxSpec::new().content_alignment(Alignment::CENTER), |_| slot());
}

#[composable]
fn CenteredFullSize(content: &Slot) {
    Box(
        Modifier::fill_max_size().then(Modifier::vertical_scroll()),
        BoxSpec::new().content_alignment(Alignment::CENTER),
        |_| content(),
    );
}

#[composable]
fn PagedList<T: 'static>(
    paging: &LazyPagingItems<T>,
    is_refreshing: bool,
    spec: &PagedListSpec,
    slots: &PagedListSlots,
    content: &ListContent<T>,
) -> NodeId {
    let item_count = paging.item_count();
    let load_states = paging.load_state();
    let phase = PagedListPhase::observe(item_count, &load_states);
    let show_empty = item_count == 0 && !is_refreshing && load_states.append.is_not_loading();

    let (id, ()) = compose_container(
        || PagedListNode {
            phase: PagedListPhase::Initial,
            item_count,
            load_states: load_states.clone(),
            children: IndexSet::new(),
        },
        |node: &mut PagedListNode| {
            if node.phase != phase {
                log::debug!("paged list {:?} -> {phase:?}", node.phase);
                node.phase = phase;
            }
            node.item_count = item_count;
            node.load_states = load_states.clone();
        },
        || {
            let empty_animation = spec.empty_content_animation.clone();
            AnimatedVisibility(
                show_empty,
                Modifier::empty(),
                default_enter_transition(),
                default_exit_transition(),
                |scope| {
                    let modifier = scope.animate_enter_exit(
                        Modifier::fill_max_size().then(Modifier::vertical_scroll()),
                        empty_animation.target_content_enter,
                        empty_animation.initial_content_exit,
                    );
                    Box(modifier, BoxSpec::new().content_alignment(Alignment::CENTER), |_| {
                        (slots.empty)()
                    });
                },
            );

            AnimatedContent(
                item_count > 0,
                Modifier::empty(),
                |_: &bool, _: &bool| fade_animation(),
                Alignment::TOP_START,
                |has_items: &bool| *has_items,
                |scope, has_items: &bool| {
                    if !*has_items {
                        return;
                    }
                    Column(Modifier::empty(), ColumnSpec::default(), |_| {
                        (slots.header)(scope);
                        let list_modifier = scope.animate_enter_exit(
                            spec.list_modifier
                                .then(Modifier::animate_content_size(FiniteAnimationSpec::default())),
                            spec.content_animation.target_content_enter.clone(),
                            spec.content_animation.initial_content_exit.clone(),
                        );
                        LazyColumn(list_modifier, spec.list_spec, |list| {
                            let (loading, error) = (slots.prepend_loading.clone(), slots.prepend_error.clone());
                            paging_load_state_item(
                                list,
                                &load_states.prepend,
                                "prepend",
                                move |item| LoadSlot(item, &loading),
                                move |_, message| error(message),
                            );

                            content(list, paging);

                            let (loading, error) = (slots.append_loading.clone(), slots.append_error.clone());
                            paging_load_state_item(
                                list,
                                &load_states.append,
                                "append",
                                move |item| LoadSlot(item, &loading),
                                move |_, message| error(message),
                            );
                        });
                    });
                },
            );
        },
    );
    id
}

/// Paged list inside a pull-to-refresh box and a [`StatefulContainer`].
///
/// While `ui_state` is initial or loading, the initial slot is shown. On
/// success the list is shown once the snapshot has items, and the empty slot
/// once a load finished without any. `is_refreshing` (or an internal flag
/// when `None`) follows the snapshot's refresh state and drives the pull
/// indicator; it is cleared whenever `ui_state` is not a success. Refreshing itself is left to `on_refresh` and the source.
#[composable]
#[allow(clippy::too_many_arguments)]
pub fn AnimatedLazyPullToRefresh<T: 'static>(
    modifier: Modifier,
    spec: PagedListSpec,
    ui_state: &UiState<LazyPagingItems<T>>,
    is_refreshing: Option<MutableState<bool>>,
    on_refresh: impl Fn() + 'static,
    state: Option<&PullToRefreshState>,
    slots: PagedListSlots,
    content: impl Fn(&mut LazyListScope<'_>, &LazyPagingItems<T>) + 'static,
) -> NodeId {
    let own_flag = useState(|| false);
    let refreshing_flag = is_refreshing.unwrap_or(own_flag);
    let own_state = rememberPullToRefreshState();
    let state = state.unwrap_or(&own_state);
    let content: ListContent<T> = Rc::new(content);
    let indicator = Rc::clone(&slots.indicator);

    // Only a successful state has a source whose refresh can be in flight.
    let refreshing = ui_state
        .data()
        .is_some_and(|paging| paging.load_state().refresh.is_loading());
    {
        let flag = refreshing_flag.clone();
        SideEffect(move || {
            if flag.set_if_changed(refreshing) {
                log::debug!("refresh in flight: {refreshing}");
            }
        });
    }

    PullToRefreshBox(
        refreshing_flag.value(),
        on_refresh,
        modifier,
        state,
        Alignment::TOP_START,
        |state, is_refreshing| indicator(state, is_refreshing),
        |_| {
            let branches = StateBranches::new(|success: &Success<LazyPagingItems<T>>| {
                if let Some(paging) = &success.data {
                    let refreshing = paging.load_state().refresh.is_loading();
                    PagedList(paging, refreshing, &spec, &slots, &content);
                }
            })
            .initial(|| CenteredFullSize(&slots.initial))
            .loading(|| CenteredFullSize(&slots.initial))
            .empty(|| CenteredFullSize(&slots.empty))
            .error(|error| (slots.error)(error));

            StatefulContainer(Modifier::fill_max_size(), spec.container.clone(), ui_state, branches);
        },
    )
}
