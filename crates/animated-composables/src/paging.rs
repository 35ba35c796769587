//! Paged data as the list composables observe it.
//!
//! [`LazyPagingItems`] is the snapshot a paging source publishes into. The
//! source owns fetching, retries and backoff; composables only read the
//! snapshot and forward refresh or retry requests to the source's handlers.

#![allow(non_snake_case)]

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use composables_runtime::{current_runtime_handle, remember, MutableState, RuntimeHandle};
use composables_ui::{ItemKey, LazyItemScope, LazyListScope};

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum LoadState {
    NotLoading { end_of_pagination_reached: bool },
    Loading,
    Error { message: String },
}

impl LoadState {
    pub const fn not_loading() -> Self {
        LoadState::NotLoading {
            end_of_pagination_reached: false,
        }
    }

    pub const fn end_reached() -> Self {
        LoadState::NotLoading {
            end_of_pagination_reached: true,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        LoadState::Error {
            message: message.into(),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn is_not_loading(&self) -> bool {
        matches!(self, LoadState::NotLoading { .. })
    }

    pub fn is_error(&self) -> bool {
        matches!(self, LoadState::Error { .. })
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            LoadState::Error { message } => Some(message),
            _ => None,
        }
    }
}

impl Default for LoadState {
    fn default() -> Self {
        Self::not_loading()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LoadType {
    Refresh,
    Prepend,
    Append,
}

impl LoadType {
    pub const ALL: [LoadType; 3] = [LoadType::Refresh, LoadType::Prepend, LoadType::Append];
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct CombinedLoadStates {
    pub refresh: LoadState,
    pub prepend: LoadState,
    pub append: LoadState,
}

impl CombinedLoadStates {
    pub fn get(&self, load_type: LoadType) -> &LoadState {
        match load_type {
            LoadType::Refresh => &self.refresh,
            LoadType::Prepend => &self.prepend,
            LoadType::Append => &self.append,
        }
    }

    pub fn set(&mut self, load_type: LoadType, state: LoadState) {
        match load_type {
            LoadType::Refresh => self.refresh = state,
            LoadType::Prepend => self.prepend = state,
            LoadType::Append => self.append = state,
        }
    }

    pub fn is_idle(&self) -> bool {
        LoadType::ALL.iter().all(|&load_type| !self.get(load_type).is_loading())
    }

    pub fn has_error(&self) -> bool {
        LoadType::ALL.iter().any(|&load_type| self.get(load_type).is_error())
    }
}

struct Snapshot<T> {
    items: Vec<T>,
    load_states: CombinedLoadStates,
}

type Handler = Rc<dyn Fn()>;

#[derive(Default)]
struct SourceHandlers {
    refresh: Option<Handler>,
    retry: Option<Handler>,
}

/// Observable snapshot of a paged list. Clones share the same snapshot;
/// every change requests a recomposition.
pub struct LazyPagingItems<T> {
    snapshot: MutableState<Snapshot<T>>,
    handlers: Rc<RefCell<SourceHandlers>>,
}

impl<T> Clone for LazyPagingItems<T> {
    fn clone(&self) -> Self {
        Self {
            snapshot: self.snapshot.clone(),
            handlers: Rc::clone(&self.handlers),
        }
    }
}

impl<T> PartialEq for LazyPagingItems<T> {
    fn eq(&self, other: &Self) -> bool {
        self.snapshot == other.snapshot
    }
}

impl<T> fmt::Debug for LazyPagingItems<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.snapshot.with(|snapshot| {
            f.debug_struct("LazyPagingItems")
                .field("item_count", &snapshot.items.len())
                .field("load_states", &snapshot.load_states)
                .finish()
        })
    }
}

impl<T> LazyPagingItems<T> {
    /// An empty snapshot whose first load is in flight.
    pub fn new(runtime: RuntimeHandle) -> Self {
        let load_states = CombinedLoadStates {
            refresh: LoadState::Loading,
            ..CombinedLoadStates::default()
        };
        Self {
            snapshot: MutableState::with_runtime(
                Snapshot {
                    items: Vec::new(),
                    load_states,
                },
                runtime,
            ),
            handlers: Rc::default(),
        }
    }

    /// Called by [`refresh`](Self::refresh) after the refresh state turns
    /// to loading.
    pub fn with_refresh_handler(self, handler: impl Fn() + 'static) -> Self {
        self.handlers.borrow_mut().refresh = Some(Rc::new(handler));
        self
    }

    /// Called by [`retry`](Self::retry) after failed loads turn to loading.
    pub fn with_retry_handler(self, handler: impl Fn() + 'static) -> Self {
        self.handlers.borrow_mut().retry = Some(Rc::new(handler));
        self
    }

    pub fn item_count(&self) -> usize {
        self.snapshot.with(|snapshot| snapshot.items.len())
    }

    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    pub fn load_state(&self) -> CombinedLoadStates {
        self.snapshot.with(|snapshot| snapshot.load_states.clone())
    }

    /// Replaces the whole list; the refresh that produced it has finished.
    pub fn submit(&self, items: Vec<T>) {
        self.snapshot.update(|snapshot| {
            snapshot.items = items;
            snapshot.load_states.refresh = LoadState::not_loading();
        });
    }

    pub fn append_page(&self, page: Vec<T>, end_of_pagination_reached: bool) {
        self.snapshot.update(|snapshot| {
            snapshot.items.extend(page);
            snapshot.load_states.append = LoadState::NotLoading {
                end_of_pagination_reached,
            };
        });
    }

    pub fn prepend_page(&self, page: Vec<T>, end_of_pagination_reached: bool) {
        self.snapshot.update(|snapshot| {
            snapshot.items.splice(0..0, page);
            snapshot.load_states.prepend = LoadState::NotLoading {
                end_of_pagination_reached,
            };
        });
    }

    pub fn set_load_state(&self, load_type: LoadType, state: LoadState) {
        let changed = self.snapshot.with(|snapshot| *snapshot.load_states.get(load_type) != state);
        if changed {
            log::trace!("{load_type:?} load state -> {state:?}");
            self.snapshot
                .update(|snapshot| snapshot.load_states.set(load_type, state));
        }
    }

    /// Marks a refresh in flight and asks the source to reload.
    pub fn refresh(&self) {
        self.set_load_state(LoadType::Refresh, LoadState::Loading);
        let handler = self.handlers.borrow().refresh.clone();
        if let Some(handler) = handler {
            handler();
        }
    }

    /// Marks every failed load as loading again and asks the source to
    /// retry them. Does nothing when no load has failed.
    pub fn retry(&self) {
        let failed: Vec<LoadType> = self.snapshot.with(|snapshot| {
            LoadType::ALL
                .into_iter()
                .filter(|&load_type| snapshot.load_states.get(load_type).is_error())
                .collect()
        });
        if failed.is_empty() {
            return;
        }
        for load_type in failed {
            self.set_load_state(load_type, LoadState::Loading);
        }
        let handler = self.handlers.borrow().retry.clone();
        if let Some(handler) = handler {
            handler();
        }
    }
}

impl<T: Clone> LazyPagingItems<T> {
    pub fn get(&self, index: usize) -> Option<T> {
        self.snapshot.with(|snapshot| snapshot.items.get(index).cloned())
    }

    pub fn items(&self) -> Vec<T> {
        self.snapshot.with(|snapshot| snapshot.items.clone())
    }
}

/// [`LazyPagingItems`] remembered at this call site.
pub fn rememberLazyPagingItems<T: 'static>() -> LazyPagingItems<T> {
    remember(|| LazyPagingItems::new(current_runtime_handle())).with(Clone::clone)
}

/// Coarse phase of a paged list, derived from what the source reports.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PagedListPhase {
    /// Not composed yet.
    Initial,
    /// A full (re)load is in flight, or the first page is still on its way.
    LoadingFull,
    HasItems,
    /// The load finished without items.
    Empty,
}

impl PagedListPhase {
    pub fn observe(item_count: usize, load_states: &CombinedLoadStates) -> Self {
        if load_states.refresh.is_loading() {
            PagedListPhase::LoadingFull
        } else if item_count > 0 {
            PagedListPhase::HasItems
        } else if load_states.append.is_not_loading() {
            PagedListPhase::Empty
        } else {
            PagedListPhase::LoadingFull
        }
    }
}

/// Adds a `loading_<suffix>` item while `load_state` is loading or an
/// `error_<suffix>` item when it failed. Nothing is added otherwise.
pub fn paging_load_state_item<'a>(
    scope: &mut LazyListScope<'a>,
    load_state: &LoadState,
    key_suffix: &str,
    loading: impl FnOnce(&LazyItemScope) + 'a,
    error: impl FnOnce(&LazyItemScope, &str) + 'a,
) {
    match load_state {
        LoadState::Loading => {
            scope.item(Some(ItemKey::from(format!("loading_{key_suffix}"))), None, loading);
        }
        LoadState::Error { message } => {
            let message = message.clone();
            scope.item(
                Some(ItemKey::from(format!("error_{key_suffix}"))),
                None,
                move |item| error(item, &message),
            );
        }
        LoadState::NotLoading { .. } => {}
    }
}
