//! Drives a paged feed through its states without a window and logs the
//! node tree after every step.
//!
//! Usage: `showcase [defaults.json]`, where the optional file holds
//! `AnimationDefaults`, e.g. `{"duration_millis": 300}`.

use std::path::Path;
use std::{env, fs};

use animated_composables::{
    AnimatedBox, AnimatedLayoutSpec, AnimatedLazyPullToRefresh, AnimationDefaults, LazyPagingItems,
    LoadState, LoadType, PagedListSlots, PagedListSpec, ProvideAnimationDefaults, UiState,
};
use anyhow::{Context, Result};
use composables_runtime::{location_key, Composition, Key, MemoryApplier, MutableState, RuntimeError};
use composables_ui::{composable, BoxSpec, Modifier, Text};

const FRAME_NANOS: u64 = 16_000_000;
const MAX_FRAMES: usize = 10_000;
const PAGE_SIZE: usize = 5;

type Feed = UiState<LazyPagingItems<String>>;

#[composable]
fn showcase_content(defaults: AnimationDefaults, feed: &Feed) {
    ProvideAnimationDefaults(defaults, || {
        AnimatedBox(
            Modifier::test_tag("title"),
            AnimatedLayoutSpec::row(),
            BoxSpec::new(),
            |_| {
                Text("Feed", Modifier::empty());
            },
        );
        AnimatedLazyPullToRefresh(
            Modifier::fill_max_size(),
            PagedListSpec::new(),
            feed,
            None,
            || log::info!("pulled to refresh"),
            None,
            PagedListSlots::new()
                .empty(|| {
                    Text("Nothing to show", Modifier::empty());
                })
                .append_error(|message| {
                    Text(format!("Could not load more: {message}"), Modifier::empty());
                }),
            |list, paging| {
                let count = paging.item_count();
                let paging = paging.clone();
                list.items(count, None, Some("entry"), move |_, index| {
                    if let Some(entry) = paging.get(index) {
                        Text(entry, Modifier::empty());
                    }
                });
            },
        );
    });
}

struct Showcase {
    composition: Composition<MemoryApplier>,
    key: Key,
    defaults: AnimationDefaults,
    feed: MutableState<Feed>,
    frame_time_nanos: u64,
}

impl Showcase {
    fn new(defaults: AnimationDefaults) -> Self {
        let composition = Composition::new(MemoryApplier::new());
        let feed = MutableState::with_runtime(UiState::Initial, composition.runtime_handle());
        Self {
            composition,
            key: location_key(file!(), line!(), column!()),
            defaults,
            feed,
            frame_time_nanos: 0,
        }
    }

    fn compose(&mut self) -> Result<(), RuntimeError> {
        let defaults = self.defaults;
        let feed = self.feed.value();
        self.composition
            .render(self.key, || showcase_content(defaults, &feed))
    }

    fn pump(&mut self) -> Result<(), RuntimeError> {
        let handle = self.composition.runtime_handle();
        while handle.has_pending_tasks() || self.composition.needs_recompose() {
            handle.drain_tasks();
            if self.composition.needs_recompose() {
                self.compose()?;
            }
        }
        Ok(())
    }

    fn settle(&mut self) -> Result<(), RuntimeError> {
        self.pump()?;
        let handle = self.composition.runtime_handle();
        for _ in 0..MAX_FRAMES {
            if !handle.has_frame_callbacks() {
                return Ok(());
            }
            self.frame_time_nanos += FRAME_NANOS;
            handle.drain_frame_callbacks(self.frame_time_nanos);
            self.pump()?;
        }
        Err(RuntimeError::Unsettled {
            iterations: MAX_FRAMES,
        })
    }

    fn step(&mut self, label: &str) -> Result<()> {
        self.settle().with_context(|| format!("settling after '{label}'"))?;
        let tree = self
            .composition
            .applier_mut()
            .dump_tree(self.composition.roots());
        log::info!("{label} at {} ms:\n{tree}", self.frame_time_nanos / 1_000_000);
        Ok(())
    }
}

fn page(start: usize) -> Vec<String> {
    (start..start + PAGE_SIZE).map(|index| format!("Entry {index}")).collect()
}

fn load_defaults(path: &Path) -> Result<AnimationDefaults> {
    let json = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
}

fn main() -> Result<()> {
    env_logger::init();

    let defaults = match env::args_os().nth(1) {
        Some(path) => load_defaults(Path::new(&path))?,
        None => AnimationDefaults::default(),
    };
    log::info!("animation defaults: {defaults:?}");

    let mut showcase = Showcase::new(defaults);
    showcase.compose()?;
    showcase.step("initial")?;

    showcase.feed.set(UiState::Loading);
    showcase.step("loading")?;

    let paging = LazyPagingItems::new(showcase.composition.runtime_handle());
    showcase.feed.set(UiState::success(paging.clone()));
    showcase.step("first load in flight")?;

    paging.submit(page(0));
    showcase.step("first page")?;

    paging.set_load_state(LoadType::Append, LoadState::Loading);
    showcase.step("appending")?;
    paging.append_page(page(PAGE_SIZE), false);
    showcase.step("second page")?;

    paging.set_load_state(LoadType::Append, LoadState::error("connection reset"));
    showcase.step("append failed")?;

    paging.refresh();
    showcase.step("refreshing")?;
    paging.submit(Vec::new());
    showcase.step("refreshed to empty")?;

    let saved = showcase.composition.save_state()?;
    log::info!("saved state: {}", saved.to_json()?);
    Ok(())
}
