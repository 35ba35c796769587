use composables_runtime::{
    location_key, Applier, Composition, Key, MemoryApplier, Node, NodeError, NodeId, RuntimeError,
    RuntimeHandle, SavedState,
};
use composables_ui::TextNode;

/// Simulated frame interval.
pub const FRAME_INTERVAL_MILLIS: u64 = 16;

const MAX_IDLE_ITERATIONS: usize = 1_000;
const MAX_SETTLE_FRAMES: usize = 10_000;

/// Headless harness for exercising compositions in tests.
///
/// Owns an in-memory applier and a virtual frame clock. Recomposition, the
/// task queue and frame callbacks are driven explicitly, so a test decides
/// exactly when effects run and how far animations have progressed.
pub struct ComposeTestRule {
    composition: Composition<MemoryApplier>,
    content: Option<Box<dyn FnMut()>>,
    root_key: Key,
    frame_time_nanos: u64,
}

impl ComposeTestRule {
    pub fn new() -> Self {
        Self {
            composition: Composition::new(MemoryApplier::new()),
            content: None,
            root_key: location_key(file!(), line!(), column!()),
            frame_time_nanos: 0,
        }
    }

    /// A rule whose first pass sees `saved` as restored state.
    pub fn with_saved_state(saved: SavedState) -> Self {
        let mut rule = Self::new();
        rule.composition.restore_state(saved);
        rule
    }

    /// Installs `content` and performs the first pass. Effects launched by
    /// that pass stay queued until the next [`pump_until_idle`].
    ///
    /// [`pump_until_idle`]: ComposeTestRule::pump_until_idle
    pub fn set_content(&mut self, content: impl FnMut() + 'static) -> Result<(), RuntimeError> {
        self.content = Some(Box::new(content));
        self.render()
    }

    pub fn has_content(&self) -> bool {
        self.content.is_some()
    }

    /// Force a pass with the installed content.
    pub fn recomposition(&mut self) -> Result<(), RuntimeError> {
        self.render()
    }

    /// Runs queued tasks and pending recompositions until neither is left.
    /// Frame callbacks are not dispatched.
    pub fn pump_until_idle(&mut self) -> Result<(), RuntimeError> {
        let handle = self.composition.runtime_handle();
        for _ in 0..MAX_IDLE_ITERATIONS {
            let mut progressed = false;
            if handle.has_pending_tasks() {
                handle.drain_tasks();
                progressed = true;
            }
            if self.composition.needs_recompose() {
                self.render()?;
                progressed = true;
            }
            if !progressed {
                return Ok(());
            }
        }
        Err(RuntimeError::Unsettled {
            iterations: MAX_IDLE_ITERATIONS,
        })
    }

    /// Dispatches one frame at the current virtual time plus `delta_millis`
    /// and pumps until idle.
    pub fn advance_frame(&mut self, delta_millis: u64) -> Result<(), RuntimeError> {
        self.frame_time_nanos += delta_millis * 1_000_000;
        log::trace!("test frame at {} ms", self.frame_time_millis());
        self.composition
            .runtime_handle()
            .drain_frame_callbacks(self.frame_time_nanos);
        self.pump_until_idle()
    }

    /// Pumps, then advances the virtual clock by `millis` in frame-sized
    /// steps.
    pub fn advance_time_by(&mut self, millis: u64) -> Result<(), RuntimeError> {
        self.pump_until_idle()?;
        let mut remaining = millis;
        while remaining > 0 {
            let step = remaining.min(FRAME_INTERVAL_MILLIS);
            self.advance_frame(step)?;
            remaining -= step;
        }
        Ok(())
    }

    /// Dispatches frames until no work is left: no tasks, no pending
    /// recomposition and no frame callbacks.
    pub fn settle_animations(&mut self) -> Result<(), RuntimeError> {
        self.pump_until_idle()?;
        let handle = self.composition.runtime_handle();
        for _ in 0..MAX_SETTLE_FRAMES {
            if !handle.has_frame_callbacks() {
                return Ok(());
            }
            self.advance_frame(FRAME_INTERVAL_MILLIS)?;
        }
        Err(RuntimeError::Unsettled {
            iterations: MAX_SETTLE_FRAMES,
        })
    }

    pub fn frame_time_millis(&self) -> u64 {
        self.frame_time_nanos / 1_000_000
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.composition.runtime_handle()
    }

    pub fn save_state(&self) -> Result<SavedState, RuntimeError> {
        self.composition.save_state()
    }

    pub fn root_id(&self) -> Option<NodeId> {
        self.composition.root()
    }

    pub fn roots(&self) -> Vec<NodeId> {
        self.composition.roots().to_vec()
    }

    pub fn composition(&mut self) -> &mut Composition<MemoryApplier> {
        &mut self.composition
    }

    /// Every node of type `N` reachable from the roots, in tree order.
    pub fn find_nodes<N: Node>(&self) -> Vec<NodeId> {
        let applier = self.composition.applier_mut();
        applier
            .descendants(self.composition.roots())
            .into_iter()
            .filter(|&id| applier.get(id).is_ok_and(|node| node.is::<N>()))
            .collect()
    }

    /// Every reachable node tagged `tag` through its modifier.
    pub fn find_by_tag(&self, tag: &str) -> Vec<NodeId> {
        let applier = self.composition.applier_mut();
        applier
            .descendants(self.composition.roots())
            .into_iter()
            .filter(|&id| applier.get(id).ok().and_then(|node| node.test_tag()) == Some(tag))
            .collect()
    }

    pub fn with_node<N: Node, R>(
        &self,
        id: NodeId,
        f: impl FnOnce(&mut N) -> R,
    ) -> Result<R, NodeError> {
        self.composition.applier_mut().with_node(id, f)
    }

    /// Texts of all reachable text nodes, in tree order.
    pub fn texts(&self) -> Vec<String> {
        self.find_nodes::<TextNode>()
            .into_iter()
            .filter_map(|id| self.with_node(id, |node: &mut TextNode| node.text.clone()).ok())
            .collect()
    }

    pub fn texts_under(&self, root: NodeId) -> Vec<String> {
        let ids = self.composition.applier_mut().descendants(&[root]);
        ids.into_iter()
            .filter_map(|id| self.with_node(id, |node: &mut TextNode| node.text.clone()).ok())
            .collect()
    }

    pub fn dump_tree(&self) -> String {
        self.composition
            .applier_mut()
            .dump_tree(self.composition.roots())
    }

    fn render(&mut self) -> Result<(), RuntimeError> {
        if let Some(content) = self.content.as_mut() {
            self.composition.render(self.root_key, &mut **content)?;
        }
        Ok(())
    }
}

impl Default for ComposeTestRule {
    fn default() -> Self {
        Self::new()
    }
}

pub fn run_test_composition<R>(f: impl FnOnce(&mut ComposeTestRule) -> R) -> R {
    let mut rule = ComposeTestRule::new();
    f(&mut rule)
}
