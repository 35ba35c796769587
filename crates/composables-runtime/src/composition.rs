use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use crate::applier::Applier;
use crate::composer::{self, Composer};
use crate::runtime::{Runtime, RuntimeHandle};
use crate::saveable::{SaveableStateRegistry, SavedState};
use crate::{with_group, Key, NodeId, RuntimeError};

/// A slot table, an applier and a runtime bound together.
pub struct Composition<A: Applier + 'static> {
    composer: Rc<RefCell<Composer>>,
    applier: Rc<RefCell<A>>,
    registry: Rc<RefCell<SaveableStateRegistry>>,
    runtime: Runtime,
    roots: Vec<NodeId>,
}

impl<A: Applier + 'static> Composition<A> {
    pub fn new(applier: A) -> Self {
        Self::with_runtime(applier, Runtime::default())
    }

    pub fn with_runtime(applier: A, runtime: Runtime) -> Self {
        let applier = Rc::new(RefCell::new(applier));
        let registry = Rc::new(RefCell::new(SaveableStateRegistry::new()));
        let dyn_applier: Rc<RefCell<dyn Applier>> = applier.clone();
        let composer = Composer::new(dyn_applier, runtime.handle(), Rc::clone(&registry));
        Self {
            composer: Rc::new(RefCell::new(composer)),
            applier,
            registry,
            runtime,
            roots: Vec::new(),
        }
    }

    /// Seeds saveable values. Call before the first pass; values are only
    /// handed out to call sites composed for the first time.
    pub fn restore_state(&mut self, saved: SavedState) {
        log::debug!("restoring {} saved values", saved.len());
        self.registry.borrow_mut().restore(saved);
    }

    pub fn save_state(&self) -> Result<SavedState, RuntimeError> {
        self.registry.borrow().perform_save()
    }

    /// Runs one full pass of `content` under the group `key`, applies node
    /// removals and then runs the pass's side effects.
    pub fn render(&mut self, key: Key, content: impl FnOnce()) -> Result<(), RuntimeError> {
        self.runtime.handle().take_recompose_request();
        self.composer.borrow_mut().begin_pass();
        {
            let _installed = composer::install(Rc::clone(&self.composer));
            with_group(key, content);
        }
        let pass = self.composer.borrow_mut().finish_pass();
        self.roots = pass.roots;

        if !pass.disposed_nodes.is_empty() {
            let mut applier = self.applier.borrow_mut();
            for id in pass.disposed_nodes {
                if let Ok(node) = applier.get_mut(id) {
                    node.unmount();
                    applier.remove(id)?;
                    log::trace!("removed node {id}");
                }
            }
        }

        for effect in pass.side_effects {
            effect();
        }
        Ok(())
    }

    pub fn needs_recompose(&self) -> bool {
        self.runtime.handle().needs_recompose()
    }

    pub fn runtime(&self) -> &Runtime {
        &self.runtime
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.handle()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.roots.first().copied()
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn applier_mut(&self) -> RefMut<'_, A> {
        self.applier.borrow_mut()
    }
}
