use std::any::Any;
use std::cell::RefCell;
use std::rc::Rc;

use crate::applier::{Applier, Node};
use crate::collections::map::HashMap;
use crate::owned::Owned;
use crate::runtime::RuntimeHandle;
use crate::saveable::SaveableStateRegistry;
use crate::slot_table::SlotTable;
use crate::{Key, NodeError, NodeId};

thread_local! {
    static CURRENT_COMPOSER: RefCell<Vec<Rc<RefCell<Composer>>>> = const { RefCell::new(Vec::new()) };
}

struct ParentFrame {
    id: NodeId,
    children: Vec<NodeId>,
}

pub(crate) type LocalContext = HashMap<usize, Rc<dyn Any>>;

/// Everything one composition pass needs. Lives as long as its
/// [`Composition`](crate::Composition) and is installed as the current
/// composer while a pass runs.
pub struct Composer {
    slots: SlotTable,
    applier: Rc<RefCell<dyn Applier>>,
    runtime: RuntimeHandle,
    registry: Rc<RefCell<SaveableStateRegistry>>,
    parent_stack: Vec<ParentFrame>,
    roots: Vec<NodeId>,
    side_effects: Vec<Box<dyn FnOnce()>>,
    locals: Vec<LocalContext>,
    disposed_nodes: Vec<NodeId>,
}

pub(crate) struct PassOutput {
    pub(crate) roots: Vec<NodeId>,
    pub(crate) side_effects: Vec<Box<dyn FnOnce()>>,
    pub(crate) disposed_nodes: Vec<NodeId>,
}

impl Composer {
    pub(crate) fn new(
        applier: Rc<RefCell<dyn Applier>>,
        runtime: RuntimeHandle,
        registry: Rc<RefCell<SaveableStateRegistry>>,
    ) -> Self {
        Self {
            slots: SlotTable::new(),
            applier,
            runtime,
            registry,
            parent_stack: Vec::new(),
            roots: Vec::new(),
            side_effects: Vec::new(),
            locals: Vec::new(),
            disposed_nodes: Vec::new(),
        }
    }

    pub(crate) fn begin_pass(&mut self) {
        self.slots.begin_pass();
        self.parent_stack.clear();
        self.roots.clear();
        self.locals.clear();
    }

    pub(crate) fn finish_pass(&mut self) -> PassOutput {
        self.slots.finish_pass(&mut self.disposed_nodes);
        debug_assert!(self.parent_stack.is_empty(), "unbalanced push_parent/pop_parent");
        PassOutput {
            roots: std::mem::take(&mut self.roots),
            side_effects: std::mem::take(&mut self.side_effects),
            disposed_nodes: std::mem::take(&mut self.disposed_nodes),
        }
    }

    pub fn runtime_handle(&self) -> RuntimeHandle {
        self.runtime.clone()
    }

    pub(crate) fn saveable_registry(&self) -> Rc<RefCell<SaveableStateRegistry>> {
        Rc::clone(&self.registry)
    }

    pub fn start_group(&mut self, key: Key) {
        self.slots.start_group(key);
    }

    pub fn end_group(&mut self) {
        self.slots.end_group(&mut self.disposed_nodes);
    }

    pub(crate) fn reuse_value<T: 'static>(&mut self) -> Option<Owned<T>> {
        self.slots.reuse_value::<T>()
    }

    pub(crate) fn store_value<T: 'static>(&mut self, value: Owned<T>) {
        self.slots.store_value(value, &mut self.disposed_nodes);
    }

    pub(crate) fn composite_key(&self) -> u64 {
        self.slots.composite_key()
    }

    pub fn register_side_effect(&mut self, effect: impl FnOnce() + 'static) {
        self.side_effects.push(Box::new(effect));
    }

    pub fn emit_node<N: Node>(&mut self, init: impl FnOnce() -> N) -> NodeId {
        if let Some(id) = self.slots.peek_node() {
            let reused = {
                let mut applier = self.applier.borrow_mut();
                match applier.get_mut(id) {
                    Ok(node) if node.is::<N>() => {
                        node.update();
                        true
                    }
                    _ => false,
                }
            };
            if reused {
                self.slots.skip();
                self.attach_to_parent(id);
                return id;
            }
        }

        let id = {
            let mut applier = self.applier.borrow_mut();
            let id = applier.create(Box::new(init()));
            if let Ok(node) = applier.get_mut(id) {
                node.mount();
            }
            id
        };
        log::trace!("created node {id} ({})", std::any::type_name::<N>());
        self.slots.store_node(id, &mut self.disposed_nodes);
        self.attach_to_parent(id);
        id
    }

    fn attach_to_parent(&mut self, id: NodeId) {
        match self.parent_stack.last_mut() {
            Some(frame) => frame.children.push(id),
            None => self.roots.push(id),
        }
    }

    pub fn with_node_mut<N: Node, R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut N) -> R,
    ) -> Result<R, NodeError> {
        let mut applier = self.applier.borrow_mut();
        let node = applier.get_mut(id)?;
        let typed = node.downcast_mut::<N>().ok_or(NodeError::TypeMismatch {
            id,
            expected: std::any::type_name::<N>(),
        })?;
        Ok(f(typed))
    }

    pub fn push_parent(&mut self, id: NodeId) {
        self.parent_stack.push(ParentFrame {
            id,
            children: Vec::new(),
        });
    }

    pub fn pop_parent(&mut self) {
        let Some(frame) = self.parent_stack.pop() else {
            debug_assert!(false, "pop_parent without push_parent");
            return;
        };
        let mut applier = self.applier.borrow_mut();
        if let Ok(node) = applier.get_mut(frame.id) {
            if node.children() != frame.children {
                node.update_children(&frame.children);
            }
        }
    }

    pub(crate) fn push_locals(&mut self, provided: LocalContext) {
        self.locals.push(provided);
    }

    pub(crate) fn pop_locals(&mut self) {
        self.locals.pop();
    }

    pub(crate) fn read_local(&self, key: usize) -> Option<Rc<dyn Any>> {
        self.locals
            .iter()
            .rev()
            .find_map(|context| context.get(&key).cloned())
    }
}

pub(crate) struct InstalledComposer;

impl Drop for InstalledComposer {
    fn drop(&mut self) {
        CURRENT_COMPOSER.with(|stack| {
            stack.borrow_mut().pop();
        });
    }
}

pub(crate) fn install(composer: Rc<RefCell<Composer>>) -> InstalledComposer {
    CURRENT_COMPOSER.with(|stack| stack.borrow_mut().push(composer));
    InstalledComposer
}

fn current_composer() -> Option<Rc<RefCell<Composer>>> {
    CURRENT_COMPOSER.with(|stack| stack.borrow().last().cloned())
}

/// Runs `f` against the composer of the pass in progress.
///
/// # Panics
///
/// When called outside of a composition, or re-entrantly from inside `f`.
pub fn with_current_composer<R>(f: impl FnOnce(&mut Composer) -> R) -> R {
    let composer = current_composer().expect("composable invoked outside of a composition");
    let mut composer = composer.borrow_mut();
    f(&mut composer)
}

pub fn try_with_current_composer<R>(f: impl FnOnce(&mut Composer) -> R) -> Option<R> {
    let composer = current_composer()?;
    let mut composer = composer.borrow_mut();
    Some(f(&mut composer))
}
