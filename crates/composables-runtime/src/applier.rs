use std::any::Any;
use std::fmt::Write as _;

use crate::{NodeError, NodeId};

/// Gives trait objects access to their concrete type.
pub trait AsAny {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

pub trait Node: AsAny + 'static {
    fn mount(&mut self) {}
    fn update(&mut self) {}
    fn unmount(&mut self) {}
    fn update_children(&mut self, _children: &[NodeId]) {}
    fn children(&self) -> Vec<NodeId> {
        Vec::new()
    }

    /// One-line description used by tree dumps.
    fn describe(&self) -> String {
        short_type_name(std::any::type_name::<Self>()).to_string()
    }

    /// Tag attached by the node's modifier, for lookups in tests and tools.
    fn test_tag(&self) -> Option<&str> {
        None
    }
}

impl dyn Node {
    pub fn downcast_ref<N: Node>(&self) -> Option<&N> {
        self.as_any().downcast_ref::<N>()
    }

    pub fn downcast_mut<N: Node>(&mut self) -> Option<&mut N> {
        self.as_any_mut().downcast_mut::<N>()
    }

    pub fn is<N: Node>(&self) -> bool {
        self.as_any().is::<N>()
    }
}

fn short_type_name(name: &str) -> &str {
    let base = name.split('<').next().unwrap_or(name);
    base.rsplit("::").next().unwrap_or(base)
}

pub trait Applier {
    fn create(&mut self, node: Box<dyn Node>) -> NodeId;
    fn get(&self, id: NodeId) -> Result<&dyn Node, NodeError>;
    fn get_mut(&mut self, id: NodeId) -> Result<&mut dyn Node, NodeError>;
    fn remove(&mut self, id: NodeId) -> Result<(), NodeError>;
}

/// Arena of nodes kept entirely in memory. Used by headless hosts and tests.
#[derive(Default)]
pub struct MemoryApplier {
    nodes: Vec<Option<Box<dyn Node>>>,
}

impl MemoryApplier {
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub fn with_node<N: Node, R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut N) -> R,
    ) -> Result<R, NodeError> {
        let node = self.get_mut(id)?;
        let typed = node.downcast_mut::<N>().ok_or(NodeError::TypeMismatch {
            id,
            expected: std::any::type_name::<N>(),
        })?;
        Ok(f(typed))
    }

    pub fn node<N: Node>(&self, id: NodeId) -> Result<&N, NodeError> {
        self.get(id)?.downcast_ref::<N>().ok_or(NodeError::TypeMismatch {
            id,
            expected: std::any::type_name::<N>(),
        })
    }

    pub fn contains(&self, id: NodeId) -> bool {
        matches!(self.nodes.get(id), Some(Some(_)))
    }

    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|node| node.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Depth-first, pre-order walk over the subtrees rooted at `roots`.
    pub fn descendants(&self, roots: &[NodeId]) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack: Vec<NodeId> = roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            let Ok(node) = self.get(id) else { continue };
            order.push(id);
            stack.extend(node.children().into_iter().rev());
        }
        order
    }

    pub fn dump_tree(&self, roots: &[NodeId]) -> String {
        let mut output = String::new();
        if roots.is_empty() {
            output.push_str("(no root)\n");
        }
        for &root in roots {
            self.dump_node(&mut output, root, 0);
        }
        output
    }

    fn dump_node(&self, output: &mut String, id: NodeId, depth: usize) {
        let indent = "  ".repeat(depth);
        match self.get(id) {
            Ok(node) => {
                let _ = match node.test_tag() {
                    Some(tag) => writeln!(output, "{indent}[{id}] {} #{tag}", node.describe()),
                    None => writeln!(output, "{indent}[{id}] {}", node.describe()),
                };
                for child in node.children() {
                    self.dump_node(output, child, depth + 1);
                }
            }
            Err(_) => {
                let _ = writeln!(output, "{indent}[{id}] (missing)");
            }
        }
    }
}

impl Applier for MemoryApplier {
    fn create(&mut self, node: Box<dyn Node>) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(Some(node));
        id
    }

    fn get(&self, id: NodeId) -> Result<&dyn Node, NodeError> {
        self.nodes
            .get(id)
            .and_then(|slot| slot.as_deref())
            .ok_or(NodeError::Missing { id })
    }

    fn get_mut(&mut self, id: NodeId) -> Result<&mut dyn Node, NodeError> {
        match self.nodes.get_mut(id) {
            Some(Some(node)) => Ok(node.as_mut()),
            _ => Err(NodeError::Missing { id }),
        }
    }

    fn remove(&mut self, id: NodeId) -> Result<(), NodeError> {
        let children = self.get(id)?.children();
        for child in children {
            // Children may already be gone when a whole subtree is disposed.
            let _ = self.remove(child);
        }
        if let Some(slot) = self.nodes.get_mut(id) {
            slot.take();
        }
        Ok(())
    }
}
