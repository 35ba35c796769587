//! Node types for UI widgets

use composables_runtime::{Node, NodeId};
use composables_ui_graphics::Color;
use indexmap::IndexSet;

use super::layout::{BoxSpec, ColumnSpec, RowSpec};
use crate::modifier::Modifier;

pub fn compose_node<N: Node>(init: impl FnOnce() -> N) -> NodeId {
    composables_runtime::emit_node(init)
}

/// Applies `f` to the node emitted as `id`. A failure means the slot table
/// and the applier disagree, which is a bug in the caller.
pub fn update_node<N: Node>(id: NodeId, f: impl FnOnce(&mut N)) {
    if let Err(err) = composables_runtime::with_node_mut(id, f) {
        debug_assert!(
            false,
            "failed to update {} node: {err}",
            std::any::type_name::<N>()
        );
    }
}

/// Emits a node, refreshes it with `update` and composes `content` as its
/// children.
pub fn compose_container<N, R>(
    init: impl FnOnce() -> N,
    update: impl FnOnce(&mut N),
    content: impl FnOnce() -> R,
) -> (NodeId, R)
where
    N: Node,
{
    let id = compose_node(init);
    update_node(id, update);
    composables_runtime::push_parent(id);
    let result = content();
    composables_runtime::pop_parent();
    (id, result)
}

pub fn replace_children(set: &mut IndexSet<NodeId>, children: &[NodeId]) {
    set.clear();
    set.extend(children.iter().copied());
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LayoutPolicy {
    Box(BoxSpec),
    Row(RowSpec),
    Column(ColumnSpec),
}

#[derive(Clone, Debug)]
pub struct LayoutNode {
    pub modifier: Modifier,
    pub policy: LayoutPolicy,
    pub children: IndexSet<NodeId>,
}

impl LayoutNode {
    pub fn new(modifier: Modifier, policy: LayoutPolicy) -> Self {
        Self {
            modifier,
            policy,
            children: IndexSet::new(),
        }
    }
}

impl Node for LayoutNode {
    fn update_children(&mut self, children: &[NodeId]) {
        replace_children(&mut self.children, children);
    }

    fn children(&self) -> Vec<NodeId> {
        self.children.iter().copied().collect()
    }

    fn describe(&self) -> String {
        match self.policy {
            LayoutPolicy::Box(_) => "Box".to_string(),
            LayoutPolicy::Row(_) => "Row".to_string(),
            LayoutPolicy::Column(_) => "Column".to_string(),
        }
    }

    fn test_tag(&self) -> Option<&str> {
        self.modifier.tag()
    }
}

#[derive(Clone, Debug, Default)]
pub struct TextNode {
    pub modifier: Modifier,
    pub text: String,
}

impl Node for TextNode {
    fn describe(&self) -> String {
        format!("Text({:?})", self.text)
    }

    fn test_tag(&self) -> Option<&str> {
        self.modifier.tag()
    }
}

#[derive(Clone, Debug, Default)]
pub struct ProgressIndicatorNode {
    pub modifier: Modifier,
    pub color: Color,
}

impl Node for ProgressIndicatorNode {
    fn describe(&self) -> String {
        "CircularProgressIndicator".to_string()
    }

    fn test_tag(&self) -> Option<&str> {
        self.modifier.tag()
    }
}
