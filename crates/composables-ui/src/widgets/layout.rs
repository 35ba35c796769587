//! Box, Row and Column

#![allow(non_snake_case)]

use composables_macros::composable;
use composables_runtime::NodeId;
use composables_ui_graphics::{Alignment, HorizontalAlignment, LinearArrangement, VerticalAlignment};

use super::nodes::{compose_container, LayoutNode, LayoutPolicy};
use crate::modifier::Modifier;

/// Specification for Box layout behavior.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoxSpec {
    pub content_alignment: Alignment,
    pub propagate_min_constraints: bool,
}

impl BoxSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn content_alignment(mut self, alignment: Alignment) -> Self {
        self.content_alignment = alignment;
        self
    }

    pub fn propagate_min_constraints(mut self, propagate: bool) -> Self {
        self.propagate_min_constraints = propagate;
        self
    }
}

impl Default for BoxSpec {
    fn default() -> Self {
        Self {
            content_alignment: Alignment::TOP_START,
            propagate_min_constraints: false,
        }
    }
}

/// Specification for Row layout behavior.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RowSpec {
    pub horizontal_arrangement: LinearArrangement,
    pub vertical_alignment: VerticalAlignment,
}

impl RowSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn horizontal_arrangement(mut self, arrangement: LinearArrangement) -> Self {
        self.horizontal_arrangement = arrangement;
        self
    }

    pub fn vertical_alignment(mut self, alignment: VerticalAlignment) -> Self {
        self.vertical_alignment = alignment;
        self
    }
}

impl Default for RowSpec {
    fn default() -> Self {
        Self {
            horizontal_arrangement: LinearArrangement::Start,
            vertical_alignment: VerticalAlignment::Top,
        }
    }
}

/// Specification for Column layout behavior.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColumnSpec {
    pub vertical_arrangement: LinearArrangement,
    pub horizontal_alignment: HorizontalAlignment,
}

impl ColumnSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertical_arrangement(mut self, arrangement: LinearArrangement) -> Self {
        self.vertical_arrangement = arrangement;
        self
    }

    pub fn horizontal_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.horizontal_alignment = alignment;
        self
    }
}

impl Default for ColumnSpec {
    fn default() -> Self {
        Self {
            vertical_arrangement: LinearArrangement::TOP,
            horizontal_alignment: HorizontalAlignment::Start,
        }
    }
}

/// Receiver for the content of a [`Box`].
#[derive(Clone, Copy, Debug, Default)]
pub struct BoxScope;

impl BoxScope {
    pub fn align(&self, modifier: Modifier, alignment: Alignment) -> Modifier {
        modifier.alignInBox(alignment)
    }
}

/// Receiver for the content of a [`Row`].
#[derive(Clone, Copy, Debug, Default)]
pub struct RowScope;

impl RowScope {
    pub fn align(&self, modifier: Modifier, alignment: VerticalAlignment) -> Modifier {
        modifier.alignInRow(alignment)
    }
}

/// Receiver for the content of a [`Column`].
#[derive(Clone, Copy, Debug, Default)]
pub struct ColumnScope;

impl ColumnScope {
    pub fn align(&self, modifier: Modifier, alignment: HorizontalAlignment) -> Modifier {
        modifier.alignInColumn(alignment)
    }
}

/// Emits a [`LayoutNode`] with `policy` and composes `content` into it.
#[composable]
pub fn Layout(modifier: Modifier, policy: LayoutPolicy, content: impl FnOnce()) -> NodeId {
    let (id, ()) = compose_container(
        || LayoutNode::new(modifier.clone(), policy),
        |node: &mut LayoutNode| {
            node.modifier = modifier.clone();
            node.policy = policy;
        },
        content,
    );
    id
}

#[composable]
pub fn Box(modifier: Modifier, spec: BoxSpec, content: impl FnOnce(&BoxScope)) -> NodeId {
    Layout(modifier, LayoutPolicy::Box(spec), || content(&BoxScope))
}

#[composable]
pub fn Row(modifier: Modifier, spec: RowSpec, content: impl FnOnce(&RowScope)) -> NodeId {
    Layout(modifier, LayoutPolicy::Row(spec), || content(&RowScope))
}

#[composable]
pub fn Column(modifier: Modifier, spec: ColumnSpec, content: impl FnOnce(&ColumnScope)) -> NodeId {
    Layout(modifier, LayoutPolicy::Column(spec), || content(&ColumnScope))
}
