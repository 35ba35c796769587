//! Text and progress indicator leaves

#![allow(non_snake_case)]

use composables_macros::composable;
use composables_runtime::NodeId;
use composables_ui_graphics::Color;

use super::nodes::{compose_node, update_node, ProgressIndicatorNode, TextNode};
use crate::modifier::Modifier;

#[composable]
pub fn Text(value: impl Into<String>, modifier: Modifier) -> NodeId {
    let current = value.into();
    let id = compose_node(|| TextNode {
        modifier: modifier.clone(),
        text: current.clone(),
    });
    update_node(id, |node: &mut TextNode| {
        if node.text != current {
            node.text = current;
        }
        node.modifier = modifier;
    });
    id
}

/// Indeterminate spinner.
#[composable]
pub fn CircularProgressIndicator(modifier: Modifier, color: Color) -> NodeId {
    let id = compose_node(|| ProgressIndicatorNode {
        modifier: modifier.clone(),
        color,
    });
    update_node(id, |node: &mut ProgressIndicatorNode| {
        node.modifier = modifier;
        node.color = color;
    });
    id
}
