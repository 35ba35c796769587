//! Scaffold: top bar, bottom bar, snackbar host, floating action button and
//! body slots.

#![allow(non_snake_case)]

use composables_macros::composable;
use composables_runtime::{Node, NodeId};
use composables_ui_graphics::{Color, PaddingValues};
use indexmap::IndexSet;

use super::nodes::{compose_container, replace_children};
use crate::modifier::Modifier;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FabPosition {
    Start,
    Center,
    #[default]
    End,
    /// End aligned, drawn over the bottom bar.
    EndOverlay,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScaffoldSlot {
    TopBar,
    BottomBar,
    SnackbarHost,
    FloatingActionButton,
    Content,
}

/// Specification for Scaffold behavior.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScaffoldSpec {
    pub floating_action_button_position: FabPosition,
    pub container_color: Color,
    pub content_color: Color,
    pub content_window_insets: PaddingValues,
}

impl ScaffoldSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn floating_action_button_position(mut self, position: FabPosition) -> Self {
        self.floating_action_button_position = position;
        self
    }

    pub fn container_color(mut self, color: Color) -> Self {
        self.container_color = color;
        self
    }

    pub fn content_color(mut self, color: Color) -> Self {
        self.content_color = color;
        self
    }

    pub fn content_window_insets(mut self, insets: PaddingValues) -> Self {
        self.content_window_insets = insets;
        self
    }
}

impl Default for ScaffoldSpec {
    fn default() -> Self {
        Self {
            floating_action_button_position: FabPosition::End,
            container_color: Color::WHITE,
            content_color: Color::BLACK,
            content_window_insets: PaddingValues::ZERO,
        }
    }
}

#[derive(Debug)]
pub struct ScaffoldNode {
    pub modifier: Modifier,
    pub spec: ScaffoldSpec,
    pub children: IndexSet<NodeId>,
}

impl Node for ScaffoldNode {
    fn update_children(&mut self, children: &[NodeId]) {
        replace_children(&mut self.children, children);
    }

    fn children(&self) -> Vec<NodeId> {
        self.children.iter().copied().collect()
    }

    fn test_tag(&self) -> Option<&str> {
        self.modifier.tag()
    }
}

#[derive(Debug)]
pub struct ScaffoldSlotNode {
    pub slot: ScaffoldSlot,
    pub children: IndexSet<NodeId>,
}

impl Node for ScaffoldSlotNode {
    fn update_children(&mut self, children: &[NodeId]) {
        replace_children(&mut self.children, children);
    }

    fn children(&self) -> Vec<NodeId> {
        self.children.iter().copied().collect()
    }

    fn describe(&self) -> String {
        format!("ScaffoldSlot({:?})", self.slot)
    }
}

fn Slot<R>(slot: ScaffoldSlot, content: impl FnOnce() -> R) -> R {
    composables_runtime::with_key(&slot, || {
        compose_container(
            || ScaffoldSlotNode {
                slot,
                children: IndexSet::new(),
            },
            |node: &mut ScaffoldSlotNode| node.slot = slot,
            content,
        )
        .1
    })
}

/// Lays out the standard screen slots. `content` receives the padding it
/// should apply so it is not obscured by the bars; without a measure pass
/// that is the window insets.
#[composable]
#[allow(clippy::too_many_arguments)]
pub fn Scaffold(
    modifier: Modifier,
    spec: ScaffoldSpec,
    top_bar: impl FnOnce(),
    bottom_bar: impl FnOnce(),
    snackbar_host: impl FnOnce(),
    floating_action_button: impl FnOnce(),
    content: impl FnOnce(PaddingValues),
) -> NodeId {
    let inner_padding = spec.content_window_insets;
    let (id, ()) = compose_container(
        || ScaffoldNode {
            modifier: modifier.clone(),
            spec,
            children: IndexSet::new(),
        },
        |node: &mut ScaffoldNode| {
            node.modifier = modifier.clone();
            node.spec = spec;
        },
        || {
            Slot(ScaffoldSlot::TopBar, top_bar);
            Slot(ScaffoldSlot::Content, || content(inner_padding));
            Slot(ScaffoldSlot::BottomBar, bottom_bar);
            Slot(ScaffoldSlot::SnackbarHost, snackbar_host);
            Slot(ScaffoldSlot::FloatingActionButton, floating_action_button);
        },
    );
    id
}
