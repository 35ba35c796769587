//! Pull-to-refresh container and its default indicator.
//!
//! There is no gesture input; hosts and tests drive a completed pull through
//! [`PullToRefreshNode::trigger_refresh`].

#![allow(non_snake_case)]

use std::fmt;
use std::rc::Rc;

use composables_macros::composable;
use composables_runtime::{useState, LaunchedEffect, MutableState, Node, NodeId};
use composables_ui_graphics::{Alignment, Color};
use indexmap::IndexSet;

use super::layout::BoxScope;
use super::nodes::{compose_container, replace_children};
use super::text::CircularProgressIndicator;
use crate::modifier::Modifier;

/// How far the indicator has been pulled, as a fraction of the refresh
/// threshold.
#[derive(Clone, PartialEq)]
pub struct PullToRefreshState {
    distance_fraction: MutableState<f32>,
}

impl PullToRefreshState {
    pub fn new(distance_fraction: MutableState<f32>) -> Self {
        Self { distance_fraction }
    }

    pub fn distance_fraction(&self) -> f32 {
        self.distance_fraction.value()
    }

    pub fn animate_to_threshold(&self) {
        self.distance_fraction.set_if_changed(1.0);
    }

    pub fn animate_to_hidden(&self) {
        self.distance_fraction.set_if_changed(0.0);
    }
}

impl fmt::Debug for PullToRefreshState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PullToRefreshState")
            .field("distance_fraction", &self.distance_fraction())
            .finish()
    }
}

pub fn rememberPullToRefreshState() -> PullToRefreshState {
    PullToRefreshState::new(useState(|| 0.0f32))
}

pub struct PullToRefreshNode {
    pub modifier: Modifier,
    pub is_refreshing: bool,
    pub content_alignment: Alignment,
    on_refresh: Rc<dyn Fn()>,
    state: PullToRefreshState,
    pub children: IndexSet<NodeId>,
}

impl PullToRefreshNode {
    /// Acts as if the user pulled past the threshold and released. Returns
    /// whether `on_refresh` was called; it is not while a refresh is
    /// already in flight.
    pub fn trigger_refresh(&self) -> bool {
        if self.is_refreshing {
            return false;
        }
        self.state.animate_to_threshold();
        (self.on_refresh)();
        true
    }

    pub fn state(&self) -> &PullToRefreshState {
        &self.state
    }
}

impl fmt::Debug for PullToRefreshNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PullToRefreshNode")
            .field("is_refreshing", &self.is_refreshing)
            .field("state", &self.state)
            .field("children", &self.children)
            .finish_non_exhaustive()
    }
}

impl Node for PullToRefreshNode {
    fn update_children(&mut self, children: &[NodeId]) {
        replace_children(&mut self.children, children);
    }

    fn children(&self) -> Vec<NodeId> {
        self.children.iter().copied().collect()
    }

    fn describe(&self) -> String {
        format!("PullToRefreshBox(refreshing={})", self.is_refreshing)
    }

    fn test_tag(&self) -> Option<&str> {
        self.modifier.tag()
    }
}

#[derive(Debug)]
pub struct PullToRefreshIndicatorNode {
    pub modifier: Modifier,
    pub is_refreshing: bool,
    pub distance_fraction: f32,
    pub children: IndexSet<NodeId>,
}

impl Node for PullToRefreshIndicatorNode {
    fn update_children(&mut self, children: &[NodeId]) {
        replace_children(&mut self.children, children);
    }

    fn children(&self) -> Vec<NodeId> {
        self.children.iter().copied().collect()
    }

    fn describe(&self) -> String {
        format!(
            "PullToRefreshIndicator(refreshing={}, fraction={:.2})",
            self.is_refreshing, self.distance_fraction
        )
    }

    fn test_tag(&self) -> Option<&str> {
        self.modifier.tag()
    }
}

pub struct PullToRefreshDefaults;

impl PullToRefreshDefaults {
    pub const INDICATOR_COLOR: Color = Color(0.25, 0.32, 0.71, 1.0);

    /// Spinner shown while refreshing, hidden otherwise.
    #[composable]
    pub fn Indicator(modifier: Modifier, state: &PullToRefreshState, is_refreshing: bool) -> NodeId {
        let distance_fraction = state.distance_fraction();
        let (id, ()) = compose_container(
            || PullToRefreshIndicatorNode {
                modifier: modifier.clone(),
                is_refreshing,
                distance_fraction,
                children: IndexSet::new(),
            },
            |node: &mut PullToRefreshIndicatorNode| {
                node.modifier = modifier.clone();
                node.is_refreshing = is_refreshing;
                node.distance_fraction = distance_fraction;
            },
            || {
                if is_refreshing {
                    CircularProgressIndicator(Modifier::empty(), Self::INDICATOR_COLOR);
                }
            },
        );
        id
    }
}

/// Hosts `content` with a pull indicator on top. The indicator follows
/// `is_refreshing`; `on_refresh` runs when a pull completes.
#[composable]
pub fn PullToRefreshBox(
    is_refreshing: bool,
    on_refresh: impl Fn() + 'static,
    modifier: Modifier,
    state: &PullToRefreshState,
    content_alignment: Alignment,
    indicator: impl FnOnce(&PullToRefreshState, bool),
    content: impl FnOnce(&BoxScope),
) -> NodeId {
    let on_refresh: Rc<dyn Fn()> = Rc::new(on_refresh);
    {
        let state = state.clone();
        LaunchedEffect!(is_refreshing, move |_| {
            if is_refreshing {
                state.animate_to_threshold();
            } else {
                state.animate_to_hidden();
            }
        });
    }

    let (id, ()) = compose_container(
        || PullToRefreshNode {
            modifier: modifier.clone(),
            is_refreshing,
            content_alignment,
            on_refresh: Rc::clone(&on_refresh),
            state: state.clone(),
            children: IndexSet::new(),
        },
        |node: &mut PullToRefreshNode| {
            node.modifier = modifier.clone();
            node.is_refreshing = is_refreshing;
            node.content_alignment = content_alignment;
            node.on_refresh = Rc::clone(&on_refresh);
            node.state = state.clone();
        },
        || {
            content(&BoxScope);
            indicator(state, is_refreshing);
        },
    );
    id
}
