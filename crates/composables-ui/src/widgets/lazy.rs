//! LazyColumn. Items are composed eagerly; there is no viewport.

#![allow(non_snake_case)]

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use composables_macros::composable;
use composables_runtime::collections::map::HashSet;
use composables_runtime::{with_key, Node, NodeId};
use composables_ui_graphics::{HorizontalAlignment, LinearArrangement, PaddingValues};
use indexmap::IndexSet;

use super::nodes::{compose_container, replace_children};
use crate::modifier::{ItemAnimation, Modifier};

/// Stable identity of a lazy list item.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum ItemKey {
    /// Position-derived key, used when the caller supplies none.
    Index(usize),
    Int(i64),
    Str(String),
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemKey::Index(index) => write!(f, "#{index}"),
            ItemKey::Int(value) => write!(f, "{value}"),
            ItemKey::Str(value) => f.write_str(value),
        }
    }
}

impl From<&str> for ItemKey {
    fn from(value: &str) -> Self {
        ItemKey::Str(value.to_string())
    }
}

impl From<String> for ItemKey {
    fn from(value: String) -> Self {
        ItemKey::Str(value)
    }
}

impl From<i64> for ItemKey {
    fn from(value: i64) -> Self {
        ItemKey::Int(value)
    }
}

/// Specification for LazyColumn layout behavior.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LazyColumnSpec {
    pub vertical_arrangement: LinearArrangement,
    pub horizontal_alignment: HorizontalAlignment,
    pub content_padding: PaddingValues,
    pub reverse_layout: bool,
}

impl LazyColumnSpec {
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

    pub fn content_padding(mut self, padding: PaddingValues) -> Self {
        self.content_padding = padding;
        self
    }

    pub fn reverse_layout(mut self, reverse: bool) -> Self {
        self.reverse_layout = reverse;
        self
    }
}

impl Default for LazyColumnSpec {
    fn default() -> Self {
        Self {
            vertical_arrangement: LinearArrangement::TOP,
            horizontal_alignment: HorizontalAlignment::Start,
            content_padding: PaddingValues::ZERO,
            reverse_layout: false,
        }
    }
}

/// Receiver for the content of one lazy item.
#[derive(Clone, Debug)]
pub struct LazyItemScope {
    key: ItemKey,
    index: usize,
}

impl LazyItemScope {
    pub fn key(&self) -> &ItemKey {
        &self.key
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// Animates the item's appearance, disappearance and placement changes
    /// with the default specs.
    pub fn animate_item(&self, modifier: Modifier) -> Modifier {
        self.animate_item_with(modifier, ItemAnimation::default())
    }

    pub fn animate_item_with(&self, modifier: Modifier, animation: ItemAnimation) -> Modifier {
        modifier.then(Modifier::animate_item(animation))
    }
}

type ItemContent<'a> = Box<dyn FnOnce(&LazyItemScope) + 'a>;

struct LazyItem<'a> {
    key: Option<ItemKey>,
    content_type: Option<&'static str>,
    content: ItemContent<'a>,
}

/// Collects the items of a [`LazyColumn`].
#[derive(Default)]
pub struct LazyListScope<'a> {
    items: Vec<LazyItem<'a>>,
}

impl<'a> LazyListScope<'a> {
    pub fn item(
        &mut self,
        key: Option<ItemKey>,
        content_type: Option<&'static str>,
        content: impl FnOnce(&LazyItemScope) + 'a,
    ) {
        self.items.push(LazyItem {
            key,
            content_type,
            content: Box::new(content),
        });
    }

    /// Adds `count` items. `key` maps an index to its key; `None` keys by
    /// position.
    pub fn items(
        &mut self,
        count: usize,
        key: Option<&dyn Fn(usize) -> ItemKey>,
        content_type: Option<&'static str>,
        item_content: impl FnMut(&LazyItemScope, usize) + 'a,
    ) {
        let shared = Rc::new(RefCell::new(item_content));
        for index in 0..count {
            let shared = Rc::clone(&shared);
            self.items.push(LazyItem {
                key: key.map(|key| key(index)),
                content_type,
                content: Box::new(move |scope: &LazyItemScope| (shared.borrow_mut())(scope, index)),
            });
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug)]
pub struct LazyColumnNode {
    pub modifier: Modifier,
    pub spec: LazyColumnSpec,
    pub item_keys: Vec<ItemKey>,
    pub children: IndexSet<NodeId>,
}

impl Node for LazyColumnNode {
    fn update_children(&mut self, children: &[NodeId]) {
        replace_children(&mut self.children, children);
    }

    fn children(&self) -> Vec<NodeId> {
        self.children.iter().copied().collect()
    }

    fn describe(&self) -> String {
        format!("LazyColumn({} items)", self.item_keys.len())
    }

    fn test_tag(&self) -> Option<&str> {
        self.modifier.tag()
    }
}

#[derive(Debug)]
pub struct LazyItemNode {
    pub key: ItemKey,
    pub content_type: Option<&'static str>,
    pub children: IndexSet<NodeId>,
}

impl Node for LazyItemNode {
    fn update_children(&mut self, children: &[NodeId]) {
        replace_children(&mut self.children, children);
    }

    fn children(&self) -> Vec<NodeId> {
        self.children.iter().copied().collect()
    }

    fn describe(&self) -> String {
        format!("LazyItem({})", self.key)
    }
}

/// Resolves item keys; duplicates are reported and fall back to the
/// item's position so every item keeps its own group.
fn resolve_keys(items: &[LazyItem<'_>]) -> Vec<ItemKey> {
    let mut seen: HashSet<ItemKey> = HashSet::default();
    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let key = item.key.clone().unwrap_or(ItemKey::Index(index));
            if seen.insert(key.clone()) {
                key
            } else {
                log::warn!("duplicate lazy list key {key}; keying item {index} by position");
                ItemKey::Index(index)
            }
        })
        .collect()
}

#[composable]
pub fn LazyColumn<'a>(
    modifier: Modifier,
    spec: LazyColumnSpec,
    content: impl FnOnce(&mut LazyListScope<'a>),
) -> NodeId {
    let mut scope = LazyListScope::default();
    content(&mut scope);
    let keys = resolve_keys(&scope.items);

    let (id, ()) = compose_container(
        || LazyColumnNode {
            modifier: modifier.clone(),
            spec,
            item_keys: keys.clone(),
            children: IndexSet::new(),
        },
        |node: &mut LazyColumnNode| {
            node.modifier = modifier.clone();
            node.spec = spec;
            node.item_keys = keys.clone();
        },
        || {
            for ((index, item), key) in scope.items.into_iter().enumerate().zip(keys.iter()) {
                let LazyItem {
                    content_type,
                    content,
                    ..
                } = item;
                with_key(key, || {
                    compose_container(
                        || LazyItemNode {
                            key: key.clone(),
                            content_type,
                            children: IndexSet::new(),
                        },
                        |node: &mut LazyItemNode| {
                            node.key = key.clone();
                            node.content_type = content_type;
                        },
                        || {
                            content(&LazyItemScope {
                                key: key.clone(),
                                index,
                            })
                        },
                    );
                });
            }
        },
    );
    id
}
