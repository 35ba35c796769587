//! Modifiers: an ordered, immutable list of decorations attached to a node.
//!
//! There is no measurement pass in this toolkit, so modifiers are recorded
//! as data. Hosts and tests read them back through [`Modifier::ops`].

#![allow(non_snake_case)]

use std::fmt;
use std::rc::Rc;

use composables_animation::{EnterTransition, ExitTransition, FiniteAnimationSpec};
use composables_ui_graphics::{Alignment, Color, Dp, HorizontalAlignment, PaddingValues, VerticalAlignment};

/// Placement, fade-in and fade-out specs for an item of a lazy list.
#[derive(Clone, Debug, PartialEq)]
pub struct ItemAnimation {
    pub fade_in_spec: Option<FiniteAnimationSpec>,
    pub placement_spec: Option<FiniteAnimationSpec>,
    pub fade_out_spec: Option<FiniteAnimationSpec>,
}

impl Default for ItemAnimation {
    fn default() -> Self {
        Self {
            fade_in_spec: Some(FiniteAnimationSpec::default()),
            placement_spec: Some(FiniteAnimationSpec::default()),
            fade_out_spec: Some(FiniteAnimationSpec::default()),
        }
    }
}

#[derive(Clone, Debug)]
pub enum ModOp {
    Padding(PaddingValues),
    Background(Color),
    Size { width: Dp, height: Dp },
    Height(Dp),
    FillMaxWidth(f32),
    FillMaxHeight(f32),
    BoxAlign(Alignment),
    ColumnAlign(HorizontalAlignment),
    RowAlign(VerticalAlignment),
    VerticalScroll,
    AnimateContentSize(FiniteAnimationSpec),
    AnimateItem(ItemAnimation),
    AnimateEnterExit {
        enter: EnterTransition,
        exit: ExitTransition,
    },
    TestTag(String),
}

#[derive(Clone, Default)]
pub struct Modifier(Rc<Vec<ModOp>>);

impl PartialEq for Modifier {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Modifier {}

impl fmt::Debug for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Modifier").field(&self.0.len()).finish()
    }
}

impl Modifier {
    pub fn empty() -> Self {
        Self::default()
    }

    fn with_op(op: ModOp) -> Self {
        Self(Rc::new(vec![op]))
    }

    fn with_ops(ops: Vec<ModOp>) -> Self {
        Self(Rc::new(ops))
    }

    pub fn padding(all: Dp) -> Self {
        Self::padding_values(PaddingValues::all(all))
    }

    pub fn padding_values(padding: PaddingValues) -> Self {
        Self::with_op(ModOp::Padding(padding))
    }

    pub fn background(color: Color) -> Self {
        Self::with_op(ModOp::Background(color))
    }

    pub fn size(width: Dp, height: Dp) -> Self {
        Self::with_op(ModOp::Size { width, height })
    }

    pub fn height(height: Dp) -> Self {
        Self::with_op(ModOp::Height(height))
    }

    pub fn fill_max_size() -> Self {
        Self::with_ops(vec![ModOp::FillMaxWidth(1.0), ModOp::FillMaxHeight(1.0)])
    }

    pub fn fill_max_width() -> Self {
        Self::fill_max_width_fraction(1.0)
    }

    pub fn fill_max_width_fraction(fraction: f32) -> Self {
        Self::with_op(ModOp::FillMaxWidth(fraction.clamp(0.0, 1.0)))
    }

    pub fn fill_max_height() -> Self {
        Self::with_op(ModOp::FillMaxHeight(1.0))
    }

    pub fn align(alignment: Alignment) -> Self {
        Self::with_op(ModOp::BoxAlign(alignment))
    }

    /// Align content within a Box (BoxScope only).
    pub fn alignInBox(self, alignment: Alignment) -> Self {
        self.then(Self::with_op(ModOp::BoxAlign(alignment)))
    }

    /// Align content horizontally within a Column (ColumnScope only).
    pub fn alignInColumn(self, alignment: HorizontalAlignment) -> Self {
        self.then(Self::with_op(ModOp::ColumnAlign(alignment)))
    }

    /// Align content vertically within a Row (RowScope only).
    pub fn alignInRow(self, alignment: VerticalAlignment) -> Self {
        self.then(Self::with_op(ModOp::RowAlign(alignment)))
    }

    pub fn vertical_scroll() -> Self {
        Self::with_op(ModOp::VerticalScroll)
    }

    pub fn animate_content_size(spec: impl Into<FiniteAnimationSpec>) -> Self {
        Self::with_op(ModOp::AnimateContentSize(spec.into()))
    }

    pub fn animate_item(animation: ItemAnimation) -> Self {
        Self::with_op(ModOp::AnimateItem(animation))
    }

    pub fn animate_enter_exit(enter: EnterTransition, exit: ExitTransition) -> Self {
        Self::with_op(ModOp::AnimateEnterExit { enter, exit })
    }

    pub fn test_tag(tag: impl Into<String>) -> Self {
        Self::with_op(ModOp::TestTag(tag.into()))
    }

    pub fn then(&self, next: Modifier) -> Modifier {
        if self.0.is_empty() {
            return next;
        }
        if next.0.is_empty() {
            return self.clone();
        }
        let mut ops = Vec::with_capacity(self.0.len() + next.0.len());
        ops.extend(self.0.iter().cloned());
        ops.extend(next.0.iter().cloned());
        Self::with_ops(ops)
    }

    pub fn ops(&self) -> &[ModOp] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all padding ops.
    pub fn total_padding(&self) -> PaddingValues {
        self.0.iter().fold(PaddingValues::ZERO, |total, op| match op {
            ModOp::Padding(padding) => total + *padding,
            _ => total,
        })
    }

    pub fn fills_max_size(&self) -> bool {
        let fills = |pick: fn(&ModOp) -> bool| self.0.iter().any(pick);
        fills(|op| matches!(op, ModOp::FillMaxWidth(fraction) if *fraction >= 1.0))
            && fills(|op| matches!(op, ModOp::FillMaxHeight(fraction) if *fraction >= 1.0))
    }

    pub fn is_vertically_scrollable(&self) -> bool {
        self.0.iter().any(|op| matches!(op, ModOp::VerticalScroll))
    }

    pub fn box_alignment(&self) -> Option<Alignment> {
        self.0.iter().rev().find_map(|op| match op {
            ModOp::BoxAlign(alignment) => Some(*alignment),
            _ => None,
        })
    }

    pub fn item_animation(&self) -> Option<&ItemAnimation> {
        self.0.iter().rev().find_map(|op| match op {
            ModOp::AnimateItem(animation) => Some(animation),
            _ => None,
        })
    }

    pub fn content_size_animation(&self) -> Option<&FiniteAnimationSpec> {
        self.0.iter().rev().find_map(|op| match op {
            ModOp::AnimateContentSize(spec) => Some(spec),
            _ => None,
        })
    }

    pub fn enter_exit(&self) -> Option<(&EnterTransition, &ExitTransition)> {
        self.0.iter().rev().find_map(|op| match op {
            ModOp::AnimateEnterExit { enter, exit } => Some((enter, exit)),
            _ => None,
        })
    }

    /// The last tag wins.
    pub fn tag(&self) -> Option<&str> {
        self.0.iter().rev().find_map(|op| match op {
            ModOp::TestTag(tag) => Some(tag.as_str()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn then_concatenates_in_order() {
        let modifier = Modifier::padding(Dp(4.0))
            .then(Modifier::test_tag("first"))
            .then(Modifier::padding(Dp(2.0)))
            .then(Modifier::test_tag("second"));
        assert_eq!(modifier.ops().len(), 4);
        assert_eq!(modifier.tag(), Some("second"));
        assert_eq!(modifier.total_padding(), PaddingValues::all(Dp(6.0)));
    }

    #[test]
    fn then_with_empty_reuses_the_other_side() {
        let tag = Modifier::test_tag("only");
        assert_eq!(Modifier::empty().then(tag.clone()), tag);
        assert_eq!(tag.then(Modifier::empty()), tag);
    }

    #[test]
    fn fill_max_size_needs_both_axes() {
        assert!(Modifier::fill_max_size().fills_max_size());
        assert!(!Modifier::fill_max_width().fills_max_size());
        assert!(Modifier::fill_max_width()
            .then(Modifier::fill_max_height())
            .fills_max_size());
    }
}
