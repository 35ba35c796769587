//! Widgets built on the composables runtime: layouts, text, visibility and
//! content animations, lazy lists, pull-to-refresh and the scaffold.

pub mod animation;
mod modifier;
pub mod widgets;

pub use composables_macros::composable;
pub use composables_runtime::{Composition, Key, MemoryApplier, NodeId};
pub use composables_ui_graphics::{
    Alignment, Color, Density, Dp, HorizontalAlignment, IntOffset, IntSize, LinearArrangement,
    PaddingValues, VerticalAlignment,
};

pub use animation::*;
pub use modifier::{ItemAnimation, ModOp, Modifier};
pub use widgets::*;

pub mod prelude {
    pub use crate::animation::{AnimatedContent, AnimatedVisibility, AnimatedVisibilityScope};
    pub use crate::modifier::Modifier;
    pub use crate::widgets::{
        rememberPullToRefreshState, Box, BoxScope, BoxSpec, CircularProgressIndicator, Column,
        ColumnScope, ColumnSpec, FabPosition, ItemKey, LazyColumn, LazyColumnSpec, LazyItemScope,
        LazyListScope, PullToRefreshBox, PullToRefreshDefaults, PullToRefreshState, Row, RowScope,
        RowSpec, Scaffold, ScaffoldSpec, Text,
    };
    pub use composables_ui_graphics::prelude::*;
}
