//! Units, colors, geometry and alignment data shared by the UI crates.

mod alignment;
mod color;
mod geometry;
mod unit;

pub use alignment::*;
pub use color::*;
pub use geometry::*;
pub use unit::*;

pub mod prelude {
    pub use crate::alignment::{Alignment, HorizontalAlignment, LinearArrangement, VerticalAlignment};
    pub use crate::color::Color;
    pub use crate::geometry::{IntOffset, IntSize, PaddingValues};
    pub use crate::unit::{Density, Dp};
}
