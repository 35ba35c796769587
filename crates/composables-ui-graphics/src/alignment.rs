use crate::geometry::{IntOffset, IntSize};

/// Alignment along the horizontal axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HorizontalAlignment {
    Start,
    CenterHorizontally,
    End,
}

impl HorizontalAlignment {
    /// Offset of an item of `size` inside `space` along this axis.
    pub fn align(self, size: i32, space: i32) -> i32 {
        match self {
            HorizontalAlignment::Start => 0,
            HorizontalAlignment::CenterHorizontally => (space - size) / 2,
            HorizontalAlignment::End => space - size,
        }
    }
}

/// Alignment along the vertical axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum VerticalAlignment {
    Top,
    CenterVertically,
    Bottom,
}

impl VerticalAlignment {
    pub fn align(self, size: i32, space: i32) -> i32 {
        match self {
            VerticalAlignment::Top => 0,
            VerticalAlignment::CenterVertically => (space - size) / 2,
            VerticalAlignment::Bottom => space - size,
        }
    }
}

/// Two-dimensional alignment used by boxes and size transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Alignment {
    pub horizontal: HorizontalAlignment,
    pub vertical: VerticalAlignment,
}

impl Alignment {
    pub const TOP_START: Alignment = Alignment::new(HorizontalAlignment::Start, VerticalAlignment::Top);
    pub const TOP_CENTER: Alignment =
        Alignment::new(HorizontalAlignment::CenterHorizontally, VerticalAlignment::Top);
    pub const TOP_END: Alignment = Alignment::new(HorizontalAlignment::End, VerticalAlignment::Top);
    pub const CENTER_START: Alignment =
        Alignment::new(HorizontalAlignment::Start, VerticalAlignment::CenterVertically);
    pub const CENTER: Alignment = Alignment::new(
        HorizontalAlignment::CenterHorizontally,
        VerticalAlignment::CenterVertically,
    );
    pub const CENTER_END: Alignment =
        Alignment::new(HorizontalAlignment::End, VerticalAlignment::CenterVertically);
    pub const BOTTOM_START: Alignment =
        Alignment::new(HorizontalAlignment::Start, VerticalAlignment::Bottom);
    pub const BOTTOM_CENTER: Alignment =
        Alignment::new(HorizontalAlignment::CenterHorizontally, VerticalAlignment::Bottom);
    pub const BOTTOM_END: Alignment = Alignment::new(HorizontalAlignment::End, VerticalAlignment::Bottom);

    pub const fn new(horizontal: HorizontalAlignment, vertical: VerticalAlignment) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    pub fn align(&self, size: IntSize, space: IntSize) -> IntOffset {
        IntOffset::new(
            self.horizontal.align(size.width, space.width),
            self.vertical.align(size.height, space.height),
        )
    }
}

impl Default for Alignment {
    fn default() -> Self {
        Alignment::TOP_START
    }
}

/// Arrangement of children along a row or column's main axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LinearArrangement {
    Start,
    End,
    Center,
    SpaceBetween,
    SpaceAround,
    SpaceEvenly,
    SpacedBy(f32),
}

impl LinearArrangement {
    /// Column-flavored alias for [`LinearArrangement::Start`].
    pub const TOP: LinearArrangement = LinearArrangement::Start;
    pub const BOTTOM: LinearArrangement = LinearArrangement::End;

    pub fn spaced_by(spacing: f32) -> Self {
        Self::SpacedBy(spacing)
    }
}

impl Default for LinearArrangement {
    fn default() -> Self {
        LinearArrangement::Start
    }
}
