use std::ops::{Add, Neg, Sub};

use crate::unit::Dp;

/// Size in whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntSize {
    pub width: i32,
    pub height: i32,
}

impl IntSize {
    pub const ZERO: IntSize = IntSize {
        width: 0,
        height: 0,
    };

    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }
}

/// Offset in whole pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct IntOffset {
    pub x: i32,
    pub y: i32,
}

impl IntOffset {
    pub const ZERO: IntOffset = IntOffset { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for IntOffset {
    type Output = IntOffset;

    fn add(self, rhs: IntOffset) -> IntOffset {
        IntOffset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for IntOffset {
    type Output = IntOffset;

    fn sub(self, rhs: IntOffset) -> IntOffset {
        IntOffset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for IntOffset {
    type Output = IntOffset;

    fn neg(self) -> IntOffset {
        IntOffset::new(-self.x, -self.y)
    }
}

/// Padding for each edge, in dp.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PaddingValues {
    pub start: Dp,
    pub top: Dp,
    pub end: Dp,
    pub bottom: Dp,
}

impl PaddingValues {
    pub const ZERO: PaddingValues = PaddingValues {
        start: Dp::ZERO,
        top: Dp::ZERO,
        end: Dp::ZERO,
        bottom: Dp::ZERO,
    };

    pub fn all(value: Dp) -> Self {
        Self {
            start: value,
            top: value,
            end: value,
            bottom: value,
        }
    }

    pub fn symmetric(horizontal: Dp, vertical: Dp) -> Self {
        Self {
            start: horizontal,
            top: vertical,
            end: horizontal,
            bottom: vertical,
        }
    }

    pub fn only(start: Dp, top: Dp, end: Dp, bottom: Dp) -> Self {
        Self {
            start,
            top,
            end,
            bottom,
        }
    }

    pub fn top(value: Dp) -> Self {
        Self {
            top: value,
            ..Self::ZERO
        }
    }

    pub fn bottom(value: Dp) -> Self {
        Self {
            bottom: value,
            ..Self::ZERO
        }
    }

    pub fn horizontal_total(&self) -> Dp {
        self.start + self.end
    }

    pub fn vertical_total(&self) -> Dp {
        self.top + self.bottom
    }
}

impl Add for PaddingValues {
    type Output = PaddingValues;

    fn add(self, rhs: PaddingValues) -> PaddingValues {
        PaddingValues {
            start: self.start + rhs.start,
            top: self.top + rhs.top,
            end: self.end + rhs.end,
            bottom: self.bottom + rhs.bottom,
        }
    }
}
