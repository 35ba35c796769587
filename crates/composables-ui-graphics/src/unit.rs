use std::ops::{Add, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// Density-independent pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Dp(pub f32);

impl Dp {
    pub const ZERO: Dp = Dp(0.0);

    pub fn value(self) -> f32 {
        self.0
    }
}

impl Add for Dp {
    type Output = Dp;

    fn add(self, rhs: Dp) -> Dp {
        Dp(self.0 + rhs.0)
    }
}

impl Sub for Dp {
    type Output = Dp;

    fn sub(self, rhs: Dp) -> Dp {
        Dp(self.0 - rhs.0)
    }
}

impl Neg for Dp {
    type Output = Dp;

    fn neg(self) -> Dp {
        Dp(-self.0)
    }
}

impl Mul<f32> for Dp {
    type Output = Dp;

    fn mul(self, rhs: f32) -> Dp {
        Dp(self.0 * rhs)
    }
}

/// Pixels per dp of the target display.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Density {
    pub density: f32,
}

impl Density {
    pub fn new(density: f32) -> Self {
        Self { density }
    }

    pub fn to_px(&self, dp: Dp) -> f32 {
        dp.0 * self.density
    }

    pub fn round_to_px(&self, dp: Dp) -> i32 {
        self.to_px(dp).round() as i32
    }

    pub fn to_dp(&self, px: f32) -> Dp {
        Dp(px / self.density)
    }
}

impl Default for Density {
    fn default() -> Self {
        Self { density: 1.0 }
    }
}
