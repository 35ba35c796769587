use composables_ui_graphics::{IntOffset, IntSize};

use crate::easing::Easing;

pub const DEFAULT_DURATION_MILLIS: u64 = 300;

const MAX_SPRING_MILLIS: u64 = 10_000;

/// Types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for f64 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction as f64
    }
}

impl Lerp for i32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        (*self as f32).lerp(&(*target as f32), fraction).round() as i32
    }
}

impl Lerp for IntSize {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        IntSize::new(
            self.width.lerp(&target.width, fraction),
            self.height.lerp(&target.height, fraction),
        )
    }
}

impl Lerp for IntOffset {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        IntOffset::new(self.x.lerp(&target.x, fraction), self.y.lerp(&target.y, fraction))
    }
}

/// Duration-based animation (a tween).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    pub duration_millis: u64,
    pub easing: Easing,
    pub delay_millis: u64,
}

impl AnimationSpec {
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
            delay_millis: 0,
        }
    }

    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }

    pub fn total_duration_millis(&self) -> u64 {
        self.delay_millis + self.duration_millis
    }

    pub fn fraction_at(&self, play_time_millis: u64) -> f32 {
        if play_time_millis < self.delay_millis {
            return 0.0;
        }
        if self.duration_millis == 0 {
            return 1.0;
        }
        let elapsed = (play_time_millis - self.delay_millis) as f32;
        self.easing
            .transform((elapsed / self.duration_millis as f32).min(1.0))
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(DEFAULT_DURATION_MILLIS, Easing::FastOutSlowInEasing)
    }
}

/// `tween(duration, delay)` with the standard easing.
pub fn tween(duration_millis: u64, delay_millis: u64) -> AnimationSpec {
    AnimationSpec::tween(duration_millis, Easing::FastOutSlowInEasing).with_delay(delay_millis)
}

/// Stiffness and damping presets.
#[derive(Debug, Clone, Copy)]
pub struct Spring;

impl Spring {
    pub const STIFFNESS_HIGH: f32 = 10_000.0;
    pub const STIFFNESS_MEDIUM: f32 = 1_500.0;
    pub const STIFFNESS_MEDIUM_LOW: f32 = 400.0;
    pub const STIFFNESS_LOW: f32 = 200.0;
    pub const STIFFNESS_VERY_LOW: f32 = 50.0;

    pub const DAMPING_RATIO_HIGH_BOUNCY: f32 = 0.2;
    pub const DAMPING_RATIO_MEDIUM_BOUNCY: f32 = 0.5;
    pub const DAMPING_RATIO_LOW_BOUNCY: f32 = 0.75;
    pub const DAMPING_RATIO_NO_BOUNCY: f32 = 1.0;

    pub const DEFAULT_VISIBILITY_THRESHOLD: f32 = 0.01;
}

/// Physics-based animation over a unit displacement.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// 1.0 is critically damped; lower values bounce.
    pub damping_ratio: f32,
    pub stiffness: f32,
    /// Remaining displacement, as a fraction of the whole, at which the
    /// spring counts as settled.
    pub visibility_threshold: f32,
}

impl SpringSpec {
    pub fn new(damping_ratio: f32, stiffness: f32) -> Self {
        Self {
            damping_ratio,
            stiffness,
            visibility_threshold: Spring::DEFAULT_VISIBILITY_THRESHOLD,
        }
    }

    pub fn default_spring() -> Self {
        Self::new(Spring::DAMPING_RATIO_NO_BOUNCY, Spring::STIFFNESS_MEDIUM)
    }

    pub fn bouncy() -> Self {
        Self::new(Spring::DAMPING_RATIO_MEDIUM_BOUNCY, Spring::STIFFNESS_MEDIUM)
    }

    pub fn stiff() -> Self {
        Self::new(Spring::DAMPING_RATIO_NO_BOUNCY, Spring::STIFFNESS_HIGH)
    }

    pub fn with_visibility_threshold(mut self, threshold: f32) -> Self {
        self.visibility_threshold = threshold;
        self
    }

    /// Remaining displacement after `seconds`, starting at rest from 1.0.
    fn displacement(&self, seconds: f64) -> f64 {
        let zeta = self.damping_ratio as f64;
        let omega = (self.stiffness as f64).sqrt();
        if zeta < 1.0 {
            let damped = omega * (1.0 - zeta * zeta).sqrt();
            (-zeta * omega * seconds).exp()
                * ((damped * seconds).cos() + (zeta * omega / damped) * (damped * seconds).sin())
        } else if (zeta - 1.0).abs() < 1e-6 {
            (-omega * seconds).exp() * (1.0 + omega * seconds)
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -omega * (zeta - root);
            let r2 = -omega * (zeta + root);
            (r2 * (r1 * seconds).exp() - r1 * (r2 * seconds).exp()) / (r2 - r1)
        }
    }

    /// Progress towards the target; may overshoot 1.0 for bouncy springs.
    pub fn fraction_at(&self, play_time_millis: u64) -> f32 {
        if self.stiffness <= 0.0 {
            return 0.0;
        }
        (1.0 - self.displacement(play_time_millis as f64 / 1000.0)) as f32
    }

    /// Time until the spring stays within its visibility threshold.
    pub fn estimated_duration_millis(&self) -> u64 {
        let zeta = self.damping_ratio as f64;
        let omega = (self.stiffness as f64).sqrt();
        let threshold = (self.visibility_threshold as f64).max(1e-6);
        if omega <= 0.0 || zeta <= 0.0 {
            return MAX_SPRING_MILLIS;
        }
        let millis = if zeta < 1.0 {
            // Bound the oscillation by its decay envelope.
            let seconds = (1.0 / (threshold * (1.0 - zeta * zeta).sqrt())).ln() / (zeta * omega);
            (seconds * 1000.0).ceil().max(0.0) as u64
        } else {
            let mut millis = 0;
            while millis < MAX_SPRING_MILLIS && self.displacement(millis as f64 / 1000.0) > threshold {
                millis += 1;
            }
            millis
        };
        millis.min(MAX_SPRING_MILLIS)
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::default_spring()
    }
}

pub fn spring(damping_ratio: f32, stiffness: f32) -> SpringSpec {
    SpringSpec::new(damping_ratio, stiffness)
}

/// Any animation spec with a known end.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FiniteAnimationSpec {
    Tween(AnimationSpec),
    Spring(SpringSpec),
}

impl FiniteAnimationSpec {
    pub fn total_duration_millis(&self) -> u64 {
        match self {
            FiniteAnimationSpec::Tween(spec) => spec.total_duration_millis(),
            FiniteAnimationSpec::Spring(spec) => spec.estimated_duration_millis(),
        }
    }

    pub fn fraction_at(&self, play_time_millis: u64) -> f32 {
        match self {
            FiniteAnimationSpec::Tween(spec) => spec.fraction_at(play_time_millis),
            FiniteAnimationSpec::Spring(spec) if play_time_millis >= spec.estimated_duration_millis() => 1.0,
            FiniteAnimationSpec::Spring(spec) => spec.fraction_at(play_time_millis),
        }
    }

    pub fn delay_millis(&self) -> u64 {
        match self {
            FiniteAnimationSpec::Tween(spec) => spec.delay_millis,
            FiniteAnimationSpec::Spring(_) => 0,
        }
    }
}

/// The spring visibility and placement transitions use unless told otherwise.
impl Default for FiniteAnimationSpec {
    fn default() -> Self {
        FiniteAnimationSpec::Spring(SpringSpec::new(
            Spring::DAMPING_RATIO_NO_BOUNCY,
            Spring::STIFFNESS_MEDIUM_LOW,
        ))
    }
}

impl From<AnimationSpec> for FiniteAnimationSpec {
    fn from(spec: AnimationSpec) -> Self {
        FiniteAnimationSpec::Tween(spec)
    }
}

impl From<SpringSpec> for FiniteAnimationSpec {
    fn from(spec: SpringSpec) -> Self {
        FiniteAnimationSpec::Spring(spec)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Keyframe<T> {
    pub at_millis: u64,
    pub value: T,
}

/// Piecewise-linear animation through fixed values at fixed times.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyframesSpec<T> {
    pub duration_millis: u64,
    pub delay_millis: u64,
    keyframes: Vec<Keyframe<T>>,
}

impl<T: Lerp + Clone> KeyframesSpec<T> {
    pub fn new(duration_millis: u64) -> Self {
        Self {
            duration_millis,
            delay_millis: 0,
            keyframes: Vec::new(),
        }
    }

    pub fn with_delay(mut self, delay_millis: u64) -> Self {
        self.delay_millis = delay_millis;
        self
    }

    /// Pins `value` at `at_millis`; later calls for the same time win.
    pub fn at(mut self, value: T, at_millis: u64) -> Self {
        let at_millis = at_millis.min(self.duration_millis);
        self.keyframes.retain(|frame| frame.at_millis != at_millis);
        let index = self
            .keyframes
            .partition_point(|frame| frame.at_millis < at_millis);
        self.keyframes.insert(index, Keyframe { at_millis, value });
        self
    }

    pub fn keyframes(&self) -> &[Keyframe<T>] {
        &self.keyframes
    }

    pub fn total_duration_millis(&self) -> u64 {
        self.delay_millis + self.duration_millis
    }

    pub fn value_at(&self, start: &T, end: &T, play_time_millis: u64) -> T {
        let time = play_time_millis
            .saturating_sub(self.delay_millis)
            .min(self.duration_millis);
        let mut previous = (0, start.clone());
        let frames = self
            .keyframes
            .iter()
            .map(|frame| (frame.at_millis, frame.value.clone()))
            .chain(std::iter::once((self.duration_millis, end.clone())));
        for (at, value) in frames {
            if time <= at {
                let span = at - previous.0;
                if span == 0 {
                    return value;
                }
                let fraction = (time - previous.0) as f32 / span as f32;
                return previous.1.lerp(&value, fraction);
            }
            previous = (at, value);
        }
        end.clone()
    }
}
