use std::fmt;
use std::rc::Rc;

use composables_ui_graphics::IntSize;

use crate::spec::{FiniteAnimationSpec, KeyframesSpec, Lerp};
use crate::transition::{EnterTransition, ExitTransition};

/// Spec for the container size while content is replaced.
#[derive(Debug, Clone, PartialEq)]
pub enum SizeAnimationSpec {
    Finite(FiniteAnimationSpec),
    Keyframes(KeyframesSpec<IntSize>),
}

impl SizeAnimationSpec {
    pub fn total_duration_millis(&self) -> u64 {
        match self {
            SizeAnimationSpec::Finite(spec) => spec.total_duration_millis(),
            SizeAnimationSpec::Keyframes(spec) => spec.total_duration_millis(),
        }
    }

    pub fn value_at(&self, initial: IntSize, target: IntSize, play_time_millis: u64) -> IntSize {
        match self {
            SizeAnimationSpec::Finite(spec) => initial.lerp(&target, spec.fraction_at(play_time_millis)),
            SizeAnimationSpec::Keyframes(spec) => spec.value_at(&initial, &target, play_time_millis),
        }
    }
}

impl From<FiniteAnimationSpec> for SizeAnimationSpec {
    fn from(spec: FiniteAnimationSpec) -> Self {
        SizeAnimationSpec::Finite(spec)
    }
}

impl From<KeyframesSpec<IntSize>> for SizeAnimationSpec {
    fn from(spec: KeyframesSpec<IntSize>) -> Self {
        SizeAnimationSpec::Keyframes(spec)
    }
}

/// How the container bounds move from the initial to the target content size.
#[derive(Clone)]
pub struct SizeTransform {
    pub clip: bool,
    spec: Rc<dyn Fn(IntSize, IntSize) -> SizeAnimationSpec>,
}

impl SizeTransform {
    pub fn new(clip: bool, spec: impl Fn(IntSize, IntSize) -> SizeAnimationSpec + 'static) -> Self {
        Self {
            clip,
            spec: Rc::new(spec),
        }
    }

    pub fn spec_for(&self, initial: IntSize, target: IntSize) -> SizeAnimationSpec {
        (self.spec)(initial, target)
    }
}

impl Default for SizeTransform {
    fn default() -> Self {
        SizeTransform::new(true, |_, _| SizeAnimationSpec::Finite(FiniteAnimationSpec::default()))
    }
}

impl fmt::Debug for SizeTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SizeTransform")
            .field("clip", &self.clip)
            .finish_non_exhaustive()
    }
}

/// Enter transition for the incoming content paired with the exit transition
/// for the outgoing one.
#[derive(Debug, Clone)]
pub struct ContentTransform {
    pub target_content_enter: EnterTransition,
    pub initial_content_exit: ExitTransition,
    pub target_content_z_index: f32,
    pub size_transform: Option<SizeTransform>,
}

impl ContentTransform {
    pub fn new(target_content_enter: EnterTransition, initial_content_exit: ExitTransition) -> Self {
        Self {
            target_content_enter,
            initial_content_exit,
            target_content_z_index: 0.0,
            size_transform: Some(SizeTransform::default()),
        }
    }

    pub fn using(mut self, size_transform: SizeTransform) -> Self {
        self.size_transform = Some(size_transform);
        self
    }

    pub fn without_size_transform(mut self) -> Self {
        self.size_transform = None;
        self
    }

    pub fn with_target_z_index(mut self, z_index: f32) -> Self {
        self.target_content_z_index = z_index;
        self
    }

    /// Time until both the incoming and outgoing content have settled.
    /// The size transform is not included; it is driven by measured sizes.
    pub fn duration_millis(&self) -> u64 {
        self.target_content_enter
            .duration_millis()
            .max(self.initial_content_exit.duration_millis())
    }
}

impl EnterTransition {
    pub fn together_with(self, exit: ExitTransition) -> ContentTransform {
        ContentTransform::new(self, exit)
    }
}
