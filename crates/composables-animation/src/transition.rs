use std::fmt;
use std::ops::Add;
use std::rc::Rc;

use composables_ui_graphics::{Alignment, HorizontalAlignment, IntOffset, IntSize, VerticalAlignment};

use crate::spec::{FiniteAnimationSpec, Lerp};

/// Offset of the content relative to its resting place, computed from the
/// content's full size.
#[derive(Clone)]
pub struct SlideOffset(Rc<dyn Fn(IntSize) -> IntOffset>);

impl SlideOffset {
    pub fn new(offset: impl Fn(IntSize) -> IntOffset + 'static) -> Self {
        Self(Rc::new(offset))
    }

    pub fn resolve(&self, full_size: IntSize) -> IntOffset {
        (self.0)(full_size)
    }
}

impl fmt::Debug for SlideOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SlideOffset(..)")
    }
}

/// Clipped size of the content at the start of an expand or the end of a
/// shrink, computed from its full size.
#[derive(Clone)]
pub struct SizeFn(Rc<dyn Fn(IntSize) -> IntSize>);

impl SizeFn {
    pub fn new(size: impl Fn(IntSize) -> IntSize + 'static) -> Self {
        Self(Rc::new(size))
    }

    pub fn resolve(&self, full_size: IntSize) -> IntSize {
        (self.0)(full_size)
    }
}

impl fmt::Debug for SizeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SizeFn(..)")
    }
}

/// Pivot for scale changes, as fractions of the content size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformOrigin {
    pub pivot_fraction_x: f32,
    pub pivot_fraction_y: f32,
}

impl TransformOrigin {
    pub const CENTER: TransformOrigin = TransformOrigin {
        pivot_fraction_x: 0.5,
        pivot_fraction_y: 0.5,
    };
}

/// Alpha the content starts from (enter) or ends at (exit).
#[derive(Debug, Clone)]
pub struct Fade {
    pub alpha: f32,
    pub spec: FiniteAnimationSpec,
}

#[derive(Debug, Clone)]
pub struct Slide {
    pub offset: SlideOffset,
    pub spec: FiniteAnimationSpec,
}

#[derive(Debug, Clone)]
pub struct Scale {
    pub scale: f32,
    pub transform_origin: TransformOrigin,
    pub spec: FiniteAnimationSpec,
}

#[derive(Debug, Clone)]
pub struct ChangeSize {
    pub alignment: Alignment,
    pub size: SizeFn,
    pub clip: bool,
    pub spec: FiniteAnimationSpec,
}

/// One optional component per kind of change.
#[derive(Debug, Clone, Default)]
pub struct TransitionData {
    pub fade: Option<Fade>,
    pub slide: Option<Slide>,
    pub change_size: Option<ChangeSize>,
    pub scale: Option<Scale>,
}

impl TransitionData {
    /// Components already present in `self` take precedence.
    fn merge(self, other: TransitionData) -> TransitionData {
        TransitionData {
            fade: self.fade.or(other.fade),
            slide: self.slide.or(other.slide),
            change_size: self.change_size.or(other.change_size),
            scale: self.scale.or(other.scale),
        }
    }

    fn specs(&self) -> impl Iterator<Item = &FiniteAnimationSpec> {
        self.fade
            .iter()
            .map(|fade| &fade.spec)
            .chain(self.slide.iter().map(|slide| &slide.spec))
            .chain(self.change_size.iter().map(|change| &change.spec))
            .chain(self.scale.iter().map(|scale| &scale.spec))
    }

    fn duration_millis(&self) -> u64 {
        self.specs()
            .map(FiniteAnimationSpec::total_duration_millis)
            .max()
            .unwrap_or(0)
    }

    fn is_empty(&self) -> bool {
        self.specs().next().is_none()
    }
}

/// How content appears. Combine with `+`.
#[derive(Debug, Clone, Default)]
pub struct EnterTransition {
    data: TransitionData,
}

/// How content disappears. Combine with `+`.
#[derive(Debug, Clone, Default)]
pub struct ExitTransition {
    data: TransitionData,
}

macro_rules! transition_accessors {
    ($ty:ty) => {
        impl $ty {
            pub fn none() -> Self {
                Self::default()
            }

            pub fn is_none(&self) -> bool {
                self.data.is_empty()
            }

            pub fn data(&self) -> &TransitionData {
                &self.data
            }

            pub fn fade(&self) -> Option<&Fade> {
                self.data.fade.as_ref()
            }

            pub fn slide(&self) -> Option<&Slide> {
                self.data.slide.as_ref()
            }

            pub fn scale(&self) -> Option<&Scale> {
                self.data.scale.as_ref()
            }

            pub fn change_size(&self) -> Option<&ChangeSize> {
                self.data.change_size.as_ref()
            }

            /// Longest delay plus duration over all components.
            pub fn duration_millis(&self) -> u64 {
                self.data.duration_millis()
            }
        }

        impl Add for $ty {
            type Output = $ty;

            fn add(self, rhs: $ty) -> $ty {
                Self {
                    data: self.data.merge(rhs.data),
                }
            }
        }
    };
}

transition_accessors!(EnterTransition);
transition_accessors!(ExitTransition);

impl EnterTransition {
    pub fn alpha_at(&self, play_time_millis: u64) -> f32 {
        self.fade().map_or(1.0, |fade| {
            fade.alpha.lerp(&1.0, fade.spec.fraction_at(play_time_millis))
        })
    }

    pub fn offset_at(&self, play_time_millis: u64, full_size: IntSize) -> IntOffset {
        self.slide().map_or(IntOffset::ZERO, |slide| {
            slide
                .offset
                .resolve(full_size)
                .lerp(&IntOffset::ZERO, slide.spec.fraction_at(play_time_millis))
        })
    }

    pub fn scale_at(&self, play_time_millis: u64) -> f32 {
        self.scale().map_or(1.0, |scale| {
            scale.scale.lerp(&1.0, scale.spec.fraction_at(play_time_millis))
        })
    }

    pub fn size_at(&self, play_time_millis: u64, full_size: IntSize) -> IntSize {
        self.change_size().map_or(full_size, |change| {
            change
                .size
                .resolve(full_size)
                .lerp(&full_size, change.spec.fraction_at(play_time_millis))
        })
    }
}

impl ExitTransition {
    pub fn alpha_at(&self, play_time_millis: u64) -> f32 {
        self.fade().map_or(1.0, |fade| {
            1.0f32.lerp(&fade.alpha, fade.spec.fraction_at(play_time_millis))
        })
    }

    pub fn offset_at(&self, play_time_millis: u64, full_size: IntSize) -> IntOffset {
        self.slide().map_or(IntOffset::ZERO, |slide| {
            IntOffset::ZERO.lerp(
                &slide.offset.resolve(full_size),
                slide.spec.fraction_at(play_time_millis),
            )
        })
    }

    pub fn scale_at(&self, play_time_millis: u64) -> f32 {
        self.scale().map_or(1.0, |scale| {
            1.0f32.lerp(&scale.scale, scale.spec.fraction_at(play_time_millis))
        })
    }

    pub fn size_at(&self, play_time_millis: u64, full_size: IntSize) -> IntSize {
        self.change_size().map_or(full_size, |change| {
            full_size.lerp(
                &change.size.resolve(full_size),
                change.spec.fraction_at(play_time_millis),
            )
        })
    }
}

fn enter(data: TransitionData) -> EnterTransition {
    EnterTransition { data }
}

fn exit(data: TransitionData) -> ExitTransition {
    ExitTransition { data }
}

pub fn fade_in(spec: impl Into<FiniteAnimationSpec>) -> EnterTransition {
    fade_in_from(0.0, spec)
}

pub fn fade_in_from(initial_alpha: f32, spec: impl Into<FiniteAnimationSpec>) -> EnterTransition {
    enter(TransitionData {
        fade: Some(Fade {
            alpha: initial_alpha,
            spec: spec.into(),
        }),
        ..TransitionData::default()
    })
}

pub fn fade_out(spec: impl Into<FiniteAnimationSpec>) -> ExitTransition {
    fade_out_to(0.0, spec)
}

pub fn fade_out_to(target_alpha: f32, spec: impl Into<FiniteAnimationSpec>) -> ExitTransition {
    exit(TransitionData {
        fade: Some(Fade {
            alpha: target_alpha,
            spec: spec.into(),
        }),
        ..TransitionData::default()
    })
}

pub fn slide_in(
    spec: impl Into<FiniteAnimationSpec>,
    initial_offset: impl Fn(IntSize) -> IntOffset + 'static,
) -> EnterTransition {
    enter(TransitionData {
        slide: Some(Slide {
            offset: SlideOffset::new(initial_offset),
            spec: spec.into(),
        }),
        ..TransitionData::default()
    })
}

pub fn slide_out(
    spec: impl Into<FiniteAnimationSpec>,
    target_offset: impl Fn(IntSize) -> IntOffset + 'static,
) -> ExitTransition {
    exit(TransitionData {
        slide: Some(Slide {
            offset: SlideOffset::new(target_offset),
            spec: spec.into(),
        }),
        ..TransitionData::default()
    })
}

/// Slides in from `initial_offset_x(full_width)`.
pub fn slide_in_horizontally(
    spec: impl Into<FiniteAnimationSpec>,
    initial_offset_x: impl Fn(i32) -> i32 + 'static,
) -> EnterTransition {
    slide_in(spec, move |size| IntOffset::new(initial_offset_x(size.width), 0))
}

/// Slides in from `initial_offset_y(full_height)`.
pub fn slide_in_vertically(
    spec: impl Into<FiniteAnimationSpec>,
    initial_offset_y: impl Fn(i32) -> i32 + 'static,
) -> EnterTransition {
    slide_in(spec, move |size| IntOffset::new(0, initial_offset_y(size.height)))
}

pub fn slide_out_horizontally(
    spec: impl Into<FiniteAnimationSpec>,
    target_offset_x: impl Fn(i32) -> i32 + 'static,
) -> ExitTransition {
    slide_out(spec, move |size| IntOffset::new(target_offset_x(size.width), 0))
}

pub fn slide_out_vertically(
    spec: impl Into<FiniteAnimationSpec>,
    target_offset_y: impl Fn(i32) -> i32 + 'static,
) -> ExitTransition {
    slide_out(spec, move |size| IntOffset::new(0, target_offset_y(size.height)))
}

pub fn scale_in(spec: impl Into<FiniteAnimationSpec>, initial_scale: f32) -> EnterTransition {
    enter(TransitionData {
        scale: Some(Scale {
            scale: initial_scale,
            transform_origin: TransformOrigin::CENTER,
            spec: spec.into(),
        }),
        ..TransitionData::default()
    })
}

pub fn scale_out(spec: impl Into<FiniteAnimationSpec>, target_scale: f32) -> ExitTransition {
    exit(TransitionData {
        scale: Some(Scale {
            scale: target_scale,
            transform_origin: TransformOrigin::CENTER,
            spec: spec.into(),
        }),
        ..TransitionData::default()
    })
}

fn change_size(
    spec: impl Into<FiniteAnimationSpec>,
    alignment: Alignment,
    size: impl Fn(IntSize) -> IntSize + 'static,
) -> TransitionData {
    TransitionData {
        change_size: Some(ChangeSize {
            alignment,
            size: SizeFn::new(size),
            clip: true,
            spec: spec.into(),
        }),
        ..TransitionData::default()
    }
}

/// Grows the clip bounds from nothing, anchored at `expand_from`.
pub fn expand_in(spec: impl Into<FiniteAnimationSpec>, expand_from: Alignment) -> EnterTransition {
    enter(change_size(spec, expand_from, |_| IntSize::ZERO))
}

/// Grows the clip width from zero, anchored at `expand_from`.
pub fn expand_horizontally(
    spec: impl Into<FiniteAnimationSpec>,
    expand_from: HorizontalAlignment,
) -> EnterTransition {
    let alignment = Alignment::new(expand_from, VerticalAlignment::CenterVertically);
    enter(change_size(spec, alignment, |size| IntSize::new(0, size.height)))
}

/// Grows the clip height from zero, anchored at `expand_from`.
pub fn expand_vertically(
    spec: impl Into<FiniteAnimationSpec>,
    expand_from: VerticalAlignment,
) -> EnterTransition {
    let alignment = Alignment::new(HorizontalAlignment::CenterHorizontally, expand_from);
    enter(change_size(spec, alignment, |size| IntSize::new(size.width, 0)))
}

pub fn shrink_out(spec: impl Into<FiniteAnimationSpec>, shrink_towards: Alignment) -> ExitTransition {
    exit(change_size(spec, shrink_towards, |_| IntSize::ZERO))
}

pub fn shrink_horizontally(
    spec: impl Into<FiniteAnimationSpec>,
    shrink_towards: HorizontalAlignment,
) -> ExitTransition {
    let alignment = Alignment::new(shrink_towards, VerticalAlignment::CenterVertically);
    exit(change_size(spec, alignment, |size| IntSize::new(0, size.height)))
}

pub fn shrink_vertically(
    spec: impl Into<FiniteAnimationSpec>,
    shrink_towards: VerticalAlignment,
) -> ExitTransition {
    let alignment = Alignment::new(HorizontalAlignment::CenterHorizontally, shrink_towards);
    exit(change_size(spec, alignment, |size| IntSize::new(size.width, 0)))
}
