#![allow(non_snake_case)]

use std::any::Any;
use std::marker::PhantomData;
use std::rc::Rc;

use crate::composer::{try_with_current_composer, with_current_composer, LocalContext};

/// Value that flows down the composition tree implicitly.
///
/// Declare locals as `static` items; each static is its own local.
///
/// ```ignore
/// static LocalSpacing: CompositionLocal<f32> = CompositionLocal::new(|| 8.0);
/// ```
pub struct CompositionLocal<T: 'static> {
    default: fn() -> T,
    _marker: PhantomData<fn() -> T>,
}

pub struct ProvidedValue {
    key: usize,
    value: Rc<dyn Any>,
}

impl<T: Clone + 'static> CompositionLocal<T> {
    pub const fn new(default: fn() -> T) -> Self {
        Self {
            default,
            _marker: PhantomData,
        }
    }

    fn key(&'static self) -> usize {
        self as *const Self as usize
    }

    pub fn provides(&'static self, value: T) -> ProvidedValue {
        ProvidedValue {
            key: self.key(),
            value: Rc::new(value),
        }
    }

    /// The innermost provided value, or the default when none is provided
    /// (or when called outside of a composition).
    pub fn current(&'static self) -> T {
        try_with_current_composer(|composer| composer.read_local(self.key()))
            .flatten()
            .and_then(|value| value.downcast_ref::<T>().cloned())
            .unwrap_or_else(self.default)
    }
}

pub fn CompositionLocalProvider<R>(
    values: impl IntoIterator<Item = ProvidedValue>,
    content: impl FnOnce() -> R,
) -> R {
    let context: LocalContext = values
        .into_iter()
        .map(|provided| (provided.key, provided.value))
        .collect();
    with_current_composer(|composer| composer.push_locals(context));
    let result = content();
    with_current_composer(|composer| composer.pop_locals());
    result
}
