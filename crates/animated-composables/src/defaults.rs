#![allow(non_upper_case_globals)]

use composables_runtime::{CompositionLocal, CompositionLocalProvider};
use serde::{Deserialize, Serialize};

/// Timing the animated layouts fall back to when their spec leaves it open.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationDefaults {
    pub duration_millis: u64,
    pub delay_millis: u64,
}

impl AnimationDefaults {
    pub const DURATION_MILLIS: u64 = 500;

    pub fn new(duration_millis: u64, delay_millis: u64) -> Self {
        Self {
            duration_millis,
            delay_millis,
        }
    }
}

impl Default for AnimationDefaults {
    fn default() -> Self {
        Self::new(Self::DURATION_MILLIS, 0)
    }
}

pub static LocalAnimationDefaults: CompositionLocal<AnimationDefaults> =
    CompositionLocal::new(AnimationDefaults::default);

/// Makes `defaults` the fallback timing for every animated layout composed
/// inside `content`.
pub fn ProvideAnimationDefaults<R>(defaults: AnimationDefaults, content: impl FnOnce() -> R) -> R {
    CompositionLocalProvider([LocalAnimationDefaults.provides(defaults)], content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_keep_their_defaults() {
        let defaults: AnimationDefaults =
            serde_json::from_str(r#"{"delay_millis": 80}"#).expect("defaults json");
        assert_eq!(defaults, AnimationDefaults::new(AnimationDefaults::DURATION_MILLIS, 80));
    }

    #[test]
    fn current_is_the_default_outside_a_composition() {
        assert_eq!(LocalAnimationDefaults.current(), AnimationDefaults::default());
    }
}
