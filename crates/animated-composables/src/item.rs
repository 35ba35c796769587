use composables_ui::{ItemKey, LazyItemScope, LazyListScope, Modifier};

use crate::always_enter::AnimateAlwaysEnter;
use crate::layout::AnimatedLayoutSpec;

/// Lazy list items that enter like the animated layouts.
pub trait AnimatedLazyListScope<'a> {
    /// Adds an item whose content enters once it is first composed. The
    /// flag is saved per item key, so restored items do not replay.
    fn AnimatedItem(
        &mut self,
        key: Option<ItemKey>,
        content_type: Option<&'static str>,
        spec: AnimatedLayoutSpec,
        content: impl FnOnce(&LazyItemScope) + 'a,
    );
}

impl<'a> AnimatedLazyListScope<'a> for LazyListScope<'a> {
    fn AnimatedItem(
        &mut self,
        key: Option<ItemKey>,
        content_type: Option<&'static str>,
        spec: AnimatedLayoutSpec,
        content: impl FnOnce(&LazyItemScope) + 'a,
    ) {
        self.item(key, content_type, move |item| {
            AnimateAlwaysEnter(Modifier::empty(), spec.always_enter_spec(), None, |_| content(item));
        });
    }
}
