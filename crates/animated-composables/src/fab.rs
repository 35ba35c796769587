use composables_macros::composable;
use composables_runtime::NodeId;
use composables_ui::{AnimatedVisibility, Modifier};

use crate::always_enter::AnimateAlwaysEnter;
use crate::layout::AnimatedLayoutSpec;

/// Floating action button that enters once mounted and then follows
/// `show_button`, using the transitions of `spec` both ways.
#[composable]
pub fn AnimatedFab(
    show_button: bool,
    spec: AnimatedLayoutSpec,
    floating_action_button: impl FnOnce(),
) -> NodeId {
    let (enter, exit) = spec.transitions();
    AnimateAlwaysEnter(Modifier::empty(), spec.always_enter_spec(), None, move |_| {
        AnimatedVisibility(show_button, Modifier::empty(), enter, exit, |_| {
            floating_action_button()
        });
    })
}
