use composables_animation::ContentTransform;
use composables_macros::composable;
use composables_runtime::NodeId;
use composables_ui::{AnimatedContent, Modifier};
use composables_ui_graphics::Alignment;

use crate::presets::fade_animation;
use crate::ui_state::{ErrorState, Success, UiState, UiStateKind};

#[derive(Clone, Debug)]
pub struct StatefulContainerSpec {
    pub switch_transition: ContentTransform,
    pub content_alignment: Alignment,
}

impl StatefulContainerSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn switch_transition(mut self, transition: ContentTransform) -> Self {
        self.switch_transition = transition;
        self
    }

    pub fn content_alignment(mut self, alignment: Alignment) -> Self {
        self.content_alignment = alignment;
        self
    }
}

impl Default for StatefulContainerSpec {
    fn default() -> Self {
        Self {
            switch_transition: fade_animation(),
            content_alignment: Alignment::TOP_START,
        }
    }
}

type Branch<'a> = Box<dyn FnMut() + 'a>;

/// Content for each [`UiState`] variant. Only the success branch is
/// required; the others default to nothing.
pub struct StateBranches<'a, T> {
    initial: Branch<'a>,
    loading: Branch<'a>,
    empty: Branch<'a>,
    error: Box<dyn FnMut(&ErrorState) + 'a>,
    success: Box<dyn FnMut(&Success<T>) + 'a>,
}

impl<'a, T> StateBranches<'a, T> {
    pub fn new(success: impl FnMut(&Success<T>) + 'a) -> Self {
        Self {
            initial: Box::new(|| {}),
            loading: Box::new(|| {}),
            empty: Box::new(|| {}),
            error: Box::new(|_| {}),
            success: Box::new(success),
        }
    }

    pub fn initial(mut self, content: impl FnMut() + 'a) -> Self {
        self.initial = Box::new(content);
        self
    }

    pub fn loading(mut self, content: impl FnMut() + 'a) -> Self {
        self.loading = Box::new(content);
        self
    }

    pub fn empty(mut self, content: impl FnMut() + 'a) -> Self {
        self.empty = Box::new(content);
        self
    }

    pub fn error(mut self, content: impl FnMut(&ErrorState) + 'a) -> Self {
        self.error = Box::new(content);
        self
    }

    fn compose(&mut self, state: &UiState<T>) {
        match state {
            UiState::Initial => (self.initial)(),
            UiState::Loading => (self.loading)(),
            UiState::Success(success) => (self.success)(success),
            UiState::Empty => (self.empty)(),
            UiState::Error(error) => (self.error)(error),
        }
    }
}

/// Shows the branch for `ui_state` and animates between branches with
/// `spec.switch_transition` whenever the variant changes. A new payload in
/// the same variant updates the shown branch in place.
#[composable]
pub fn StatefulContainer<'a, T>(
    modifier: Modifier,
    spec: StatefulContainerSpec,
    ui_state: &UiState<T>,
    mut branches: StateBranches<'a, T>,
) -> NodeId
where
    T: Clone + 'static,
{
    let StatefulContainerSpec {
        switch_transition,
        content_alignment,
    } = spec;
    log::trace!("stateful container at {}", ui_state.kind());
    AnimatedContent(
        ui_state.clone(),
        modifier,
        move |_: &UiState<T>, _: &UiState<T>| switch_transition.clone(),
        content_alignment,
        |state: &UiState<T>| -> UiStateKind { state.kind() },
        |_, state: &UiState<T>| branches.compose(state),
    )
}
