use composables_macros::composable;
use composables_runtime::NodeId;
use composables_ui::{
    rememberPullToRefreshState, Modifier, PullToRefreshBox, PullToRefreshDefaults, PullToRefreshState,
    Scaffold, ScaffoldSpec,
};
use composables_ui_graphics::{Alignment, PaddingValues};

use crate::always_enter::AnimateAlwaysEnter;
use crate::fab::AnimatedFab;
use crate::layout::AnimatedLayoutSpec;
use crate::stateful_container::{StateBranches, StatefulContainer, StatefulContainerSpec};
use crate::ui_state::UiState;

#[derive(Clone, Debug)]
pub struct AnimatedScaffoldSpec {
    pub scaffold: ScaffoldSpec,
    /// Entrance of the content area.
    pub content: AnimatedLayoutSpec,
    pub fab: AnimatedLayoutSpec,
    pub container: StatefulContainerSpec,
    pub show_floating_action_button: bool,
}

impl AnimatedScaffoldSpec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scaffold(mut self, scaffold: ScaffoldSpec) -> Self {
        self.scaffold = scaffold;
        self
    }

    pub fn content(mut self, content: AnimatedLayoutSpec) -> Self {
        self.content = content;
        self
    }

    pub fn fab(mut self, fab: AnimatedLayoutSpec) -> Self {
        self.fab = fab;
        self
    }

    pub fn container(mut self, container: StatefulContainerSpec) -> Self {
        self.container = container;
        self
    }

    pub fn show_floating_action_button(mut self, show: bool) -> Self {
        self.show_floating_action_button = show;
        self
    }
}

impl Default for AnimatedScaffoldSpec {
    fn default() -> Self {
        Self {
            scaffold: ScaffoldSpec::default(),
            content: AnimatedLayoutSpec::new(),
            fab: AnimatedLayoutSpec::new(),
            container: StatefulContainerSpec::default(),
            show_floating_action_button: true,
        }
    }
}

type Bar<'a> = Box<dyn FnOnce() + 'a>;

/// Scaffold slots other than the content.
pub struct ScaffoldBars<'a> {
    top_bar: Bar<'a>,
    bottom_bar: Bar<'a>,
    snackbar_host: Bar<'a>,
    floating_action_button: Bar<'a>,
}

impl<'a> ScaffoldBars<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top_bar(mut self, content: impl FnOnce() + 'a) -> Self {
        self.top_bar = Box::new(content);
        self
    }

    pub fn bottom_bar(mut self, content: impl FnOnce() + 'a) -> Self {
        self.bottom_bar = Box::new(content);
        self
    }

    pub fn snackbar_host(mut self, content: impl FnOnce() + 'a) -> Self {
        self.snackbar_host = Box::new(content);
        self
    }

    pub fn floating_action_button(mut self, content: impl FnOnce() + 'a) -> Self {
        self.floating_action_button = Box::new(content);
        self
    }
}

impl Default for ScaffoldBars<'_> {
    fn default() -> Self {
        Self {
            top_bar: Box::new(|| {}),
            bottom_bar: Box::new(|| {}),
            snackbar_host: Box::new(|| {}),
            floating_action_button: Box::new(|| {}),
        }
    }
}

/// Scaffold whose floating action button is an [`AnimatedFab`] and whose
/// content area enters once mounted, then hosts a pull-to-refresh
/// [`StatefulContainer`] for `ui_state`.
///
/// `branches` receives the padding the content should keep clear of the
/// bars.
#[composable]
#[allow(clippy::too_many_arguments)]
pub fn AnimatedScaffold<'a, T>(
    modifier: Modifier,
    spec: AnimatedScaffoldSpec,
    bars: ScaffoldBars<'a>,
    ui_state: &UiState<T>,
    is_refreshing: bool,
    on_refresh: impl Fn() + 'static,
    pull_refresh_state: Option<&PullToRefreshState>,
    branches: impl FnOnce(PaddingValues) -> StateBranches<'a, T>,
) -> NodeId
where
    T: Clone + 'static,
{
    let own_state = rememberPullToRefreshState();
    let state = pull_refresh_state.unwrap_or(&own_state);
    let AnimatedScaffoldSpec {
        scaffold,
        content,
        fab,
        container,
        show_floating_action_button,
    } = spec;
    let ScaffoldBars {
        top_bar,
        bottom_bar,
        snackbar_host,
        floating_action_button,
    } = bars;
    let content_spec = content.always_enter_spec();

    Scaffold(
        modifier,
        scaffold,
        top_bar,
        bottom_bar,
        snackbar_host,
        move || {
            AnimatedFab(show_floating_action_button, fab, floating_action_button);
        },
        move |padding| {
            AnimateAlwaysEnter(
                Modifier::padding_values(padding).then(Modifier::fill_max_size()),
                content_spec,
                None,
                move |_| {
                    PullToRefreshBox(
                        is_refreshing,
                        on_refresh,
                        Modifier::empty(),
                        state,
                        Alignment::TOP_START,
                        |state, is_refreshing| {
                            PullToRefreshDefaults::Indicator(
                                Modifier::align(Alignment::TOP_CENTER),
                                state,
                                is_refreshing,
                            );
                        },
                        move |_| {
                            StatefulContainer(Modifier::empty(), container, ui_state, branches(padding));
                        },
                    );
                },
            );
        },
    )
}
