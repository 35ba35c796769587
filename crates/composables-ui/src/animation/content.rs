#![allow(non_snake_case)]

use std::fmt::Debug;
use std::hash::Hash;

use composables_animation::ContentTransform;
use composables_macros::composable;
use composables_runtime::{current_runtime_handle, remember, with_key, Node, NodeId, RuntimeHandle};
use composables_ui_graphics::Alignment;
use indexmap::IndexSet;

use super::clock::FrameTimer;
use super::visibility::{AnimatedVisibilityScope, VisibilityPhase};
use crate::modifier::Modifier;
use crate::widgets::nodes::{compose_container, replace_children};

struct ContentEntry<S, K> {
    key: K,
    state: S,
    phase: VisibilityPhase,
}

struct ContentSwitch<S, K> {
    entries: Vec<ContentEntry<S, K>>,
    transform: Option<ContentTransform>,
    timer: Option<FrameTimer>,
}

impl<S: Clone, K: PartialEq + Debug> ContentSwitch<S, K> {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
            transform: None,
            timer: None,
        }
    }

    fn settle(&mut self) {
        if !self.timer.as_ref().is_some_and(FrameTimer::is_finished) {
            return;
        }
        self.timer = None;
        self.transform = None;
        self.entries
            .retain(|entry| entry.phase != VisibilityPhase::Exiting);
        for entry in &mut self.entries {
            entry.phase = VisibilityPhase::Visible;
        }
    }

    fn retarget(
        &mut self,
        target: S,
        key: K,
        transition_spec: impl FnOnce(&S, &S) -> ContentTransform,
        runtime: &RuntimeHandle,
    ) {
        let Some(current) = self
            .entries
            .iter_mut()
            .find(|entry| entry.phase != VisibilityPhase::Exiting)
        else {
            self.entries.push(ContentEntry {
                key,
                state: target,
                phase: VisibilityPhase::Visible,
            });
            return;
        };
        if current.key == key {
            current.state = target;
            return;
        }

        let transform = transition_spec(&current.state, &target);
        log::debug!("content switching from {:?} to {key:?}", current.key);
        for entry in &mut self.entries {
            entry.phase = VisibilityPhase::Exiting;
        }
        // A target that was still on its way out comes back as a fresh entry.
        self.entries.retain(|entry| entry.key != key);

        let duration = transform.duration_millis();
        if duration == 0 {
            self.entries.clear();
            self.entries.push(ContentEntry {
                key,
                state: target,
                phase: VisibilityPhase::Visible,
            });
            self.timer = None;
            self.transform = None;
            return;
        }
        self.entries.push(ContentEntry {
            key,
            state: target,
            phase: VisibilityPhase::Entering,
        });
        self.timer = Some(FrameTimer::start(runtime.clone(), duration));
        self.transform = Some(transform);
    }
}

/// Node emitted by [`AnimatedContent`]; one [`ContentEntryNode`] child per
/// composed entry, outgoing entries first.
#[derive(Debug)]
pub struct AnimatedContentNode {
    pub modifier: Modifier,
    pub content_alignment: Alignment,
    pub target_key: String,
    pub children: IndexSet<NodeId>,
}

impl Node for AnimatedContentNode {
    fn update_children(&mut self, children: &[NodeId]) {
        replace_children(&mut self.children, children);
    }

    fn children(&self) -> Vec<NodeId> {
        self.children.iter().copied().collect()
    }

    fn describe(&self) -> String {
        format!("AnimatedContent({})", self.target_key)
    }

    fn test_tag(&self) -> Option<&str> {
        self.modifier.tag()
    }
}

#[derive(Debug)]
pub struct ContentEntryNode {
    pub key: String,
    pub phase: VisibilityPhase,
    pub transform: Option<ContentTransform>,
    timer: Option<FrameTimer>,
    pub children: IndexSet<NodeId>,
}

impl ContentEntryNode {
    pub fn play_time_millis(&self) -> u64 {
        self.timer.as_ref().map_or(0, FrameTimer::play_time_millis)
    }

    pub fn alpha(&self) -> f32 {
        let play_time = self.play_time_millis();
        match (self.phase, &self.transform) {
            (VisibilityPhase::Entering, Some(transform)) => {
                transform.target_content_enter.alpha_at(play_time)
            }
            (VisibilityPhase::Exiting, Some(transform)) => {
                transform.initial_content_exit.alpha_at(play_time)
            }
            (VisibilityPhase::Hidden, _) => 0.0,
            _ => 1.0,
        }
    }
}

impl Node for ContentEntryNode {
    fn update_children(&mut self, children: &[NodeId]) {
        replace_children(&mut self.children, children);
    }

    fn children(&self) -> Vec<NodeId> {
        self.children.iter().copied().collect()
    }

    fn describe(&self) -> String {
        format!("ContentEntry({}, {:?})", self.key, self.phase)
    }
}

/// Shows `content` for `target_state` and animates between contents when
/// `content_key(target_state)` changes. A new state with the same key
/// updates the shown content in place. During a switch the outgoing content
/// stays composed until the transform has finished.
#[composable]
pub fn AnimatedContent<S, K>(
    target_state: S,
    modifier: Modifier,
    transition_spec: impl Fn(&S, &S) -> ContentTransform,
    content_alignment: Alignment,
    content_key: impl Fn(&S) -> K,
    mut content: impl FnMut(&AnimatedVisibilityScope, &S),
) -> NodeId
where
    S: Clone + 'static,
    K: Hash + PartialEq + Clone + Debug + 'static,
{
    let runtime = current_runtime_handle();
    let key = content_key(&target_state);
    let switch = remember(ContentSwitch::<S, K>::new);
    let (entries, transform, timer) = switch.update(|switch| {
        switch.settle();
        switch.retarget(target_state, key.clone(), &transition_spec, &runtime);
        let entries: Vec<(K, S, VisibilityPhase)> = switch
            .entries
            .iter()
            .map(|entry| (entry.key.clone(), entry.state.clone(), entry.phase))
            .collect();
        (entries, switch.transform.clone(), switch.timer.clone())
    });

    let target_key = format!("{key:?}");
    let (id, ()) = compose_container(
        || AnimatedContentNode {
            modifier: modifier.clone(),
            content_alignment,
            target_key: target_key.clone(),
            children: IndexSet::new(),
        },
        |node: &mut AnimatedContentNode| {
            node.modifier = modifier.clone();
            node.content_alignment = content_alignment;
            node.target_key = target_key.clone();
        },
        || {
            for (entry_key, state, phase) in entries {
                let label = format!("{entry_key:?}");
                with_key(&entry_key, || {
                    compose_container(
                        || ContentEntryNode {
                            key: label.clone(),
                            phase,
                            transform: transform.clone(),
                            timer: timer.clone(),
                            children: IndexSet::new(),
                        },
                        |node: &mut ContentEntryNode| {
                            node.key = label.clone();
                            node.phase = phase;
                            node.transform = transform.clone();
                            node.timer = timer.clone();
                        },
                        || content(&AnimatedVisibilityScope::new(phase), &state),
                    );
                });
            }
        },
    );
    id
}
