use super::*;
use composables_macros::composable;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

thread_local! {
    static INIT_CALLS: Cell<usize> = const { Cell::new(0) };
    static EFFECT_RUNS: Cell<usize> = const { Cell::new(0) };
}

#[allow(non_upper_case_globals)]
static LocalLabel: CompositionLocal<&'static str> = CompositionLocal::new(|| "default");

#[derive(Default)]
struct LeafNode {
    label: String,
    mounted: bool,
}

impl Node for LeafNode {
    fn mount(&mut self) {
        self.mounted = true;
    }

    fn unmount(&mut self) {
        self.mounted = false;
    }
}

#[derive(Default)]
struct ContainerNode {
    children: Vec<NodeId>,
}

impl Node for ContainerNode {
    fn update_children(&mut self, children: &[NodeId]) {
        self.children = children.to_vec();
    }

    fn children(&self) -> Vec<NodeId> {
        self.children.clone()
    }
}

#[composable]
fn Leaf(label: &str) -> NodeId {
    let id = emit_node(LeafNode::default);
    let label = label.to_string();
    if let Err(err) = with_node_mut(id, |node: &mut LeafNode| node.label = label) {
        debug_assert!(false, "failed to update leaf node: {err}");
    }
    id
}

#[composable]
fn Container(content: impl FnOnce()) -> NodeId {
    let id = emit_node(ContainerNode::default);
    push_parent(id);
    content();
    pop_parent();
    id
}

#[composable]
fn CountingRemember() -> Owned<u32> {
    remember(|| {
        INIT_CALLS.with(|calls| calls.set(calls.get() + 1));
        7u32
    })
}

fn drive(composition: &mut Composition<MemoryApplier>, content: &mut dyn FnMut()) {
    composition.render(1, || content()).expect("render");
    for _ in 0..10 {
        let handle = composition.runtime_handle();
        let ran = handle.drain_tasks();
        if composition.needs_recompose() {
            composition.render(1, || content()).expect("render");
        } else if ran == 0 {
            return;
        }
    }
    panic!("composition did not settle");
}

fn labels(composition: &Composition<MemoryApplier>) -> Vec<String> {
    let applier = composition.applier_mut();
    applier
        .descendants(composition.roots())
        .into_iter()
        .filter_map(|id| applier.node::<LeafNode>(id).ok().map(|leaf| leaf.label.clone()))
        .collect()
}

#[test]
fn remember_runs_initializer_once_per_position() {
    INIT_CALLS.with(|calls| calls.set(0));
    let mut composition = Composition::new(MemoryApplier::new());
    let mut seen = Vec::new();
    for _ in 0..3 {
        composition
            .render(1, || seen.push(CountingRemember()))
            .expect("render");
    }
    assert_eq!(INIT_CALLS.with(Cell::get), 1);
    assert!(seen.windows(2).all(|pair| pair[0].ptr_eq(&pair[1])));
}

#[test]
fn state_write_requests_recomposition() {
    let mut composition = Composition::new(MemoryApplier::new());
    let captured: Rc<RefCell<Option<MutableState<i32>>>> = Rc::default();

    let slot = Rc::clone(&captured);
    composition
        .render(1, || {
            let state = useState(|| 0);
            *slot.borrow_mut() = Some(state);
        })
        .expect("render");
    assert!(!composition.needs_recompose());

    let state = captured.borrow().clone().expect("state captured");
    state.set(5);
    assert!(composition.needs_recompose());
    assert!(!state.set_if_changed(5));
}

#[test]
fn conditional_children_are_removed_from_the_tree() {
    let mut composition = Composition::new(MemoryApplier::new());
    let show_middle = Rc::new(Cell::new(true));

    let flag = Rc::clone(&show_middle);
    let mut content = move || {
        Container(|| {
            Leaf("first");
            if flag.get() {
                Leaf("middle");
            }
            Leaf("last");
        });
    };
    drive(&mut composition, &mut content);
    assert_eq!(labels(&composition), vec!["first", "middle", "last"]);
    let nodes_before = composition.applier_mut().len();

    show_middle.set(false);
    composition.render(1, &mut content).expect("render");
    assert_eq!(labels(&composition), vec!["first", "last"]);
    assert_eq!(composition.applier_mut().len(), nodes_before - 1);
}

#[test]
fn launched_effect_runs_once_per_mount_and_cancels_on_dispose() {
    EFFECT_RUNS.with(|runs| runs.set(0));
    let mut composition = Composition::new(MemoryApplier::new());
    let mounted = Rc::new(Cell::new(true));
    let scopes: Rc<RefCell<Vec<LaunchedEffectScope>>> = Rc::default();

    let flag = Rc::clone(&mounted);
    let sink = Rc::clone(&scopes);
    let mut content = move || {
        if flag.get() {
            let sink = Rc::clone(&sink);
            LaunchedEffect!((), move |scope| {
                EFFECT_RUNS.with(|runs| runs.set(runs.get() + 1));
                sink.borrow_mut().push(scope);
            });
        }
    };

    drive(&mut composition, &mut content);
    composition.render(1, &mut content).expect("render");
    drive(&mut composition, &mut content);
    assert_eq!(EFFECT_RUNS.with(Cell::get), 1);
    assert!(scopes.borrow()[0].is_active());

    mounted.set(false);
    composition.render(1, &mut content).expect("render");
    assert!(!scopes.borrow()[0].is_active());

    mounted.set(true);
    drive(&mut composition, &mut content);
    assert_eq!(EFFECT_RUNS.with(Cell::get), 2);
}

#[test]
fn effect_cancelled_before_it_starts_never_runs() {
    EFFECT_RUNS.with(|runs| runs.set(0));
    let mut composition = Composition::new(MemoryApplier::new());
    let mounted = Rc::new(Cell::new(true));

    let flag = Rc::clone(&mounted);
    let mut content = move || {
        if flag.get() {
            LaunchedEffect!((), |_scope| EFFECT_RUNS.with(|runs| runs.set(runs.get() + 1)));
        }
    };
    composition.render(1, &mut content).expect("render");
    mounted.set(false);
    composition.render(1, &mut content).expect("render");
    composition.runtime_handle().drain_tasks();
    assert_eq!(EFFECT_RUNS.with(Cell::get), 0);
}

#[test]
fn saveable_state_survives_save_and_restore() {
    let mut content = || {
        let counter = rememberSaveable(|| 0u32);
        LaunchedEffect!((), move |_| counter.update(|value| *value += 1));
    };

    let mut first = Composition::new(MemoryApplier::new());
    drive(&mut first, &mut content);
    let saved = first.save_state().expect("save");
    assert_eq!(saved.len(), 1);
    assert_eq!(saved.values().next(), Some(&serde_json::Value::from(1)));

    let json = saved.to_json().expect("encode");
    let mut second = Composition::new(MemoryApplier::new());
    second.restore_state(SavedState::from_json(&json).expect("decode"));
    drive(&mut second, &mut content);
    let resaved = second.save_state().expect("save");
    assert_eq!(resaved.values().next(), Some(&serde_json::Value::from(2)));
}

#[test]
fn saveable_value_unregisters_when_leaving_composition() {
    let mut composition = Composition::new(MemoryApplier::new());
    let shown = Rc::new(Cell::new(true));
    let flag = Rc::clone(&shown);
    let mut content = move || {
        if flag.get() {
            rememberSaveable(|| String::from("kept"));
        }
    };
    composition.render(1, &mut content).expect("render");
    assert_eq!(composition.save_state().expect("save").len(), 1);

    shown.set(false);
    composition.render(1, &mut content).expect("render");
    assert!(composition.save_state().expect("save").is_empty());
}

#[test]
fn composition_local_reads_innermost_provider() {
    let mut composition = Composition::new(MemoryApplier::new());
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    composition
        .render(1, || {
            sink.borrow_mut().push(LocalLabel.current());
            CompositionLocalProvider([LocalLabel.provides("outer")], || {
                sink.borrow_mut().push(LocalLabel.current());
                CompositionLocalProvider([LocalLabel.provides("inner")], || {
                    sink.borrow_mut().push(LocalLabel.current());
                });
                sink.borrow_mut().push(LocalLabel.current());
            });
        })
        .expect("render");
    assert_eq!(*seen.borrow(), vec!["default", "outer", "inner", "outer"]);
    assert_eq!(LocalLabel.current(), "default");
}

#[test]
fn keyed_groups_follow_their_keys() {
    let mut composition = Composition::new(MemoryApplier::new());
    let order = Rc::new(RefCell::new(vec!["a", "b"]));
    let states: Rc<RefCell<Vec<(&'static str, Owned<String>)>>> = Rc::default();

    let keys = Rc::clone(&order);
    let sink = Rc::clone(&states);
    let mut content = move || {
        sink.borrow_mut().clear();
        for key in keys.borrow().iter().copied() {
            let owned = with_key(&key, || remember(|| format!("state-{key}")));
            sink.borrow_mut().push((key, owned));
        }
    };
    composition.render(1, &mut content).expect("render");
    let before: Vec<_> = states.borrow().clone();

    order.borrow_mut().reverse();
    composition.render(1, &mut content).expect("render");
    let after = states.borrow();
    assert_eq!(after[0].0, "b");
    assert!(after[0].1.ptr_eq(&before[1].1));
    assert!(after[1].1.ptr_eq(&before[0].1));
}

#[test]
fn replaced_node_is_unmounted_and_removed() {
    let mut composition = Composition::new(MemoryApplier::new());
    composition.render(1, || {
        Leaf("only");
    })
    .expect("render");
    let root = composition.root().expect("root");
    assert!(composition.applier_mut().node::<LeafNode>(root).expect("leaf").mounted);

    composition.render(1, || {}).expect("render");
    assert!(composition.root().is_none());
    assert!(!composition.applier_mut().contains(root));
    assert!(composition
        .applier_mut()
        .dump_tree(composition.roots())
        .contains("no root"));
}
