use animated_composables::{StateBranches, StatefulContainer, StatefulContainerSpec, Success, UiState};
use composables_runtime::{location_key, Composition, Key, MemoryApplier, MutableState};
use composables_ui::{composable, Column, ColumnSpec, Modifier, Row, RowSpec, Text};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const ROW_COUNT: usize = 32;
const ROW_COUNT_SAMPLES: &[usize] = &[8, 32, 128];
const FRAME_NANOS: u64 = 16_000_000;
const MAX_FRAMES: usize = 1_000;

#[composable]
fn feed_content(ui_state: &UiState<usize>) {
    StatefulContainer(
        Modifier::fill_max_size(),
        StatefulContainerSpec::default(),
        ui_state,
        StateBranches::new(|success: &Success<usize>| {
            let rows = success.data.unwrap_or(0);
            Column(Modifier::fill_max_width(), ColumnSpec::default(), |_| {
                for row in 0..rows {
                    Row(Modifier::fill_max_width(), RowSpec::default(), |_| {
                        Text(format!("Item {row}"), Modifier::empty());
                        Text(format!("Detail {row}"), Modifier::empty());
                    });
                }
            });
        })
        .loading(|| {
            Text("Loading", Modifier::empty());
        }),
    );
}

struct SwitchFixture {
    composition: Composition<MemoryApplier>,
    key: Key,
    state: MutableState<UiState<usize>>,
    frame_time_nanos: u64,
}

impl SwitchFixture {
    fn new() -> Self {
        let composition = Composition::new(MemoryApplier::new());
        let state = MutableState::with_runtime(UiState::Loading, composition.runtime_handle());
        Self {
            composition,
            key: location_key(file!(), line!(), column!()),
            state,
            frame_time_nanos: 0,
        }
    }

    fn compose(&mut self) {
        let ui_state = self.state.value();
        self.composition
            .render(self.key, || feed_content(&ui_state))
            .expect("composition");
    }

    fn pump(&mut self) {
        let handle = self.composition.runtime_handle();
        while handle.has_pending_tasks() || self.composition.needs_recompose() {
            handle.drain_tasks();
            if self.composition.needs_recompose() {
                self.compose();
            }
        }
    }

    /// Runs frames until the switch animation has finished.
    fn settle(&mut self) {
        self.pump();
        let handle = self.composition.runtime_handle();
        for _ in 0..MAX_FRAMES {
            if !handle.has_frame_callbacks() {
                return;
            }
            self.frame_time_nanos += FRAME_NANOS;
            handle.drain_frame_callbacks(self.frame_time_nanos);
            self.pump();
        }
    }

    fn switch_to(&mut self, state: UiState<usize>) {
        self.state.set(state);
        self.pump();
    }
}

fn bench_same_state_update(c: &mut Criterion) {
    let mut fixture = SwitchFixture::new();
    fixture.switch_to(UiState::success(ROW_COUNT));
    fixture.settle();

    c.bench_function("container_same_state_update", |b| {
        let mut rows = ROW_COUNT;
        b.iter(|| {
            rows = if rows == ROW_COUNT { ROW_COUNT + 1 } else { ROW_COUNT };
            fixture.switch_to(UiState::success(rows));
            black_box(fixture.composition.root());
        });
    });
}

fn bench_state_switch(c: &mut Criterion) {
    let mut group = c.benchmark_group("container_state_switch");
    for &rows in ROW_COUNT_SAMPLES {
        group.bench_with_input(BenchmarkId::new("rows", rows), &rows, |b, &rows| {
            let mut fixture = SwitchFixture::new();
            fixture.compose();

            b.iter(|| {
                fixture.switch_to(UiState::success(rows));
                fixture.settle();
                fixture.switch_to(UiState::Loading);
                fixture.settle();
                black_box(fixture.composition.root());
            });
        });
    }
    group.finish();
}

criterion_group!(container_switch, bench_same_state_update, bench_state_switch);
criterion_main!(container_switch);
