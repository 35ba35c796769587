use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use composables_runtime::{FrameCallbackRegistration, RuntimeHandle};

struct TimerInner {
    runtime: RuntimeHandle,
    duration_millis: u64,
    start_nanos: Cell<Option<u64>>,
    play_time_millis: Cell<u64>,
    finished: Cell<bool>,
    registration: RefCell<Option<FrameCallbackRegistration>>,
}

impl TimerInner {
    fn on_frame(self: &Rc<Self>, frame_time_nanos: u64) {
        let start = match self.start_nanos.get() {
            Some(start) => start,
            None => {
                self.start_nanos.set(Some(frame_time_nanos));
                frame_time_nanos
            }
        };
        let elapsed = frame_time_nanos.saturating_sub(start) / 1_000_000;
        self.play_time_millis.set(elapsed.min(self.duration_millis));
        if elapsed >= self.duration_millis {
            self.finished.set(true);
            self.registration.borrow_mut().take();
        } else {
            self.schedule_next_frame();
        }
        // Every frame changes what the animated nodes report.
        self.runtime.request_recompose();
    }

    fn schedule_next_frame(self: &Rc<Self>) {
        let weak: Weak<TimerInner> = Rc::downgrade(self);
        let registration = self.runtime.frame_clock().with_frame_nanos(move |nanos| {
            if let Some(inner) = weak.upgrade() {
                inner.on_frame(nanos);
            }
        });
        *self.registration.borrow_mut() = Some(registration);
    }
}

/// Play-time source for one running transition. Starts counting at the
/// first frame after [`FrameTimer::start`] and requests a recomposition on
/// every frame until it finishes. Dropping every clone stops it.
#[derive(Clone)]
pub struct FrameTimer {
    inner: Rc<TimerInner>,
}

impl FrameTimer {
    pub fn start(runtime: RuntimeHandle, duration_millis: u64) -> Self {
        let inner = Rc::new(TimerInner {
            runtime,
            duration_millis,
            start_nanos: Cell::new(None),
            play_time_millis: Cell::new(0),
            finished: Cell::new(false),
            registration: RefCell::new(None),
        });
        inner.schedule_next_frame();
        Self { inner }
    }

    pub fn duration_millis(&self) -> u64 {
        self.inner.duration_millis
    }

    pub fn play_time_millis(&self) -> u64 {
        self.inner.play_time_millis.get()
    }

    pub fn is_finished(&self) -> bool {
        self.inner.finished.get()
    }
}

impl std::fmt::Debug for FrameTimer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameTimer")
            .field("duration_millis", &self.inner.duration_millis)
            .field("play_time_millis", &self.play_time_millis())
            .field("finished", &self.is_finished())
            .finish()
    }
}
