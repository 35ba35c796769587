use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use crate::frame_clock::FrameClock;
use crate::platform::{DefaultScheduler, RuntimeScheduler};

pub type FrameCallbackId = u64;

struct FrameCallbackEntry {
    id: FrameCallbackId,
    callback: Option<Box<dyn FnOnce(u64) + 'static>>,
}

struct RuntimeInner {
    scheduler: Rc<dyn RuntimeScheduler>,
    needs_frame: Cell<bool>,
    needs_recompose: Cell<bool>,
    frame_time_nanos: Cell<u64>,
    frame_callbacks: RefCell<VecDeque<FrameCallbackEntry>>,
    next_frame_callback_id: Cell<u64>,
    pending_tasks: RefCell<VecDeque<Box<dyn FnOnce() + 'static>>>,
}

impl RuntimeInner {
    fn new(scheduler: Rc<dyn RuntimeScheduler>) -> Self {
        Self {
            scheduler,
            needs_frame: Cell::new(false),
            needs_recompose: Cell::new(false),
            frame_time_nanos: Cell::new(0),
            frame_callbacks: RefCell::new(VecDeque::new()),
            next_frame_callback_id: Cell::new(1),
            pending_tasks: RefCell::new(VecDeque::new()),
        }
    }

    fn schedule(&self) {
        self.needs_frame.set(true);
        self.scheduler.schedule_frame();
    }

    fn request_recompose(&self) {
        if !self.needs_recompose.replace(true) {
            log::trace!("recomposition requested");
        }
        self.schedule();
    }

    fn enqueue_task(&self, task: Box<dyn FnOnce() + 'static>) {
        self.pending_tasks.borrow_mut().push_back(task);
        self.schedule();
    }

    fn drain_tasks(&self) -> usize {
        let tasks: Vec<Box<dyn FnOnce() + 'static>> =
            self.pending_tasks.borrow_mut().drain(..).collect();
        let count = tasks.len();
        for task in tasks {
            task();
        }
        count
    }

    fn has_tasks(&self) -> bool {
        !self.pending_tasks.borrow().is_empty()
    }

    fn has_frame_callbacks(&self) -> bool {
        !self.frame_callbacks.borrow().is_empty()
    }

    fn register_frame_callback(&self, callback: Box<dyn FnOnce(u64) + 'static>) -> FrameCallbackId {
        let id = self.next_frame_callback_id.get();
        self.next_frame_callback_id.set(id + 1);
        self.frame_callbacks.borrow_mut().push_back(FrameCallbackEntry {
            id,
            callback: Some(callback),
        });
        self.schedule();
        id
    }

    fn cancel_frame_callback(&self, id: FrameCallbackId) {
        let mut callbacks = self.frame_callbacks.borrow_mut();
        if let Some(index) = callbacks.iter().position(|entry| entry.id == id) {
            callbacks.remove(index);
        }
        if callbacks.is_empty() && !self.needs_recompose.get() {
            self.needs_frame.set(false);
        }
    }

    fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        self.frame_time_nanos.set(frame_time_nanos);
        // Callbacks registered while draining belong to the next frame.
        let pending: Vec<Box<dyn FnOnce(u64) + 'static>> = self
            .frame_callbacks
            .borrow_mut()
            .drain(..)
            .filter_map(|mut entry| entry.callback.take())
            .collect();
        for callback in pending {
            callback(frame_time_nanos);
        }
        if !self.has_frame_callbacks() && !self.needs_recompose.get() {
            self.needs_frame.set(false);
        }
    }
}

/// Owner of the runtime queues. Compositions and states only hold
/// [`RuntimeHandle`]s, which become inert once the runtime is dropped.
#[derive(Clone)]
pub struct Runtime {
    inner: Rc<RuntimeInner>,
}

impl Runtime {
    pub fn new(scheduler: Rc<dyn RuntimeScheduler>) -> Self {
        Self {
            inner: Rc::new(RuntimeInner::new(scheduler)),
        }
    }

    pub fn handle(&self) -> RuntimeHandle {
        RuntimeHandle(Rc::downgrade(&self.inner))
    }

    pub fn needs_frame(&self) -> bool {
        self.inner.needs_frame.get()
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.handle())
    }
}

impl Default for Runtime {
    fn default() -> Self {
        Self::new(Rc::new(DefaultScheduler))
    }
}

#[derive(Clone)]
pub struct RuntimeHandle(Weak<RuntimeInner>);

impl RuntimeHandle {
    /// A handle that is not attached to any runtime. Writes through it are
    /// accepted but never trigger recomposition.
    pub fn detached() -> Self {
        Self(Weak::new())
    }

    pub fn schedule(&self) {
        if let Some(inner) = self.0.upgrade() {
            inner.schedule();
        }
    }

    pub fn request_recompose(&self) {
        if let Some(inner) = self.0.upgrade() {
            inner.request_recompose();
        }
    }

    pub fn needs_recompose(&self) -> bool {
        self.0
            .upgrade()
            .map(|inner| inner.needs_recompose.get())
            .unwrap_or(false)
    }

    pub(crate) fn take_recompose_request(&self) -> bool {
        self.0
            .upgrade()
            .map(|inner| inner.needs_recompose.replace(false))
            .unwrap_or(false)
    }

    pub fn spawn_task(&self, task: Box<dyn FnOnce() + 'static>) {
        if let Some(inner) = self.0.upgrade() {
            inner.enqueue_task(task);
        } else {
            task();
        }
    }

    /// Runs the tasks queued so far and returns how many ran. Tasks queued
    /// by those tasks wait for the next drain.
    pub fn drain_tasks(&self) -> usize {
        self.0
            .upgrade()
            .map(|inner| inner.drain_tasks())
            .unwrap_or(0)
    }

    pub fn has_pending_tasks(&self) -> bool {
        self.0
            .upgrade()
            .map(|inner| inner.has_tasks())
            .unwrap_or(false)
    }

    pub fn register_frame_callback(
        &self,
        callback: impl FnOnce(u64) + 'static,
    ) -> Option<FrameCallbackId> {
        self.0
            .upgrade()
            .map(|inner| inner.register_frame_callback(Box::new(callback)))
    }

    pub fn cancel_frame_callback(&self, id: FrameCallbackId) {
        if let Some(inner) = self.0.upgrade() {
            inner.cancel_frame_callback(id);
        }
    }

    pub fn drain_frame_callbacks(&self, frame_time_nanos: u64) {
        if let Some(inner) = self.0.upgrade() {
            inner.drain_frame_callbacks(frame_time_nanos);
        }
    }

    pub fn has_frame_callbacks(&self) -> bool {
        self.0
            .upgrade()
            .map(|inner| inner.has_frame_callbacks())
            .unwrap_or(false)
    }

    /// Time of the most recently dispatched frame.
    pub fn frame_time_nanos(&self) -> u64 {
        self.0
            .upgrade()
            .map(|inner| inner.frame_time_nanos.get())
            .unwrap_or(0)
    }

    pub fn frame_clock(&self) -> FrameClock {
        FrameClock::new(self.clone())
    }

    pub fn is_alive(&self) -> bool {
        self.0.strong_count() > 0
    }
}

impl std::fmt::Debug for RuntimeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuntimeHandle")
            .field("alive", &self.is_alive())
            .finish()
    }
}
