//! Host hooks for the runtime.

/// Lets the host know that the runtime has work for the next frame.
///
/// The runtime itself is single threaded; schedulers only signal the host
/// loop (an event loop wake-up, a test flag) and never run work themselves.
pub trait RuntimeScheduler {
    fn schedule_frame(&self);
}

#[derive(Debug, Default)]
pub struct DefaultScheduler;

impl RuntimeScheduler for DefaultScheduler {
    fn schedule_frame(&self) {}
}
