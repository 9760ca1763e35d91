// Tokio-backed scheduler - runs timer callbacks on a Tokio runtime

use super::{Scheduler, TimerCallback, TimerHandle};
use std::time::Duration;
use tokio::runtime::Handle;

/// Scheduler that spawns one sleeping task per timer
///
/// Cancelling a handle aborts its task. The flag is also checked when the
/// task wakes, so a cancel racing with expiry still skips the callback.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    runtime: Handle,
}

impl TokioScheduler {
    /// Create a scheduler spawning onto the given runtime
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Create a scheduler for the runtime of the calling context, if any
    pub fn current() -> Option<Self> {
        Handle::try_current().ok().map(Self::new)
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let handle = TimerHandle::new();
        let task_handle = handle.clone();

        let task = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            if task_handle.is_cancelled() {
                crate::trace!("Timer {} cancelled before expiry", task_handle.id());
                return;
            }
            callback();
        });

        let abort = task.abort_handle();
        handle.set_cancel_hook(Box::new(move || abort.abort()));
        handle
    }
}
