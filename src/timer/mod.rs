//! Cancellable delayed callbacks.
//!
//! The search session needs exactly one temporal behavior: closing the
//! dropdown a short while after the input loses focus, unless focus comes
//! back first. This module provides the schedule/cancel abstraction for that:
//! - `Scheduler`: trait implemented by timer backends
//! - `TokioScheduler`: production backend on a Tokio runtime
//! - `ManualScheduler`: fake clock advanced explicitly (tests, host-driven loops)

mod manual;
mod tokio_backend;

pub use manual::ManualScheduler;
pub use tokio_backend::TokioScheduler;

use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Callback run once when a timer expires
pub type TimerCallback = Box<dyn FnOnce() + Send + 'static>;

/// Source of unique timer ids
static NEXT_TIMER_ID: AtomicU64 = AtomicU64::new(1);

/// Handle to a scheduled callback
///
/// Clones share the same cancellation flag. Cancelling is idempotent and a
/// backend never runs a callback whose handle was cancelled before expiry.
#[derive(Clone)]
pub struct TimerHandle {
    id: u64,
    cancelled: Arc<AtomicBool>,
    /// Backend cleanup run once on cancel (e.g. aborting a sleeping task)
    on_cancel: Arc<Mutex<Option<TimerCallback>>>,
}

impl fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimerHandle")
            .field("id", &self.id)
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}

impl TimerHandle {
    /// Allocate a fresh, uncancelled handle
    pub fn new() -> Self {
        Self {
            id: NEXT_TIMER_ID.fetch_add(1, Ordering::Relaxed),
            cancelled: Arc::new(AtomicBool::new(false)),
            on_cancel: Arc::new(Mutex::new(None)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Register backend cleanup for cancellation
    ///
    /// Runs immediately if the handle is already cancelled.
    pub fn set_cancel_hook(&self, hook: TimerCallback) {
        let mut on_cancel = self.on_cancel.lock();
        if self.is_cancelled() {
            drop(on_cancel);
            hook();
            return;
        }
        *on_cancel = Some(hook);
    }

    /// Cancel the timer; the callback will not run if it has not already
    pub fn cancel(&self) {
        let hook = {
            let mut on_cancel = self.on_cancel.lock();
            self.cancelled.store(true, Ordering::SeqCst);
            on_cancel.take()
        };
        if let Some(hook) = hook {
            hook();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

impl Default for TimerHandle {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for timer backends
///
/// Implementations must not run the callback synchronously inside `schedule`.
pub trait Scheduler: Send + Sync {
    /// Run `callback` once after `delay`, unless the returned handle is cancelled first
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handles_get_distinct_ids() {
        let a = TimerHandle::new();
        let b = TimerHandle::new();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_cancel_is_shared_between_clones() {
        let handle = TimerHandle::new();
        let clone = handle.clone();
        assert!(!clone.is_cancelled());

        handle.cancel();
        handle.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_cancel_hook_runs_once() {
        let handle = TimerHandle::new();
        let runs = Arc::new(AtomicU64::new(0));
        let counter = runs.clone();
        handle.set_cancel_hook(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(runs.load(Ordering::SeqCst), 0);

        handle.clone().cancel();
        handle.cancel();
        assert_eq!(runs.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cancel_hook_set_after_cancel_runs_immediately() {
        let handle = TimerHandle::new();
        handle.cancel();

        let ran = Arc::new(AtomicBool::new(false));
        let flag = ran.clone();
        handle.set_cancel_hook(Box::new(move || flag.store(true, Ordering::SeqCst)));
        assert!(ran.load(Ordering::SeqCst));
    }
}
