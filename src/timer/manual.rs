// Manual scheduler - a fake clock that only moves when told to
//
// Lets tests (and hosts with their own frame loop) drive timers
// deterministically without wall-clock waits.

use super::{Scheduler, TimerCallback, TimerHandle};
use parking_lot::Mutex;
use std::time::Duration;

struct PendingTimer {
    deadline: Duration,
    handle: TimerHandle,
    callback: TimerCallback,
}

#[derive(Default)]
struct ManualClock {
    /// Time elapsed since the scheduler was created
    now: Duration,
    /// Timers in scheduling order
    pending: Vec<PendingTimer>,
}

/// Scheduler whose clock is advanced explicitly via `advance`
#[derive(Default)]
pub struct ManualScheduler {
    clock: Mutex<ManualClock>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current fake time, measured from creation
    pub fn now(&self) -> Duration {
        self.clock.lock().now
    }

    /// Number of timers that are scheduled and not cancelled
    pub fn pending_count(&self) -> usize {
        self.clock
            .lock()
            .pending
            .iter()
            .filter(|t| !t.handle.is_cancelled())
            .count()
    }

    /// Move the clock forward, firing every due timer in deadline order
    ///
    /// Callbacks run without the clock lock held, so they may schedule new
    /// timers; those fire in the same call if they fall due within `by`.
    /// Returns the number of callbacks that ran.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.clock.lock().now + by;
        let mut fired = 0;

        loop {
            let next = {
                let mut clock = self.clock.lock();
                clock.pending.retain(|t| !t.handle.is_cancelled());

                // Earliest deadline; ties keep scheduling order
                let due = clock
                    .pending
                    .iter()
                    .enumerate()
                    .filter(|(_, t)| t.deadline <= target)
                    .min_by_key(|(_, t)| t.deadline)
                    .map(|(position, _)| position);

                match due {
                    Some(position) => {
                        let timer = clock.pending.remove(position);
                        clock.now = clock.now.max(timer.deadline);
                        Some(timer)
                    }
                    None => {
                        clock.now = target;
                        None
                    }
                }
            };

            match next {
                Some(timer) => {
                    crate::trace!("Manual timer {} fired", timer.handle.id());
                    (timer.callback)();
                    fired += 1;
                }
                None => return fired,
            }
        }
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay: Duration, callback: TimerCallback) -> TimerHandle {
        let handle = TimerHandle::new();
        let mut clock = self.clock.lock();
        clock.pending.retain(|t| !t.handle.is_cancelled());
        let deadline = clock.now + delay;
        clock.pending.push(PendingTimer {
            deadline,
            handle: handle.clone(),
            callback,
        });
        handle
    }
}

#[cfg(test)]
#[path = "manual_test.rs"]
mod tests;
