// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::fmt;
use pacer_core::CancellationToken;
use pacer_runtime::scheduler::{Scheduler, TimerHandle};
use parking_lot::Mutex;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

type Callback = Box<dyn FnOnce() + Send>;

/// Deterministic scheduler with a manually advanced clock.
///
/// Time starts at zero and only moves through [`advance`](Self::advance),
/// [`advance_to`](Self::advance_to) or [`tick`](Self::tick). Due callbacks run
/// on the advancing thread, in due-time order, ties broken by scheduling
/// order. A callback may schedule further timers; those still fire within
/// the same `advance` when they fall due before its target, except
/// zero-delay timers, which wait for the next `tick` or `advance`.
///
/// Clones share one clock.
#[derive(Clone, Default)]
pub struct VirtualScheduler {
    state: Arc<Mutex<State>>,
}

#[derive(Default)]
struct State {
    now: Duration,
    next_id: u64,
    timers: BTreeMap<(Duration, u64), PendingTimer>,
}

struct PendingTimer {
    callback: Callback,
    token: CancellationToken,
    scheduled_at: Duration,
}

impl VirtualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual time elapsed since creation.
    pub fn now(&self) -> Duration {
        self.state.lock().now
    }

    /// Number of scheduled callbacks that are neither fired nor cancelled.
    pub fn pending_timers(&self) -> usize {
        self.state
            .lock()
            .timers
            .values()
            .filter(|timer| !timer.token.is_cancelled())
            .count()
    }

    /// Due time of the earliest live timer.
    pub fn next_due(&self) -> Option<Duration> {
        self.state
            .lock()
            .timers
            .iter()
            .find(|(_, timer)| !timer.token.is_cancelled())
            .map(|(&(due, _), _)| due)
    }

    /// Run every callback that is already due, without moving the clock.
    ///
    /// This is the "next scheduling opportunity" for zero-delay timers. A
    /// zero-delay timer scheduled by one of these callbacks runs on the
    /// following `tick`, so self-rescheduling work cannot spin here.
    pub fn tick(&self) -> usize {
        self.advance(Duration::ZERO)
    }

    /// Move the clock forward by `by`, firing due callbacks. Returns how many fired.
    ///
    /// A panicking callback unwinds out of this call; the scheduler stays usable.
    pub fn advance(&self, by: Duration) -> usize {
        let target = self.now() + by;
        self.advance_to(target)
    }

    /// Move the clock to `target` (no-op for instants in the past), firing due callbacks.
    pub fn advance_to(&self, target: Duration) -> usize {
        let first_new_id = self.state.lock().next_id;
        let mut fired = 0;

        while let Some(timer) = self.pop_due(target, first_new_id) {
            // Lock released: callbacks may schedule or cancel
            (timer.callback)();
            fired += 1;
        }

        let mut state = self.state.lock();
        if state.now < target {
            state.now = target;
        }
        fired
    }

    /// Keep advancing to the next due timer until none is left.
    pub fn run_until_idle(&self) -> usize {
        let mut fired = 0;
        while let Some(due) = self.next_due() {
            fired += self.advance_to(due);
        }
        fired
    }

    /// Earliest timer due by `target`. Zero-delay timers with an id of at
    /// least `first_new_id` were scheduled during this pass and are skipped.
    fn pop_due(&self, target: Duration, first_new_id: u64) -> Option<PendingTimer> {
        let mut state = self.state.lock();
        state.timers.retain(|_, timer| !timer.token.is_cancelled());

        let key = state
            .timers
            .iter()
            .take_while(|&(&(due, _), _)| due <= target)
            .find(|&(&(due, id), timer)| id < first_new_id || due > timer.scheduled_at)
            .map(|(&key, _)| key)?;

        if state.now < key.0 {
            state.now = key.0;
        }
        state.timers.remove(&key)
    }
}

impl Scheduler for VirtualScheduler {
    type Handle = VirtualHandle;

    fn schedule<F>(&self, delay: Duration, callback: F) -> Self::Handle
    where
        F: FnOnce() + Send + 'static,
    {
        let token = CancellationToken::new();
        let mut state = self.state.lock();
        let now = state.now;
        let due = now + delay;
        let id = state.next_id;
        state.next_id += 1;
        state.timers.insert(
            (due, id),
            PendingTimer {
                callback: Box::new(callback),
                token: token.clone(),
                scheduled_at: now,
            },
        );
        VirtualHandle { token }
    }
}

impl fmt::Debug for VirtualScheduler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct("VirtualScheduler")
            .field("now", &state.now)
            .field("timers", &state.timers.len())
            .finish()
    }
}

/// Handle returned by [`VirtualScheduler::schedule`]. Cancels on drop.
#[derive(Debug)]
pub struct VirtualHandle {
    token: CancellationToken,
}

impl TimerHandle for VirtualHandle {
    fn cancel(&self) {
        self.token.cancel();
    }

    fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

impl Drop for VirtualHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
