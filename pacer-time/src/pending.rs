// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Per-wrapper state shared by the debounce and throttle wrappers.
//!
//! `PendingCall` is the IDLE/PENDING state machine: at most one armed timer,
//! plus the arguments it will deliver. Every arm bumps a generation counter
//! and the timer callback carries the generation it was armed with, so a
//! callback that lost a race against `cancel`/re-arm finds a stale
//! generation and does nothing.

use core::fmt;
use core::time::Duration;
use pacer_runtime::scheduler::{Scheduler, TimerHandle};
use parking_lot::Mutex;
use std::sync::Arc;

pub(crate) type Callback<A, R> = Box<dyn Fn(A) -> R + Send + Sync>;

pub(crate) struct PendingCall<A, H> {
    generation: u64,
    slot: Option<(A, H)>,
    /// A leading-edge invocation is running outside the lock
    pub(crate) leading_edge: bool,
}

impl<A, H: TimerHandle> PendingCall<A, H> {
    pub(crate) const fn new() -> Self {
        Self {
            generation: 0,
            slot: None,
            leading_edge: false,
        }
    }

    pub(crate) const fn is_pending(&self) -> bool {
        self.slot.is_some()
    }

    pub(crate) const fn generation(&self) -> u64 {
        self.generation
    }

    /// Cancel the armed timer, returning the arguments it would have delivered.
    pub(crate) fn disarm(&mut self) -> Option<A> {
        self.slot.take().map(|(args, handle)| {
            handle.cancel();
            args
        })
    }

    /// Replace whatever is pending with a fresh timer for `args`.
    ///
    /// Returns `true` when a previously armed timer was superseded.
    pub(crate) fn arm(&mut self, args: A, schedule: impl FnOnce(u64) -> H) -> bool {
        let superseded = self.disarm().is_some();
        self.generation = self.generation.wrapping_add(1);
        let handle = schedule(self.generation);
        self.slot = Some((args, handle));
        superseded
    }

    /// Claim the arguments of the timer armed as `generation`, if it is still current.
    pub(crate) fn take_for(&mut self, generation: u64) -> Option<A> {
        if self.generation != generation {
            return None;
        }
        self.slot.take().map(|(args, _fired)| args)
    }
}

/// Everything one wrapper instance owns. Wrapper handles are `Arc`s of this.
pub(crate) struct Core<A, R, S: Scheduler> {
    kind: &'static str,
    func: Callback<A, R>,
    interval: Duration,
    scheduler: S,
    pub(crate) state: Mutex<PendingCall<A, S::Handle>>,
    last_output: Mutex<Option<R>>,
}

impl<A, R, S> Core<A, R, S>
where
    A: Send + 'static,
    R: Send + 'static,
    S: Scheduler,
{
    pub(crate) fn new(
        kind: &'static str,
        func: Callback<A, R>,
        interval: Duration,
        scheduler: S,
    ) -> Self {
        Self {
            kind,
            func,
            interval,
            scheduler,
            state: Mutex::new(PendingCall::new()),
            last_output: Mutex::new(None),
        }
    }

    pub(crate) const fn interval(&self) -> Duration {
        self.interval
    }

    /// Ask the scheduler for a timer that fires `generation` after `interval`.
    ///
    /// The callback only holds a weak reference: once every wrapper handle is
    /// gone the timer has nothing left to invoke.
    pub(crate) fn schedule(self: &Arc<Self>, generation: u64) -> S::Handle {
        let core = Arc::downgrade(self);
        self.scheduler.schedule(self.interval, move || {
            if let Some(core) = core.upgrade() {
                core.fire(generation);
            }
        })
    }

    fn fire(&self, generation: u64) {
        let args = self.state.lock().take_for(generation);
        match args {
            Some(args) => {
                pacer_core::debug!("{}: timer fired (generation {})", self.kind, generation);
                self.invoke(args);
            }
            None => {
                pacer_core::trace!(
                    "{}: stale timer ignored (generation {})",
                    self.kind,
                    generation
                );
            }
        }
    }

    /// Run the wrapped function. Must be called without holding `state`.
    pub(crate) fn invoke(&self, args: A) {
        let output = (self.func)(args);
        *self.last_output.lock() = Some(output);
    }

    pub(crate) fn cancel(&self) -> bool {
        let cancelled = self.state.lock().disarm().is_some();
        if cancelled {
            pacer_core::debug!("{}: pending call cancelled", self.kind);
        }
        cancelled
    }

    pub(crate) fn flush(&self) -> bool {
        let args = self.state.lock().disarm();
        match args {
            Some(args) => {
                pacer_core::debug!("{}: pending call flushed", self.kind);
                self.invoke(args);
                true
            }
            None => false,
        }
    }

    pub(crate) fn is_pending(&self) -> bool {
        self.state.lock().is_pending()
    }

    pub(crate) fn last_output(&self) -> Option<R>
    where
        R: Clone,
    {
        self.last_output.lock().clone()
    }
}

impl<A, R, S: Scheduler> Drop for Core<A, R, S> {
    fn drop(&mut self) {
        if let Some((_args, handle)) = self.state.get_mut().slot.take() {
            handle.cancel();
        }
    }
}

impl<A, R, S: Scheduler> fmt::Debug for Core<A, R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.lock();
        f.debug_struct(self.kind)
            .field("interval", &self.interval)
            .field("pending", &state.is_pending())
            .field("generation", &state.generation())
            .field("scheduler", &self.scheduler)
            .finish_non_exhaustive()
    }
}
