// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Deferred, cancellable callbacks.
//!
//! A [`Scheduler`] runs a callback once after a delay. The returned
//! [`TimerHandle`] cancels it; a cancelled callback never runs. Callbacks are
//! never run synchronously from [`Scheduler::schedule`], not even with a zero
//! delay.
//!
//! [`TimerScheduler`] implements the trait on top of any [`Timer`] by spawning
//! one [`PacerTask`] per scheduled callback. Tests inject a virtual-clock
//! scheduler instead.

use crate::timer::Timer;
use core::fmt::Debug;
use core::time::Duration;
use pacer_core::PacerTask;

/// Handle to a callback registered with a [`Scheduler`].
///
/// Dropping a handle is scheduler-specific; [`PacerTask`] cancels on drop.
pub trait TimerHandle: Debug + Send + Sync + 'static {
    /// Prevent the callback from running. Idempotent; a no-op once it ran.
    fn cancel(&self);

    /// Returns `true` once [`cancel`](Self::cancel) was called.
    fn is_cancelled(&self) -> bool;
}

pub trait Scheduler: Clone + Debug + Send + Sync + 'static {
    type Handle: TimerHandle;

    /// Run `callback` once, `delay` from now, unless the handle is cancelled first.
    fn schedule<F>(&self, delay: Duration, callback: F) -> Self::Handle
    where
        F: FnOnce() + Send + 'static;
}

impl TimerHandle for PacerTask {
    fn cancel(&self) {
        PacerTask::cancel(self);
    }

    fn is_cancelled(&self) -> bool {
        PacerTask::is_cancelled(self)
    }
}

/// [`Scheduler`] backed by a runtime [`Timer`].
///
/// Each callback gets its own task that races the timer's sleep future
/// against the task's cancellation token.
///
/// # Example
///
#[cfg_attr(feature = "runtime-tokio", doc = "```rust")]
#[cfg_attr(not(feature = "runtime-tokio"), doc = "```ignore")]
/// use pacer_runtime::impls::tokio::TokioTimer;
/// use pacer_runtime::scheduler::{Scheduler, TimerHandle, TimerScheduler};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() {
/// let scheduler = TimerScheduler::new(TokioTimer);
/// let handle = scheduler.schedule(Duration::from_millis(50), || println!("fired"));
///
/// handle.cancel();
/// # }
/// ```
#[derive(Clone, Debug, Default)]
pub struct TimerScheduler<TM> {
    timer: TM,
}

impl<TM: Timer> TimerScheduler<TM> {
    pub fn new(timer: TM) -> Self {
        Self { timer }
    }
}

#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
impl<TM: Timer> Scheduler for TimerScheduler<TM> {
    type Handle = PacerTask;

    fn schedule<F>(&self, delay: Duration, callback: F) -> Self::Handle
    where
        F: FnOnce() + Send + 'static,
    {
        use futures::future::{select, Either};
        use futures::pin_mut;

        let timer = self.timer.clone();
        PacerTask::spawn(move |cancel| async move {
            let sleep = timer.sleep_future(delay);
            let cancelled = cancel.cancelled();
            pin_mut!(sleep, cancelled);

            if let Either::Left(_) = select(sleep, cancelled).await {
                // The sleep and a late cancel() can complete in the same poll
                if !cancel.is_cancelled() {
                    callback();
                }
            }
        })
    }
}
