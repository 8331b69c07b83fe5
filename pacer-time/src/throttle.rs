// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::ThrottleConfig;
use crate::pending::Core;
use core::fmt;
use core::time::Duration;
use pacer_core::Result;
use pacer_runtime::scheduler::Scheduler;
use std::sync::Arc;

#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
use crate::DefaultScheduler;

/// Runs a callback at most once per window of `delay`.
///
/// This is **trailing throttle with first-call arguments**:
/// - A call on an idle wrapper opens a window and schedules the function to
///   run `delay` later with that call's arguments
/// - Calls made while the window is open are dropped, not queued
/// - When the function runs the window closes, and the next call opens a new one
///
/// Calls spaced at least `delay` apart each produce their own invocation.
///
/// # Example
///
/// ```rust
/// use pacer_time::Throttle;
/// use pacer_test_utils::{CallRecorder, VirtualScheduler};
/// use std::time::Duration;
///
/// let scheduler = VirtualScheduler::new();
/// let resized = CallRecorder::new();
/// let on_resize = Throttle::with_scheduler(resized.callback(), Duration::from_millis(100), scheduler.clone());
///
/// on_resize.call((800, 600));
/// on_resize.call((1024, 768));
/// scheduler.advance(Duration::from_millis(100));
///
/// assert_eq!(resized.args(), vec![(800, 600)]);
/// ```
pub struct Throttle<A, R, S: Scheduler> {
    core: Arc<Core<A, R, S>>,
}

impl<A, R, S> Throttle<A, R, S>
where
    A: Send + 'static,
    R: Send + 'static,
    S: Scheduler,
{
    pub fn with_scheduler<F>(f: F, delay: Duration, scheduler: S) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self {
            core: Arc::new(Core::new("throttle", Box::new(f), delay, scheduler)),
        }
    }

    /// # Errors
    /// Returns [`PacerError::InvalidConfiguration`](pacer_core::PacerError::InvalidConfiguration)
    /// for a negative delay.
    pub fn from_config<F>(f: F, config: &ThrottleConfig, scheduler: S) -> Result<Self>
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Ok(Self::with_scheduler(f, config.delay()?, scheduler))
    }

    /// Open a window with `args`, or drop the call if one is already open.
    pub fn call(&self, args: A) {
        let core = &self.core;
        let mut state = core.state.lock();
        if state.is_pending() {
            pacer_core::trace!("throttle: call dropped inside open window");
            return;
        }

        state.arm(args, |generation| core.schedule(generation));
        pacer_core::debug!(
            "throttle: window opened for {:?} (generation {})",
            core.interval(),
            state.generation()
        );
    }

    /// Close the open window without invoking. Returns whether one was open.
    pub fn cancel(&self) -> bool {
        self.core.cancel()
    }

    /// Invoke the captured call now and close the window.
    pub fn flush(&self) -> bool {
        self.core.flush()
    }

    pub fn is_pending(&self) -> bool {
        self.core.is_pending()
    }

    pub fn last_output(&self) -> Option<R>
    where
        R: Clone,
    {
        self.core.last_output()
    }

    pub fn delay(&self) -> Duration {
        self.core.interval()
    }
}

#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
impl<A, R> Throttle<A, R, DefaultScheduler>
where
    A: Send + 'static,
    R: Send + 'static,
{
    pub fn new<F>(f: F, delay: Duration) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self::with_scheduler(f, delay, DefaultScheduler::default())
    }
}

/// Wrap `f` in a [`Throttle`] on the default runtime.
#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
pub fn throttle<A, R, F>(f: F, delay: Duration) -> Throttle<A, R, DefaultScheduler>
where
    A: Send + 'static,
    R: Send + 'static,
    F: Fn(A) -> R + Send + Sync + 'static,
{
    Throttle::new(f, delay)
}

impl<A, R, S: Scheduler> Clone for Throttle<A, R, S> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}

impl<A, R, S: Scheduler> fmt::Debug for Throttle<A, R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.core, f)
    }
}
