// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::config::DebounceConfig;
use crate::pending::Core;
use core::fmt;
use core::time::Duration;
use pacer_core::Result;
use pacer_runtime::scheduler::Scheduler;
use std::sync::Arc;

#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
use crate::DefaultScheduler;

/// Trailing-edge debounce around a plain callback.
///
/// Every [`call`](Self::call) restarts a quiet period of `wait`. The wrapped
/// function runs once the quiet period elapses without another call, with the
/// arguments of the last call. Rapid calls therefore collapse into a single
/// invocation, and a wrapper that is never called never invokes anything.
///
/// A zero `wait` still defers the invocation to the scheduler; `call` never
/// runs the function itself.
///
/// Handles are cheap to clone and share one pending call. Dropping the last
/// handle cancels it.
///
/// # Example
///
/// ```rust
/// use pacer_time::Debounce;
/// use pacer_test_utils::{CallRecorder, VirtualScheduler};
/// use std::time::Duration;
///
/// let scheduler = VirtualScheduler::new();
/// let saved = CallRecorder::new();
/// let save = Debounce::with_scheduler(saved.callback(), Duration::from_millis(100), scheduler.clone());
///
/// save.call("draft 1");
/// save.call("draft 2");
/// scheduler.advance(Duration::from_millis(100));
///
/// assert_eq!(saved.args(), vec!["draft 2"]);
/// ```
pub struct Debounce<A, R, S: Scheduler> {
    core: Arc<Core<A, R, S>>,
}

impl<A, R, S> Debounce<A, R, S>
where
    A: Send + 'static,
    R: Send + 'static,
    S: Scheduler,
{
    pub fn with_scheduler<F>(f: F, wait: Duration, scheduler: S) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self {
            core: Arc::new(Core::new("debounce", Box::new(f), wait, scheduler)),
        }
    }

    /// Build from serialized settings, rejecting a negative `wait_ms`.
    ///
    /// # Errors
    /// Returns [`PacerError::InvalidConfiguration`](pacer_core::PacerError::InvalidConfiguration)
    /// for a negative wait.
    pub fn from_config<F>(f: F, config: &DebounceConfig, scheduler: S) -> Result<Self>
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Ok(Self::with_scheduler(f, config.wait()?, scheduler))
    }

    /// Record a call attempt; the function runs `wait` after the last one.
    pub fn call(&self, args: A) {
        let core = &self.core;
        let mut state = core.state.lock();
        if state.arm(args, |generation| core.schedule(generation)) {
            pacer_core::trace!(
                "debounce: pending call superseded (generation {})",
                state.generation()
            );
        } else {
            pacer_core::debug!(
                "debounce: scheduled after {:?} (generation {})",
                core.interval(),
                state.generation()
            );
        }
    }

    /// Drop the pending call, if any. Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        self.core.cancel()
    }

    /// Run the pending call now instead of at the end of the quiet period.
    ///
    /// Returns `false`, without invoking anything, when nothing was pending.
    pub fn flush(&self) -> bool {
        self.core.flush()
    }

    pub fn is_pending(&self) -> bool {
        self.core.is_pending()
    }

    /// Result of the most recent completed invocation.
    pub fn last_output(&self) -> Option<R>
    where
        R: Clone,
    {
        self.core.last_output()
    }

    pub fn wait(&self) -> Duration {
        self.core.interval()
    }
}

#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
impl<A, R> Debounce<A, R, DefaultScheduler>
where
    A: Send + 'static,
    R: Send + 'static,
{
    /// Debounce on the default runtime's scheduler.
    pub fn new<F>(f: F, wait: Duration) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self::with_scheduler(f, wait, DefaultScheduler::default())
    }
}

/// Wrap `f` in a [`Debounce`] on the default runtime.
///
/// Must be called from within that runtime; timers are spawned as tasks.
#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
pub fn debounce<A, R, F>(f: F, wait: Duration) -> Debounce<A, R, DefaultScheduler>
where
    A: Send + 'static,
    R: Send + 'static,
    F: Fn(A) -> R + Send + Sync + 'static,
{
    Debounce::new(f, wait)
}

impl<A, R, S: Scheduler> Clone for Debounce<A, R, S> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
        }
    }
}

impl<A, R, S: Scheduler> fmt::Debug for Debounce<A, R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.core, f)
    }
}
