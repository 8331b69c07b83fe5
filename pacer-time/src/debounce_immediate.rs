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

/// Debounce that can also fire on the leading edge of a burst.
///
/// With `immediate == false` this behaves exactly like [`Debounce`](crate::Debounce).
///
/// With `immediate == true`:
/// - The first call of a burst (nothing pending) runs the function before
///   `call` returns, with that call's arguments, and starts the quiet period
/// - Further calls inside the quiet period restart it without running anything
/// - When the quiet period elapses the function runs again with the last
///   call's arguments, and the next call opens a new burst
///
/// A burst of a single call therefore runs the function twice: once
/// immediately and once `wait` later, both with the same arguments.
///
/// The function may call back into its own wrapper while running on the
/// leading edge; such calls join the burst.
///
/// # Example
///
/// ```rust
/// use pacer_time::DebounceImmediate;
/// use pacer_test_utils::{CallRecorder, VirtualScheduler};
/// use std::time::Duration;
///
/// let scheduler = VirtualScheduler::new();
/// let searches = CallRecorder::new();
/// let search = DebounceImmediate::with_scheduler(
///     searches.callback(),
///     Duration::from_millis(100),
///     true,
///     scheduler.clone(),
/// );
///
/// search.call("r");
/// assert_eq!(searches.args(), vec!["r"]);
///
/// search.call("ru");
/// search.call("rust");
/// scheduler.advance(Duration::from_millis(100));
///
/// assert_eq!(searches.args(), vec!["r", "rust"]);
/// ```
pub struct DebounceImmediate<A, R, S: Scheduler> {
    core: Arc<Core<A, R, S>>,
    immediate: bool,
}

impl<A, R, S> DebounceImmediate<A, R, S>
where
    A: Clone + Send + 'static,
    R: Send + 'static,
    S: Scheduler,
{
    pub fn with_scheduler<F>(f: F, wait: Duration, immediate: bool, scheduler: S) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self {
            core: Arc::new(Core::new(
                "debounce_immediate",
                Box::new(f),
                wait,
                scheduler,
            )),
            immediate,
        }
    }

    /// Build from serialized settings; `config.immediate` selects the leading edge.
    ///
    /// # Errors
    /// Returns [`PacerError::InvalidConfiguration`](pacer_core::PacerError::InvalidConfiguration)
    /// for a negative wait.
    pub fn from_config<F>(f: F, config: &DebounceConfig, scheduler: S) -> Result<Self>
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Ok(Self::with_scheduler(
            f,
            config.wait()?,
            config.immediate,
            scheduler,
        ))
    }

    pub fn call(&self, args: A) {
        let core = &self.core;
        let mut state = core.state.lock();

        let opens_burst = self.immediate && !state.is_pending() && !state.leading_edge;
        if !opens_burst {
            let superseded = state.arm(args, |generation| core.schedule(generation));
            pacer_core::trace!(
                "debounce_immediate: rescheduled (generation {}, superseded: {})",
                state.generation(),
                superseded
            );
            return;
        }

        // Calls arriving while the leading invocation runs join the burst
        state.leading_edge = true;
        drop(state);

        pacer_core::debug!("debounce_immediate: leading edge");
        let mut guard = LeadingEdge {
            core,
            trailing: None,
        };
        core.invoke(args.clone());
        guard.trailing = Some(args);
    }

    pub fn cancel(&self) -> bool {
        self.core.cancel()
    }

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

    pub fn wait(&self) -> Duration {
        self.core.interval()
    }

    pub const fn is_immediate(&self) -> bool {
        self.immediate
    }
}

#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
impl<A, R> DebounceImmediate<A, R, DefaultScheduler>
where
    A: Clone + Send + 'static,
    R: Send + 'static,
{
    pub fn new<F>(f: F, wait: Duration, immediate: bool) -> Self
    where
        F: Fn(A) -> R + Send + Sync + 'static,
    {
        Self::with_scheduler(f, wait, immediate, DefaultScheduler::default())
    }
}

/// Wrap `f` in a [`DebounceImmediate`] on the default runtime.
#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
pub fn debounce_immediate<A, R, F>(
    f: F,
    wait: Duration,
    immediate: bool,
) -> DebounceImmediate<A, R, DefaultScheduler>
where
    A: Clone + Send + 'static,
    R: Send + 'static,
    F: Fn(A) -> R + Send + Sync + 'static,
{
    DebounceImmediate::new(f, wait, immediate)
}

/// Ends a leading-edge invocation: clears the flag and, unless the
/// invocation unwound, arms the trailing timer in the same critical section.
struct LeadingEdge<'a, A, R, S>
where
    A: Send + 'static,
    R: Send + 'static,
    S: Scheduler,
{
    core: &'a Arc<Core<A, R, S>>,
    /// Set once the leading invocation returned
    trailing: Option<A>,
}

impl<A, R, S> Drop for LeadingEdge<'_, A, R, S>
where
    A: Send + 'static,
    R: Send + 'static,
    S: Scheduler,
{
    fn drop(&mut self) {
        let core = self.core;
        let mut state = core.state.lock();
        state.leading_edge = false;

        // A call made during the leading invocation already armed the trailing timer
        if let Some(args) = self.trailing.take() {
            if !state.is_pending() {
                state.arm(args, |generation| core.schedule(generation));
            }
        }
    }
}

impl<A, R, S: Scheduler> Clone for DebounceImmediate<A, R, S> {
    fn clone(&self) -> Self {
        Self {
            core: Arc::clone(&self.core),
            immediate: self.immediate,
        }
    }
}

impl<A, R, S: Scheduler> fmt::Debug for DebounceImmediate<A, R, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DebounceImmediate")
            .field("immediate", &self.immediate)
            .field("core", &self.core)
            .finish()
    }
}
