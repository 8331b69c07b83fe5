// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::VirtualScheduler;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// One recorded invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedCall<A> {
    /// Virtual instant of the call, when the recorder has a clock
    pub at: Option<Duration>,
    pub args: A,
}

/// Records every invocation of the callback it hands out.
///
/// ```rust
/// use pacer_test_utils::CallRecorder;
///
/// let recorder = CallRecorder::new();
/// let callback = recorder.callback();
///
/// callback("first");
/// callback("second");
///
/// assert_eq!(recorder.args(), vec!["first", "second"]);
/// ```
#[derive(Debug)]
pub struct CallRecorder<A> {
    calls: Arc<Mutex<Vec<RecordedCall<A>>>>,
    clock: Option<VirtualScheduler>,
}

impl<A> Clone for CallRecorder<A> {
    fn clone(&self) -> Self {
        Self {
            calls: self.calls.clone(),
            clock: self.clock.clone(),
        }
    }
}

impl<A> Default for CallRecorder<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> CallRecorder<A> {
    pub fn new() -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            clock: None,
        }
    }

    /// Recorder that stamps each call with the scheduler's virtual time.
    pub fn with_clock(scheduler: &VirtualScheduler) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            clock: Some(scheduler.clone()),
        }
    }

    pub fn count(&self) -> usize {
        self.calls.lock().len()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, args: A) {
        let at = self.clock.as_ref().map(VirtualScheduler::now);
        self.calls.lock().push(RecordedCall { at, args });
    }
}

impl<A: Send + 'static> CallRecorder<A> {
    /// A callback that records its argument.
    pub fn callback(&self) -> impl Fn(A) + Send + Sync + 'static {
        let recorder = self.clone();
        move |args| recorder.record(args)
    }

    /// A callback that records its argument, then returns `f(&args)`.
    pub fn callback_returning<R, F>(&self, f: F) -> impl Fn(A) -> R + Send + Sync + 'static
    where
        F: Fn(&A) -> R + Send + Sync + 'static,
    {
        let recorder = self.clone();
        move |args| {
            let output = f(&args);
            recorder.record(args);
            output
        }
    }
}

impl<A: Clone> CallRecorder<A> {
    pub fn calls(&self) -> Vec<RecordedCall<A>> {
        self.calls.lock().clone()
    }

    pub fn args(&self) -> Vec<A> {
        self.calls.lock().iter().map(|call| call.args.clone()).collect()
    }

    pub fn last(&self) -> Option<A> {
        self.calls.lock().last().map(|call| call.args.clone())
    }

    /// `(virtual instant, args)` pairs; instants are zero without a clock.
    pub fn timeline(&self) -> Vec<(Duration, A)> {
        self.calls
            .lock()
            .iter()
            .map(|call| (call.at.unwrap_or_default(), call.args.clone()))
            .collect()
    }
}
