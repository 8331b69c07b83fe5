// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{scheduler::Scheduler, timer::Timer};

/// An async runtime as seen by the wrappers: its timer and the scheduler
/// built on it.
pub trait Runtime: 'static {
    type Timer: Timer + Default;
    /// Scheduler used by wrappers built without an explicit one
    type Scheduler: Scheduler + Default;
}
