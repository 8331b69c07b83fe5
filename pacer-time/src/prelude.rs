// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Prelude module re-exporting the wrappers and their settings.
//!
//! ```ignore
//! use pacer_time::prelude::*;
//!
//! let save = debounce(|text: String| store(text), Duration::from_millis(300));
//! let scroll = throttle(|offset: f64| redraw(offset), Duration::from_millis(16));
//! ```

pub use crate::config::{DebounceConfig, ThrottleConfig};
pub use crate::debounce::Debounce;
pub use crate::debounce_immediate::DebounceImmediate;
pub use crate::throttle::Throttle;
pub use pacer_runtime::scheduler::{Scheduler, TimerHandle};

#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
pub use crate::debounce::debounce;
#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
pub use crate::debounce_immediate::debounce_immediate;
#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
pub use crate::throttle::throttle;
#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
pub use crate::DefaultScheduler;
