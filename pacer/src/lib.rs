// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! # Pacer
//!
//! Call-rate control for plain Rust callbacks: debounce, debounce-immediate
//! and throttle.
//!
//! ## Overview
//!
//! A wrapper owns a function and at most one pending timer. Callers invoke
//! the wrapper instead of the function; the wrapper decides when, and with
//! which arguments, the function actually runs.
//!
//! | Wrapper | Runs | With |
//! |---|---|---|
//! | [`Debounce`] | `wait` after the last call of a burst | the last call's arguments |
//! | [`DebounceImmediate`] | on the first call of a burst (optional) and `wait` after the last | first, then last call's arguments |
//! | [`Throttle`] | `delay` after the first call of a window | the first call's arguments |
//!
//! Timers are tasks on the default async runtime (`runtime-tokio` by default,
//! or `runtime-smol`). Any [`Scheduler`] can be injected instead through the
//! `with_scheduler` constructors, which is how the test suites drive wrappers
//! on a virtual clock.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pacer::prelude::*;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() {
//!     let search = debounce_immediate(
//!         |query: String| println!("searching for {query}"),
//!         Duration::from_millis(250),
//!         true,
//!     );
//!
//!     for query in ["r", "ru", "rus", "rust"] {
//!         search.call(query.to_string());
//!     }
//!
//!     tokio::time::sleep(Duration::from_millis(300)).await;
//! }
//! ```

pub use pacer_core::{attempt, IntoPacerError, PacerError, Result, ResultExt};
pub use pacer_runtime::scheduler::{Scheduler, TimerHandle, TimerScheduler};
pub use pacer_time::{
    Debounce, DebounceConfig, DebounceImmediate, Throttle, ThrottleConfig, DEFAULT_WAIT,
};

#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
pub use pacer_time::{debounce, debounce_immediate, throttle, DefaultRuntime, DefaultScheduler};

/// Prelude module for convenient imports
pub mod prelude {
    pub use pacer_time::prelude::*;
}
