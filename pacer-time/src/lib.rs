// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Call-rate control for plain callbacks.
//!
//! Each wrapper owns a function and at most one pending timer:
//!
//! - **[`Debounce`]** - run once `wait` after the last call of a burst, with its arguments
//! - **[`DebounceImmediate`]** - optionally also run on the first call of a burst
//! - **[`Throttle`]** - run at most once per `delay`, with the first call's arguments
//!
//! Wrappers never block and never run the function from inside a timer-less
//! `call` (the leading edge of [`DebounceImmediate`] being the one exception).
//! Timers come from an injected [`Scheduler`](pacer_runtime::scheduler::Scheduler):
//! the default runtime's in production, a virtual clock in tests.
//!
//! Each wrapper also offers `cancel`, `flush`, `is_pending` and `last_output`.
//!
//! # Runtime Support
//!
//! - `runtime-tokio` (default) - timers are Tokio tasks
//! - `runtime-smol` - timers are smol tasks on `async-io` timers
//!
//! Without either feature only the `with_scheduler` constructors are available.
//!
//! # Example
//!
//! Driven by a paused Tokio clock, so it only runs with `runtime-tokio`.
//!
#![cfg_attr(feature = "runtime-tokio", doc = "```rust")]
#![cfg_attr(not(feature = "runtime-tokio"), doc = "```ignore")]
//! use pacer_time::prelude::*;
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! # #[tokio::main(flavor = "current_thread", start_paused = true)]
//! # async fn main() {
//! let saves = Arc::new(AtomicUsize::new(0));
//! let counter = saves.clone();
//! let save = debounce(
//!     move |_text: String| {
//!         counter.fetch_add(1, Ordering::SeqCst);
//!     },
//!     Duration::from_millis(300),
//! );
//!
//! save.call("h".to_string());
//! save.call("hello".to_string());
//! tokio::time::sleep(Duration::from_millis(301)).await;
//!
//! assert_eq!(saves.load(Ordering::SeqCst), 1);
//! # }
//! ```

mod config;
mod debounce;
mod debounce_immediate;
mod pending;
mod throttle;

pub mod prelude;

pub use config::{DebounceConfig, ThrottleConfig, DEFAULT_WAIT};
pub use debounce::Debounce;
pub use debounce_immediate::DebounceImmediate;
pub use throttle::Throttle;

#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
pub use debounce::debounce;
#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
pub use debounce_immediate::debounce_immediate;
#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
pub use throttle::throttle;

#[cfg(feature = "runtime-tokio")]
pub use pacer_runtime::impls::tokio::TokioRuntime as DefaultRuntime;

#[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
pub use pacer_runtime::impls::smol::SmolRuntime as DefaultRuntime;

/// Scheduler used by the free functions and the `new` constructors.
#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
pub type DefaultScheduler = <DefaultRuntime as pacer_runtime::runtime::Runtime>::Scheduler;
