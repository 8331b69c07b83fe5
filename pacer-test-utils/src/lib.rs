// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Test utilities for the pacer workspace.
//!
//! Designed for development and testing only, not for production code.
//!
//! # Key Types
//!
//! ## `VirtualScheduler`
//!
//! A [`Scheduler`](pacer_runtime::scheduler::Scheduler) driven by a manual clock.
//! Nothing fires until the test advances time, so debounce and throttle
//! behaviour can be asserted at exact instants:
//!
//! ```rust
//! use pacer_runtime::scheduler::Scheduler;
//! use pacer_test_utils::VirtualScheduler;
//! use std::time::Duration;
//!
//! let scheduler = VirtualScheduler::new();
//! let _handle = scheduler.schedule(Duration::from_millis(100), || println!("fired"));
//!
//! assert_eq!(scheduler.advance(Duration::from_millis(99)), 0);
//! assert_eq!(scheduler.advance(Duration::from_millis(1)), 1);
//! ```
//!
//! ## `CallRecorder`
//!
//! Collects the arguments (and, with a virtual clock, the instants) a wrapped
//! callback was invoked with.
//!
//! # Module Organization
//!
//! - `virtual_scheduler` - `VirtualScheduler` and `VirtualHandle`
//! - `call_recorder` - `CallRecorder` and `RecordedCall`
//! - `helpers` - async helpers for Tokio paused-clock tests

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
pub mod call_recorder;
pub mod helpers;
pub mod virtual_scheduler;

pub use call_recorder::{CallRecorder, RecordedCall};
pub use helpers::{advance_ms, assert_no_new_calls};
pub use virtual_scheduler::{VirtualHandle, VirtualScheduler};
