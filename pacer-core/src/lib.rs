// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions, clippy::doc_markdown)]
//! Building blocks shared by the pacer crates.
//!
//! - [`CancellationToken`] - runtime-agnostic cancellation signal
//! - [`PacerTask`] - background task that is cancelled when dropped
//! - [`attempt`] - run a callback and capture a panic as a [`PacerError`]
//! - logging shim macros (`debug!`, `trace!`, `warn!`) that forward to `tracing`
//!   when the `tracing` feature is enabled

pub mod attempt;
pub mod cancellation_token;
pub mod logging;
pub mod pacer_task;

pub use self::attempt::attempt;
pub use self::cancellation_token::{CancellationToken, Cancelled};
pub use self::pacer_task::PacerTask;
pub use pacer_error::{IntoPacerError, PacerError, Result, ResultExt};
