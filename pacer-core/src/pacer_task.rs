// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Runtime-agnostic task spawning with cooperative cancellation.

use crate::CancellationToken;
#[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
use core::future::Future;

/// Runtime-agnostic task handle with automatic cancellation on drop.
///
/// `PacerTask` spawns a background task on the configured runtime and hands
/// it a [`CancellationToken`]. Dropping the handle, or calling
/// [`cancel`](Self::cancel), signals the token; the task is expected to
/// watch it and return early.
///
/// # Runtime Support
///
/// - **Tokio**: `tokio::spawn` (default, must be called inside a Tokio runtime)
/// - **smol**: `smol::spawn`
///
/// # Example
///
/// ```rust
/// use pacer_core::PacerTask;
///
/// # #[tokio::main]
/// # async fn main() {
/// let task = PacerTask::spawn(|cancel| async move {
///     cancel.cancelled().await;
///     println!("Graceful shutdown");
/// });
///
/// // Task cancels on drop
/// drop(task);
/// # }
/// ```
#[derive(Debug)]
pub struct PacerTask {
    cancel: CancellationToken,
}

impl PacerTask {
    /// Spawn a background task with cancellation support.
    ///
    /// # Panics
    ///
    /// With `runtime-tokio`, panics when called outside a Tokio runtime.
    #[cfg(any(feature = "runtime-tokio", feature = "runtime-smol"))]
    pub fn spawn<F, Fut>(f: F) -> Self
    where
        F: FnOnce(CancellationToken) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let future = f(cancel.clone());

        #[cfg(feature = "runtime-tokio")]
        tokio::spawn(future);

        #[cfg(all(feature = "runtime-smol", not(feature = "runtime-tokio")))]
        smol::spawn(future).detach();

        Self { cancel }
    }

    /// Signal the task to stop.
    ///
    /// Does not wait for the task; it stops at its next cancellation checkpoint.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Returns `true` once [`cancel`](Self::cancel) was called or the handle was dropped.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

impl Drop for PacerTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
