// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Helpers for tests that run wrappers on a real Tokio scheduler with a
//! paused clock (`#[tokio::test(start_paused = true)]`).

use crate::CallRecorder;
use std::time::Duration;
use tokio::time::sleep;

/// Let `ms` of (paused) Tokio time pass, running every timer due before then.
pub async fn advance_ms(ms: u64) {
    sleep(Duration::from_millis(ms)).await;
}

/// Assert the recorder gains no calls over the next `timeout_ms`.
pub async fn assert_no_new_calls<A>(recorder: &CallRecorder<A>, timeout_ms: u64) {
    let before = recorder.count();
    advance_ms(timeout_ms).await;
    let after = recorder.count();
    assert_eq!(
        before, after,
        "Unexpected invocation: expected no new calls within {timeout_ms} ms"
    );
}
