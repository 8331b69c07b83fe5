// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use core::any::Any;
use pacer_error::{PacerError, Result};
use std::panic::{self, AssertUnwindSafe};

/// Run `f(args)` and return its output, turning a panic into an error value.
///
/// Useful for callers that want a wrapped callback's failure as data instead
/// of an unwinding task.
///
/// # Errors
///
/// Returns [`PacerError::CallbackPanic`] carrying the panic message if `f` panics.
///
/// # Example
///
/// ```
/// use pacer_core::{attempt, PacerError};
///
/// assert_eq!(attempt(|x: i32| x * 2, 21).unwrap(), 42);
///
/// let err = attempt(|_: ()| -> i32 { panic!("no selector") }, ()).unwrap_err();
/// assert!(matches!(err, PacerError::CallbackPanic { .. }));
/// ```
pub fn attempt<A, R, F>(f: F, args: A) -> Result<R>
where
    F: FnOnce(A) -> R,
{
    panic::catch_unwind(AssertUnwindSafe(move || f(args))).map_err(|payload| {
        let context = panic_message(payload.as_ref());
        crate::warn!("attempt: callback panicked: {}", context);
        PacerError::callback_panic(context)
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
