// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

#![allow(clippy::multiple_crate_versions)]
//! Error types for the pacer call-rate control library
//!
//! Calls to a debounced or throttled wrapper never fail: they are fire-and-forget.
//! Errors surface in two places only:
//!
//! - at construction time, when a configuration value is rejected
//! - when a wrapped callback is executed through [`attempt`](../pacer_core/fn.attempt.html)
//!   and panics
//!
//! # Examples
//!
//! ```
//! use pacer_error::{PacerError, Result};
//!
//! fn parse_wait(ms: i64) -> Result<u64> {
//!     u64::try_from(ms).map_err(|_| PacerError::invalid_configuration("wait_ms", "must not be negative"))
//! }
//!
//! assert!(parse_wait(-1).is_err());
//! ```

/// Root error type for all pacer operations
#[derive(Debug, thiserror::Error)]
pub enum PacerError {
    /// A wrapper was configured with a value it cannot honour
    ///
    /// Raised eagerly when the wrapper is built, never when it fires.
    #[error("Invalid configuration for `{parameter}`: {reason}")]
    InvalidConfiguration {
        /// Name of the rejected parameter
        parameter: String,
        /// Why the value was rejected
        reason: String,
    },

    /// User-provided callback panicked
    #[error("User callback panicked: {context}")]
    CallbackPanic {
        /// The panic payload, when it could be rendered as text
        context: String,
    },

    /// Custom error from user code
    #[error("User error: {0}")]
    UserError(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl PacerError {
    /// Create an invalid configuration error for the named parameter
    pub fn invalid_configuration(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            parameter: parameter.into(),
            reason: reason.into(),
        }
    }

    /// Create a callback panic error with the given context
    pub fn callback_panic(context: impl Into<String>) -> Self {
        Self::CallbackPanic {
            context: context.into(),
        }
    }

    /// Wrap a user error
    pub fn user_error(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::UserError(Box::new(error))
    }

    /// Check if this is a recoverable error
    ///
    /// A panicking callback leaves its wrapper usable, so the next call may succeed.
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::CallbackPanic { .. })
    }

    /// Check if this error indicates a permanent failure
    #[must_use]
    pub const fn is_permanent(&self) -> bool {
        matches!(self, Self::InvalidConfiguration { .. } | Self::UserError(_))
    }
}

/// Specialized Result type for pacer operations
///
/// # Examples
///
/// ```
/// use pacer_error::Result;
///
/// fn build() -> Result<&'static str> {
///     Ok("built")
/// }
/// ```
pub type Result<T> = std::result::Result<T, PacerError>;

/// Extension trait for converting errors into `PacerError`
pub trait IntoPacerError {
    /// Convert this error into a `PacerError` with additional context
    fn into_pacer_error(self, context: &str) -> PacerError;

    /// Convert this error into a `PacerError` without additional context
    fn into_pacer(self) -> PacerError
    where
        Self: Sized,
    {
        self.into_pacer_error("")
    }
}

impl<E: std::error::Error + Send + Sync + 'static> IntoPacerError for E {
    fn into_pacer_error(self, context: &str) -> PacerError {
        if context.is_empty() {
            PacerError::user_error(self)
        } else {
            PacerError::UserError(format!("{context}: {self}").into())
        }
    }
}

/// Helper trait for adding context to `Result`s
pub trait ResultExt<T> {
    /// Add context to an error
    ///
    /// # Errors
    /// Returns `Err(PacerError)` if the underlying result is `Err`.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context to an error using a closure (lazy evaluation)
    ///
    /// # Errors
    /// Returns `Err(PacerError)` if the underlying result is `Err`.
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<PacerError>,
{
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| attach_context(context.into(), e.into()))
    }

    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| attach_context(f(), e.into()))
    }
}

fn attach_context(context: String, error: PacerError) -> PacerError {
    match error {
        PacerError::UserError(inner) => PacerError::UserError(format!("{context}: {inner}").into()),
        PacerError::InvalidConfiguration { parameter, reason } => PacerError::InvalidConfiguration {
            parameter,
            reason: format!("{context}: {reason}"),
        },
        other => other,
    }
}
