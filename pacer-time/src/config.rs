// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Serializable wrapper settings.
//!
//! Intervals are stored as signed milliseconds because that is how they
//! arrive from JSON, TOML or environment variables. They are validated when a
//! wrapper is built from them, never when it fires.

use core::time::Duration;
use pacer_core::{PacerError, Result};
use serde::{Deserialize, Serialize};

/// Default quiet period for the debounce wrappers.
pub const DEFAULT_WAIT: Duration = Duration::from_millis(300);

/// Settings for [`Debounce`](crate::Debounce) and [`DebounceImmediate`](crate::DebounceImmediate).
///
/// ```
/// use pacer_time::DebounceConfig;
/// use std::time::Duration;
///
/// let config: DebounceConfig = serde_json::from_str(r#"{ "immediate": true }"#).unwrap();
/// assert_eq!(config.wait().unwrap(), Duration::from_millis(300));
/// assert!(config.immediate);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebounceConfig {
    pub wait_ms: i64,
    /// Fire on the leading edge too (debounce-immediate only)
    pub immediate: bool,
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            wait_ms: 300,
            immediate: false,
        }
    }
}

impl DebounceConfig {
    /// The validated quiet period.
    ///
    /// # Errors
    /// Returns [`PacerError::InvalidConfiguration`] if `wait_ms` is negative.
    pub fn wait(&self) -> Result<Duration> {
        non_negative_millis("wait_ms", self.wait_ms)
    }
}

/// Settings for [`Throttle`](crate::Throttle). There is no default delay.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleConfig {
    pub delay_ms: i64,
}

impl ThrottleConfig {
    /// The validated window length.
    ///
    /// # Errors
    /// Returns [`PacerError::InvalidConfiguration`] if `delay_ms` is negative.
    pub fn delay(&self) -> Result<Duration> {
        non_negative_millis("delay_ms", self.delay_ms)
    }
}

fn non_negative_millis(parameter: &str, value: i64) -> Result<Duration> {
    u64::try_from(value).map(Duration::from_millis).map_err(|_| {
        PacerError::invalid_configuration(
            parameter,
            format!("must be a non-negative number of milliseconds, got {value}"),
        )
    })
}
