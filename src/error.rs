//! Error types used by phasevisor.
//!
//! - [`ConfigError`] — a [`Config`](crate::Config) that cannot drive a toggling loop.
//! - [`RuntimeError`] — failures building or shutting down an actor.
//! - [`WaitError`] — bounded waits that gave up.
//!
//! All enums provide `as_label` (stable snake_case for logs/metrics) and
//! `as_message` helpers.

use std::time::Duration;
use thiserror::Error;

/// # Invalid configuration.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Lower interval bound is above the upper bound.
    #[error("interval min {min:?} exceeds max {max:?}")]
    InvalidInterval {
        /// Configured lower bound.
        min: Duration,
        /// Configured upper bound.
        max: Duration,
    },

    /// Polling tick must be non-zero.
    #[error("tick must be greater than zero")]
    ZeroTick,

    /// Upper interval bound does not fit in `u32` milliseconds.
    #[error("interval max {max:?} is too large")]
    IntervalTooLarge {
        /// Configured upper bound.
        max: Duration,
    },
}

impl ConfigError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use phasevisor::ConfigError;
    ///
    /// assert_eq!(ConfigError::ZeroTick.as_label(), "config_zero_tick");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::InvalidInterval { .. } => "config_invalid_interval",
            ConfigError::ZeroTick => "config_zero_tick",
            ConfigError::IntervalTooLarge { .. } => "config_interval_too_large",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            ConfigError::InvalidInterval { min, max } => {
                format!("invalid interval: min={min:?} max={max:?}")
            }
            ConfigError::ZeroTick => "tick is zero".to_string(),
            ConfigError::IntervalTooLarge { max } => format!("interval too large: max={max:?}"),
        }
    }
}

/// # Errors produced by the actor runtime.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// Configuration rejected at build time.
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    /// No tokio runtime was available to host the toggling loops.
    #[error("no tokio runtime available; build inside a runtime or pass a handle")]
    NoRuntime,

    /// Shutdown grace period was exceeded; some toggling loops were aborted.
    #[error("shutdown timeout {grace:?} exceeded; {stuck} loop(s) still running; forcing termination")]
    GraceExceeded {
        /// The configured grace duration.
        grace: Duration,
        /// Number of loops that did not stop in time.
        stuck: usize,
    },
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use phasevisor::RuntimeError;
    /// use std::time::Duration;
    ///
    /// let err = RuntimeError::GraceExceeded { grace: Duration::from_secs(5), stuck: 1 };
    /// assert_eq!(err.as_label(), "runtime_grace_exceeded");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::Config(_) => "runtime_invalid_config",
            RuntimeError::NoRuntime => "runtime_missing",
            RuntimeError::GraceExceeded { .. } => "runtime_grace_exceeded",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            RuntimeError::Config(e) => e.as_message(),
            RuntimeError::NoRuntime => "no tokio runtime".to_string(),
            RuntimeError::GraceExceeded { grace, stuck } => {
                format!("grace exceeded after {grace:?}; stuck loops={stuck}")
            }
        }
    }
}

/// # Errors produced by bounded waits.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WaitError {
    /// Target phase was not observed within the wait budget.
    #[error("timed out after {timeout:?}")]
    Timeout {
        /// The wait budget that was exceeded.
        timeout: Duration,
    },
}

impl WaitError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            WaitError::Timeout { .. } => "wait_timeout",
        }
    }

    /// Returns a human-readable message with details about the error.
    pub fn as_message(&self) -> String {
        match self {
            WaitError::Timeout { timeout } => format!("timeout: {timeout:?}"),
        }
    }
}
