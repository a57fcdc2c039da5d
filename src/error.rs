//! Error types used by the group runtime and workers.
//!
//! The core knows a single failure kind: a worker's `toil` terminated
//! abnormally. [`ToilError`] captures the two ways that can happen in Rust:
//!
//! - [`ToilError::Fail`] — `toil` returned an error value.
//! - [`ToilError::Panicked`] — `toil` panicked; the panic payload is converted
//!   into a message at the task-wrapper boundary.
//!
//! The type provides helper methods (`as_label`, `as_message`) for
//! logging/metrics, and is `Clone` so the first failure of a run can be handed
//! to every caller blocked in [`Group::run`](crate::Group::run) as well as to
//! the failing worker's own `on_failed` hook.

use thiserror::Error;

/// # Failure of a single worker invocation.
///
/// Produced by the worker itself (`Fail`) or by the task wrapper when the
/// worker's `toil` panicked (`Panicked`). The group never swallows one of
/// these: the first failure observed for a run is returned verbatim from
/// [`Group::run`](crate::Group::run).
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ToilError {
    /// The worker's `toil` returned an error.
    #[error("toil failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// The worker's `toil` panicked.
    #[error("toil panicked: {message}")]
    Panicked {
        /// Message extracted from the panic payload.
        message: String,
    },
}

impl ToilError {
    /// Creates a [`ToilError::Fail`] from any message.
    ///
    /// # Example
    /// ```
    /// use toilgroup::ToilError;
    ///
    /// let err = ToilError::fail("connection refused");
    /// assert_eq!(err.as_message(), "error: connection refused");
    /// ```
    pub fn fail(error: impl Into<String>) -> Self {
        ToilError::Fail {
            error: error.into(),
        }
    }

    /// Creates a [`ToilError::Panicked`] from a panic message.
    pub fn panicked(message: impl Into<String>) -> Self {
        ToilError::Panicked {
            message: message.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use toilgroup::ToilError;
    ///
    /// let err = ToilError::fail("boom");
    /// assert_eq!(err.as_label(), "toil_failed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            ToilError::Fail { .. } => "toil_failed",
            ToilError::Panicked { .. } => "toil_panicked",
        }
    }

    /// Returns a human-readable message with details about the failure.
    pub fn as_message(&self) -> String {
        match self {
            ToilError::Fail { error } => format!("error: {error}"),
            ToilError::Panicked { message } => format!("panic: {message}"),
        }
    }

    /// Indicates whether the failure came from a panic rather than an
    /// error value.
    ///
    /// # Example
    /// ```
    /// use toilgroup::ToilError;
    ///
    /// assert!(ToilError::panicked("boom").is_panic());
    /// assert!(!ToilError::fail("boom").is_panic());
    /// ```
    pub fn is_panic(&self) -> bool {
        matches!(self, ToilError::Panicked { .. })
    }
}
