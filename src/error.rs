//! Error types used by the ordcast runtime and its collaborators.
//!
//! This module defines five error enums:
//!
//! - [`RuntimeError`] — the host runtime could not start or wait for shutdown.
//! - [`RegistrationError`] — rejected registry mutations (duplicate, invalid or reserved).
//! - [`ConsumerError`] — a consumer handler failed; caught by the dispatcher, never propagated.
//! - [`SchedulerError`] — the scheduling service refused a timer; surfaced by `start()`.
//! - [`NotifyError`] — the notification service refused a post.
//!
//! All types provide `as_label` for logs/metrics.

use thiserror::Error;

/// # Errors produced by the ordcast runtime.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum RuntimeError {
    /// The recurring producer could not be armed.
    #[error("producer failed to start: {0}")]
    Start(#[from] SchedulerError),

    /// The built-in consumers could not be registered.
    #[error("consumer registration failed: {0}")]
    Registration(#[from] RegistrationError),

    /// Listening for termination signals failed.
    #[error("signal handler failed: {0}")]
    Signal(#[from] std::io::Error),
}

impl RuntimeError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            RuntimeError::Start(_) => "runtime_start_failed",
            RuntimeError::Registration(_) => "runtime_registration_failed",
            RuntimeError::Signal(_) => "runtime_signal_failed",
        }
    }
}

/// # Errors produced by the consumer registry.
///
/// Always recoverable: the registry is left unchanged when one of these is returned.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistrationError {
    /// A different consumer instance is already registered under the same name.
    #[error("consumer {name:?} is already registered")]
    Duplicate {
        /// Name shared by the existing and the rejected consumer.
        name: String,
    },

    /// Consumer names must be non-empty.
    #[error("consumer name must not be empty")]
    InvalidName,

    /// No consumer is registered under the given name.
    #[error("consumer {name:?} is not registered")]
    NotFound {
        /// The name that was looked up.
        name: String,
    },

    /// The priority belongs to the fallback consumer.
    #[error("priority {priority} is reserved for the fallback consumer")]
    ReservedPriority {
        /// The rejected priority.
        priority: i32,
    },
}

impl RegistrationError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use ordcast::RegistrationError;
    ///
    /// let err = RegistrationError::Duplicate { name: "foreground".into() };
    /// assert_eq!(err.as_label(), "registration_duplicate");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            RegistrationError::Duplicate { .. } => "registration_duplicate",
            RegistrationError::InvalidName => "registration_invalid_name",
            RegistrationError::NotFound { .. } => "registration_not_found",
            RegistrationError::ReservedPriority { .. } => "registration_reserved_priority",
        }
    }
}

/// # Errors produced by consumer handlers.
///
/// The dispatcher records these per consumer and keeps delivering to the rest of the order.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsumerError {
    /// Handler returned an error.
    #[error("handler failed: {error}")]
    Fail {
        /// The underlying error message.
        error: String,
    },

    /// Handler panicked; the panic payload is captured as text.
    #[error("handler panicked: {info}")]
    Panicked {
        /// Panic message, or `"unknown panic"` for non-string payloads.
        info: String,
    },

    /// The side effect the handler relies on could not be performed.
    #[error("side effect failed: {0}")]
    Notify(#[from] NotifyError),
}

impl ConsumerError {
    /// Convenience constructor for [`ConsumerError::Fail`].
    pub fn fail(error: impl Into<String>) -> Self {
        ConsumerError::Fail {
            error: error.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            ConsumerError::Fail { .. } => "consumer_failed",
            ConsumerError::Panicked { .. } => "consumer_panicked",
            ConsumerError::Notify(_) => "consumer_notify_failed",
        }
    }
}

/// # Errors produced by the scheduling service.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchedulerError {
    /// The scheduler has been closed and accepts no new timers.
    #[error("scheduler is closed")]
    Closed,

    /// The scheduler refused the request for an implementation-specific reason.
    #[error("scheduler rejected timer: {reason}")]
    Rejected {
        /// Human-readable reason.
        reason: String,
    },
}

impl SchedulerError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    ///
    /// # Example
    /// ```
    /// use ordcast::SchedulerError;
    ///
    /// assert_eq!(SchedulerError::Closed.as_label(), "scheduler_closed");
    /// ```
    pub fn as_label(&self) -> &'static str {
        match self {
            SchedulerError::Closed => "scheduler_closed",
            SchedulerError::Rejected { .. } => "scheduler_rejected",
        }
    }
}

/// # Errors produced by the notification service.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NotifyError {
    /// The notification could not be posted.
    #[error("notification rejected: {reason}")]
    Rejected {
        /// Human-readable reason.
        reason: String,
    },
}

impl NotifyError {
    /// Returns a short stable label (snake_case) for use in logs/metrics.
    pub fn as_label(&self) -> &'static str {
        match self {
            NotifyError::Rejected { .. } => "notify_rejected",
        }
    }
}
