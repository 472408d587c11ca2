use std::sync::Arc;

use crate::error::ConsumerError;

/// A consumer whose handler failed during one dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Name of the failing consumer.
    pub consumer: Arc<str>,
    /// What went wrong.
    pub error: ConsumerError,
}

/// Result of delivering one event.
///
/// Exists only for the duration of one dispatch call; nothing is persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Outcome {
    /// Consumers actually invoked, in invocation order (failed ones included).
    pub invoked: Vec<Arc<str>>,
    /// Consumer that stopped delivery, if any.
    pub aborted_by: Option<Arc<str>>,
    /// Consumers whose handler returned an error or panicked.
    pub failed: Vec<Failure>,
}

impl Outcome {
    /// Returns `true` if some consumer aborted delivery.
    #[inline]
    pub fn is_aborted(&self) -> bool {
        self.aborted_by.is_some()
    }

    /// Returns `true` if the named consumer was invoked.
    pub fn was_invoked(&self, name: &str) -> bool {
        self.invoked.iter().any(|n| &**n == name)
    }

    /// Invoked consumer names as plain strings, handy for assertions and logs.
    pub fn invoked_names(&self) -> Vec<&str> {
        self.invoked.iter().map(|n| &**n).collect()
    }
}
