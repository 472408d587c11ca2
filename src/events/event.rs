//! # Events emitted by the recurring producer.
//!
//! An [`Event`] names an action and carries an optional opaque payload.
//! It is created once by the producer and handed to consumers by reference,
//! so no consumer can alter what the next one sees.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically.
//!
//! ## Example
//! ```rust
//! use ordcast::{ACTION_RECEIVE_NOTIFICATION, Event};
//!
//! let ev = Event::new(ACTION_RECEIVE_NOTIFICATION).with_payload("hello");
//!
//! assert!(ev.is_action(ACTION_RECEIVE_NOTIFICATION));
//! assert_eq!(ev.payload.as_deref(), Some("hello"));
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

/// Action broadcast on every producer tick.
///
/// Namespaced so it cannot collide with reserved action names.
pub const ACTION_RECEIVE_NOTIFICATION: &str = "ordcast.action.receive_notification";

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Immutable event handed to consumers.
///
/// - `seq`: monotonic global sequence
/// - `at`: wall-clock timestamp (for logs)
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Action name identifying the event type.
    pub action: Arc<str>,
    /// Opaque payload; empty for producer ticks.
    pub payload: Option<Arc<str>>,
}

impl Event {
    /// Creates a new event for `action` with current timestamp and next sequence number.
    pub fn new(action: impl Into<Arc<str>>) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            action: action.into(),
            payload: None,
        }
    }

    /// Attaches an opaque payload.
    #[inline]
    pub fn with_payload(mut self, payload: impl Into<Arc<str>>) -> Self {
        self.payload = Some(payload.into());
        self
    }

    /// Returns `true` if this event carries the given action.
    #[inline]
    pub fn is_action(&self, action: &str) -> bool {
        &*self.action == action
    }
}
