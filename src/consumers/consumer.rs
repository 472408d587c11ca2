//! # Event consumer trait.
//!
//! Provides [`Consume`] the extension point for plugging handlers into the
//! ordered dispatcher.
//!
//! ## Rules
//! - Consumers are invoked **sequentially**, highest priority first.
//! - Returning [`Signal::Abort`] stops delivery to everything after this consumer.
//! - Errors and panics are caught by the dispatcher; the next consumer still runs.
//! - Consumers never see each other; the registry alone knows the order.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ConsumerError;
use crate::events::Event;

/// Decision a consumer returns after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Hand the event on to the next consumer in order.
    Continue,
    /// Stop delivery; no later consumer sees this event.
    Abort,
}

/// Shared handle to a consumer.
pub type ConsumerRef = Arc<dyn Consume>;

/// Event consumer invoked by the ordered dispatcher.
///
/// ### Implementation requirements
/// - Finish quickly; the next consumer waits for this one.
/// - Side effects should be fire-and-forget calls into collaborators.
/// - `name` is the registry identity and must be non-empty.
#[async_trait]
pub trait Consume: Send + Sync + 'static {
    /// Handles a single event and decides whether delivery continues.
    async fn on_event(&self, event: &Event) -> Result<Signal, ConsumerError>;

    /// Returns the consumer name, used as registry identity and in logs.
    fn name(&self) -> &str;
}
