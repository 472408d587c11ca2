//! # ForegroundConsumer — intercept while attached
//!
//! Registered at [`FOREGROUND_PRIORITY`](crate::FOREGROUND_PRIORITY) while the
//! user-facing surface is attached. It acknowledges the event with a transient
//! log line and aborts delivery so lower-priority consumers (the fallback)
//! never see it.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;

use crate::consumers::{Consume, Signal};
use crate::error::ConsumerError;
use crate::events::Event;

/// Consumer that swallows events while the foreground is attached.
#[derive(Default)]
pub struct ForegroundConsumer {
    received: AtomicU64,
}

impl ForegroundConsumer {
    /// Registry name of the foreground consumer.
    pub const NAME: &'static str = "foreground";

    /// Construct a new [`ForegroundConsumer`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events intercepted so far.
    pub fn received(&self) -> u64 {
        self.received.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl Consume for ForegroundConsumer {
    async fn on_event(&self, event: &Event) -> Result<Signal, ConsumerError> {
        self.received.fetch_add(1, Ordering::Relaxed);
        tracing::info!(seq = event.seq, action = %event.action, "received in foreground");
        Ok(Signal::Abort)
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}
