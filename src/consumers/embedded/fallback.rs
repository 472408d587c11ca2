//! # FallbackConsumer — never drop an event silently
//!
//! Registered once at [`FALLBACK_PRIORITY`](crate::FALLBACK_PRIORITY) and never
//! detached. When nothing above it aborted delivery it posts a durable
//! notification through the [`Notify`] collaborator and lets delivery continue.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::Config;
use crate::consumers::{Consume, Signal};
use crate::error::ConsumerError;
use crate::events::Event;
use crate::notify::{Notification, Notify};

/// Consumer that posts a notification for every event it receives.
pub struct FallbackConsumer {
    notifier: Arc<dyn Notify>,
    template: Notification,
}

impl FallbackConsumer {
    /// Registry name of the fallback consumer.
    pub const NAME: &'static str = "fallback";

    /// Creates a fallback consumer posting `template` on every event.
    pub fn new(notifier: Arc<dyn Notify>, template: Notification) -> Self {
        Self { notifier, template }
    }

    /// Creates a fallback consumer using the notification content from `cfg`.
    pub fn from_config(notifier: Arc<dyn Notify>, cfg: &Config) -> Self {
        let template = Notification::new(
            Arc::clone(&cfg.notification_title),
            Arc::clone(&cfg.notification_body),
            Arc::clone(&cfg.notification_target),
        );
        Self::new(notifier, template)
    }
}

#[async_trait]
impl Consume for FallbackConsumer {
    async fn on_event(&self, event: &Event) -> Result<Signal, ConsumerError> {
        tracing::debug!(seq = event.seq, "received in background");
        self.notifier.post(self.template.clone())?;
        Ok(Signal::Continue)
    }

    fn name(&self) -> &str {
        Self::NAME
    }
}
