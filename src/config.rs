//! # Global runtime configuration.
//!
//! Provides [`Config`] centralized settings for the ordcast runtime.
//!
//! Config is used in two ways:
//! 1. **App creation**: `App::builder(config)`
//! 2. **Fallback notification**: title/body/click target posted by
//!    [`FallbackConsumer`](crate::FallbackConsumer)
//!
//! ## Sentinel values
//! - `interval = 0s` → clamped to 1ms by [`Config::interval_clamped`] (a zero delay would spin)

use std::sync::Arc;
use std::time::Duration;

use crate::events::ACTION_RECEIVE_NOTIFICATION;

/// Global configuration for the ordcast runtime.
///
/// ## Field semantics
/// - `interval`: delay between two producer ticks (re-arm delay)
/// - `action`: identifier stamped on every produced event
/// - `notification_*`: content of the durable notification posted by the fallback consumer
#[derive(Clone, Debug)]
pub struct Config {
    /// Delay after which the recurring producer fires, measured from (re-)arming.
    pub interval: Duration,

    /// Action name of the events emitted by the producer.
    pub action: Arc<str>,

    /// Title of the fallback notification.
    pub notification_title: Arc<str>,

    /// Body of the fallback notification.
    pub notification_body: Arc<str>,

    /// Target opened when the user clicks the fallback notification.
    pub notification_target: Arc<str>,
}

impl Config {
    /// Returns the producer interval clamped to a minimum of 1ms.
    #[inline]
    pub fn interval_clamped(&self) -> Duration {
        self.interval.max(Duration::from_millis(1))
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `interval = 5s`
    /// - `action = ACTION_RECEIVE_NOTIFICATION`
    /// - notification: "Ordered broadcast" / "Received in background" / "main"
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            action: Arc::from(ACTION_RECEIVE_NOTIFICATION),
            notification_title: Arc::from("Ordered broadcast"),
            notification_body: Arc::from("Received in background"),
            notification_target: Arc::from("main"),
        }
    }
}
