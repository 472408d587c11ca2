//! # Event consumers and their registry.
//!
//! This module provides the [`Consume`] trait, a closure-backed
//! implementation [`ConsumerFn`], the [`Registry`] that owns all
//! registrations, and the two built-in consumers.
//!
//! ## Architecture
//! ```text
//! Registry (priority, registration seq, active)
//!     │
//!     └──► snapshot_active() ──► Dispatcher ──► consumer.on_event(&Event)
//!                                                  │
//!                                   ┌──────────────┴──────────────┐
//!                                   ▼                             ▼
//!                         ForegroundConsumer (1)         FallbackConsumer (min)
//!                         Signal::Abort                  post(Notification)
//!                                                        Signal::Continue
//! ```
//!
//! ## Implementing custom consumers
//! ```no_run
//! use async_trait::async_trait;
//! use ordcast::{Consume, ConsumerError, Event, Signal};
//!
//! struct Audit;
//!
//! #[async_trait]
//! impl Consume for Audit {
//!     async fn on_event(&self, event: &Event) -> Result<Signal, ConsumerError> {
//!         println!("seen seq={}", event.seq);
//!         Ok(Signal::Continue)
//!     }
//!
//!     fn name(&self) -> &str {
//!         "audit"
//!     }
//! }
//! ```

mod consumer;
mod consumer_fn;
mod embedded;
mod registry;

pub use consumer::{Consume, ConsumerRef, Signal};
pub use consumer_fn::ConsumerFn;
pub use embedded::{FallbackConsumer, ForegroundConsumer};
pub use registry::{
    DEFAULT_PRIORITY, FALLBACK_PRIORITY, FOREGROUND_PRIORITY, Registration, Registry,
};
