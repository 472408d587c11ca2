//! # ordcast
//!
//! **ordcast** delivers events to a small set of consumers in a fixed,
//! priority-driven order, where any consumer can stop delivery to the rest.
//! A recurring timer re-triggers production on its own.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!  ┌───────────────────────┐   schedule(interval)   ┌──────────────────┐
//!  │   RecurringProducer   │ ─────────────────────► │ Schedule (timer) │
//!  │ (re-arms, then emits) │ ◄───────── fire ────── │  TokioScheduler  │
//!  └───────────┬───────────┘                        └──────────────────┘
//!              │ dispatch(Event)
//!              ▼
//!  ┌───────────────────────┐   snapshot_active()    ┌──────────────────┐
//!  │      Dispatcher       │ ─────────────────────► │     Registry     │
//!  │ (sequential, ordered) │                        │ (prio, seq, on)  │
//!  └───────────┬───────────┘                        └──────────────────┘
//!              │ highest priority first, stop on Abort
//!              ▼
//!     ForegroundConsumer (1) ──► Abort
//!              │ (only if detached)
//!              ▼
//!     FallbackConsumer (min) ──► Notify::post(Notification) ──► Continue
//! ```
//!
//! ### Tick
//! ```text
//! fire(handle)
//!   ├─► stale handle?  ──► ignore
//!   ├─► re-arm for next interval   (before delivery; failures cannot stop the cycle)
//!   └─► dispatch(Event)
//!         for consumer in snapshot (desc priority, asc registration):
//!           ├─ Continue ──► next
//!           ├─ Abort    ──► stop, outcome.aborted_by = consumer
//!           └─ Err/panic──► record failure, next
//! ```
//!
//! ## Features
//! | Area              | Description                                                 | Key types / traits                           |
//! |-------------------|-------------------------------------------------------------|----------------------------------------------|
//! | **Consumers**     | Hook into delivery; continue or abort.                      | [`Consume`], [`ConsumerFn`], [`Signal`]      |
//! | **Registry**      | Priority, registration order, attach/detach.                | [`Registry`]                                 |
//! | **Dispatch**      | Ordered delivery with early exit and failure isolation.     | [`Dispatcher`], [`Outcome`]                  |
//! | **Production**    | Self re-arming timer-driven producer.                       | [`RecurringProducer`], [`Schedule`]          |
//! | **Side effects**  | Durable notifications through an external service.          | [`Notify`], [`Notification`]                 |
//! | **Errors**        | Typed errors per concern.                                   | [`RegistrationError`], [`SchedulerError`]    |
//! | **Configuration** | Interval, action name, notification content.                | [`Config`]                                   |
//!
//! ## Optional features
//! - `logging`: exports a built-in [`LogNotifier`] _(demo/reference only)_.
//!
//! ## Example
//! ```rust
//! use std::sync::Arc;
//! use ordcast::{ConsumerFn, Dispatcher, Event, Registry, Signal};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = Registry::new();
//!     registry.register(ConsumerFn::arc("interceptor", |_ev| Ok(Signal::Abort)), 1).await?;
//!     registry.register(ConsumerFn::arc("fallback", |_ev| Ok(Signal::Continue)), 0).await?;
//!
//!     let dispatcher = Dispatcher::new(Arc::clone(&registry));
//!     let outcome = dispatcher.dispatch(&Event::new("tick")).await;
//!     assert_eq!(outcome.aborted_by.as_deref(), Some("interceptor"));
//!
//!     registry.unregister("interceptor").await;
//!     let outcome = dispatcher.dispatch(&Event::new("tick")).await;
//!     assert_eq!(outcome.invoked_names(), ["fallback"]);
//!     Ok(())
//! }
//! ```
mod config;
mod consumers;
mod core;
mod dispatch;
mod error;
mod events;
mod notify;
mod producer;
mod scheduler;

// ---- Public re-exports ----

pub use config::Config;
pub use consumers::{
    Consume, ConsumerFn, ConsumerRef, DEFAULT_PRIORITY, FALLBACK_PRIORITY, FOREGROUND_PRIORITY,
    FallbackConsumer, ForegroundConsumer, Registration, Registry, Signal,
};
pub use crate::core::{App, AppBuilder};
pub use dispatch::{Dispatcher, Failure, Outcome};
pub use error::{ConsumerError, NotifyError, RegistrationError, RuntimeError, SchedulerError};
pub use events::{ACTION_RECEIVE_NOTIFICATION, Event};
pub use notify::{Notification, Notify};
pub use producer::RecurringProducer;
pub use scheduler::{Fire, Schedule, TimerHandle, TokioScheduler};

// Optional: expose a simple built-in notifier (demo/reference).
// Enable with: `--features logging`
#[cfg(feature = "logging")]
pub use notify::LogNotifier;
