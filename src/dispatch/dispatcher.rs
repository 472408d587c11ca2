//! # Ordered dispatcher.
//!
//! Delivers one [`Event`] to the active consumers of a [`Registry`], one at a
//! time, highest priority first, stopping at the first [`Signal::Abort`].
//!
//! ## Architecture
//! ```text
//! dispatch(&Event)
//!     │
//!     ├──► registry.snapshot_active()      (frozen for this call)
//!     │
//!     └──► for reg in snapshot:
//!            ├─ Ok(Continue) ──► next
//!            ├─ Ok(Abort)    ──► outcome.aborted_by = reg, stop
//!            ├─ Err(e)       ──► outcome.failed += reg, next
//!            └─ panic        ──► outcome.failed += reg (Panicked), next
//! ```
//!
//! ## Rules
//! - No lock is held while handlers run.
//! - Registrations added mid-dispatch are not seen until the next call.
//! - A failing consumer never reaches the caller as an error.
//! - The last consumer is not special-cased; abort semantics apply uniformly.
//!
//! A panicking consumer is recorded as [`ConsumerError::Panicked`] whether it
//! panics while building its future or while it is polled. Panics are caught
//! across an `AssertUnwindSafe` boundary: state a consumer was mutating when it
//! panicked stays half-written, and later events will see it.

use std::sync::Arc;

use futures::FutureExt;

use crate::consumers::{Registry, Signal};
use crate::dispatch::{Failure, Outcome};
use crate::error::ConsumerError;
use crate::events::Event;

/// Sequential, priority-ordered event delivery over a shared registry.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<Registry>,
}

impl Dispatcher {
    /// Creates a dispatcher reading registrations from `registry`.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// Returns the registry this dispatcher delivers from.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Delivers `event` to the active consumers in order.
    pub async fn dispatch(&self, event: &Event) -> Outcome {
        let snapshot = self.registry.snapshot_active().await;
        let mut outcome = Outcome::default();

        for reg in snapshot {
            outcome.invoked.push(Arc::clone(&reg.name));

            let consumer = &reg.consumer;
            let guarded =
                std::panic::AssertUnwindSafe(async move { consumer.on_event(event).await });
            let result = match guarded.catch_unwind().await {
                Ok(result) => result,
                Err(panic_err) => Err(ConsumerError::Panicked {
                    info: panic_message(&*panic_err),
                }),
            };

            match result {
                Ok(Signal::Continue) => {
                    tracing::debug!(seq = event.seq, consumer = %reg.name, "delivered");
                }
                Ok(Signal::Abort) => {
                    tracing::debug!(seq = event.seq, consumer = %reg.name, "delivery aborted");
                    outcome.aborted_by = Some(reg.name);
                    break;
                }
                Err(error) => {
                    tracing::warn!(
                        seq = event.seq,
                        consumer = %reg.name,
                        label = error.as_label(),
                        %error,
                        "consumer failed; continuing delivery"
                    );
                    outcome.failed.push(Failure {
                        consumer: reg.name,
                        error,
                    });
                }
            }
        }
        outcome
    }
}

fn panic_message(any: &(dyn std::any::Any + Send)) -> String {
    if let Some(msg) = any.downcast_ref::<&'static str>() {
        (*msg).to_string()
    } else if let Some(msg) = any.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::consumers::{Consume, ConsumerFn, ConsumerRef};

    /// Records invocations into a shared log, then returns a fixed signal.
    fn recording(
        name: &'static str,
        log: &Arc<Mutex<Vec<&'static str>>>,
        signal: Signal,
    ) -> ConsumerRef {
        let log = Arc::clone(log);
        ConsumerFn::arc(name, move |_ev| {
            log.lock().unwrap().push(name);
            Ok(signal)
        })
    }

    struct Panicking;

    #[async_trait]
    impl Consume for Panicking {
        async fn on_event(&self, _event: &Event) -> Result<Signal, ConsumerError> {
            panic!("handler exploded");
        }

        fn name(&self) -> &str {
            "panicking"
        }
    }

    /// Panics before it has a future to return.
    struct PanicsEagerly;

    impl Consume for PanicsEagerly {
        fn on_event<'a, 'b, 'c>(
            &'a self,
            _event: &'b Event,
        ) -> futures::future::BoxFuture<'c, Result<Signal, ConsumerError>>
        where
            'a: 'c,
            'b: 'c,
            Self: 'c,
        {
            panic!("no future for you");
        }

        fn name(&self) -> &str {
            "eager"
        }
    }

    /// Registers a new consumer from inside its handler.
    struct Registering {
        registry: Arc<Registry>,
        late: ConsumerRef,
    }

    #[async_trait]
    impl Consume for Registering {
        async fn on_event(&self, _event: &Event) -> Result<Signal, ConsumerError> {
            self.registry
                .register(Arc::clone(&self.late), 50)
                .await
                .map_err(|e| ConsumerError::fail(e.to_string()))?;
            Ok(Signal::Continue)
        }

        fn name(&self) -> &str {
            "registering"
        }
    }

    #[tokio::test]
    async fn delivers_in_descending_priority_order() {
        let registry = Registry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        registry.register(recording("p0", &log, Signal::Continue), 0).await.unwrap();
        registry.register(recording("p7", &log, Signal::Continue), 7).await.unwrap();
        registry.register(recording("p-3", &log, Signal::Continue), -3).await.unwrap();
        registry.register(recording("p2", &log, Signal::Continue), 2).await.unwrap();

        let outcome = Dispatcher::new(registry).dispatch(&Event::new("tick")).await;

        assert_eq!(*log.lock().unwrap(), ["p7", "p2", "p0", "p-3"]);
        assert_eq!(outcome.invoked_names(), ["p7", "p2", "p0", "p-3"]);
        assert!(!outcome.is_aborted());
    }

    #[tokio::test]
    async fn abort_stops_lower_priorities_and_later_ties() {
        let registry = Registry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        registry.register(recording("high", &log, Signal::Continue), 10).await.unwrap();
        registry.register(recording("stopper", &log, Signal::Abort), 5).await.unwrap();
        registry.register(recording("tied-later", &log, Signal::Continue), 5).await.unwrap();
        registry.register(recording("low", &log, Signal::Continue), 0).await.unwrap();

        let outcome = Dispatcher::new(registry).dispatch(&Event::new("tick")).await;

        assert_eq!(*log.lock().unwrap(), ["high", "stopper"]);
        assert_eq!(outcome.aborted_by.as_deref(), Some("stopper"));
        assert!(!outcome.was_invoked("tied-later"));
        assert!(!outcome.was_invoked("low"));
    }

    #[tokio::test]
    async fn abort_by_last_consumer_is_reported() {
        let registry = Registry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        registry.register(recording("a", &log, Signal::Continue), 1).await.unwrap();
        registry.register(recording("b", &log, Signal::Abort), 0).await.unwrap();

        let outcome = Dispatcher::new(registry).dispatch(&Event::new("tick")).await;
        assert_eq!(outcome.aborted_by.as_deref(), Some("b"));
        assert_eq!(outcome.invoked_names(), ["a", "b"]);
    }

    #[tokio::test]
    async fn empty_registry_yields_empty_outcome() {
        let outcome = Dispatcher::new(Registry::new())
            .dispatch(&Event::new("tick"))
            .await;
        assert_eq!(outcome, Outcome::default());
    }

    #[tokio::test]
    async fn failing_consumer_does_not_stop_delivery() {
        let registry = Registry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        registry
            .register(ConsumerFn::arc("broken", |_ev| Err(ConsumerError::fail("boom"))), 3)
            .await
            .unwrap();
        registry.register(Arc::new(Panicking), 2).await.unwrap();
        registry.register(recording("healthy", &log, Signal::Continue), 1).await.unwrap();

        let outcome = Dispatcher::new(registry).dispatch(&Event::new("tick")).await;

        assert_eq!(*log.lock().unwrap(), ["healthy"]);
        assert_eq!(outcome.invoked_names(), ["broken", "panicking", "healthy"]);
        assert_eq!(outcome.failed.len(), 2);
        assert_eq!(&*outcome.failed[0].consumer, "broken");
        assert_eq!(outcome.failed[0].error, ConsumerError::fail("boom"));
        assert_eq!(
            outcome.failed[1].error,
            ConsumerError::Panicked {
                info: "handler exploded".into()
            }
        );
        assert!(!outcome.is_aborted());
    }

    #[tokio::test]
    async fn panic_before_the_future_exists_is_contained() {
        let registry = Registry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        registry.register(Arc::new(PanicsEagerly), 1).await.unwrap();
        registry.register(recording("after", &log, Signal::Continue), 0).await.unwrap();

        let outcome = Dispatcher::new(registry).dispatch(&Event::new("tick")).await;

        assert_eq!(*log.lock().unwrap(), ["after"]);
        assert_eq!(outcome.invoked_names(), ["eager", "after"]);
        assert_eq!(
            outcome.failed[0].error,
            ConsumerError::Panicked {
                info: "no future for you".into()
            }
        );
    }

    #[tokio::test]
    async fn snapshot_is_frozen_for_one_dispatch() {
        let registry = Registry::new();
        let log = Arc::new(Mutex::new(Vec::new()));
        let late = recording("late", &log, Signal::Abort);
        registry
            .register(
                Arc::new(Registering {
                    registry: Arc::clone(&registry),
                    late,
                }),
                1,
            )
            .await
            .unwrap();
        registry.register(recording("tail", &log, Signal::Continue), 0).await.unwrap();

        let dispatcher = Dispatcher::new(Arc::clone(&registry));
        let first = dispatcher.dispatch(&Event::new("tick")).await;
        assert_eq!(first.invoked_names(), ["registering", "tail"]);
        assert!(!first.is_aborted());

        // "late" (priority 50) is visible from the next dispatch on.
        let second = dispatcher.dispatch(&Event::new("tick")).await;
        assert_eq!(second.invoked_names(), ["late"]);
        assert_eq!(second.aborted_by.as_deref(), Some("late"));
    }
}
