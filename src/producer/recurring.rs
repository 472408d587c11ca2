//! # RecurringProducer: one event per tick, forever.
//!
//! The producer owns at most one pending [`TimerHandle`]. When that timer
//! fires it first schedules the next one, then emits an [`Event`] into the
//! [`Dispatcher`] and ignores the outcome.
//!
//! ## Tick flow
//! ```text
//! start() ──► schedule(interval) ──► pending = h1
//!
//! fire(h1)
//!   ├─► h1 == pending?  no ──► stale, ignore (stopped or restarted)
//!   ├─► pending = schedule(interval)          (re-arm first)
//!   └─► dispatcher.dispatch(Event(action))    (outcome only logged)
//! ```
//!
//! ## Rules
//! - **Reset on restart**: `start()` while armed cancels the pending timer and
//!   arms a fresh one for the full interval. Exactly one timer is ever pending.
//! - `stop()` cancels the pending timer; a tick already dispatching finishes,
//!   but it will not be followed by another one.
//! - A failing consumer cannot break the cycle: re-arming happens before dispatch
//!   and the dispatcher never propagates consumer errors.
//! - A failed `start()` leaves the producer unarmed.
//! - A timer the scheduler cancels on its own (e.g. on close) leaves the
//!   producer unarmed too; `is_armed()` and `stop()` ask the scheduler.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use crate::config::Config;
use crate::dispatch::Dispatcher;
use crate::error::SchedulerError;
use crate::events::Event;
use crate::scheduler::{Fire, Schedule, TimerHandle};

/// Self re-arming event source.
pub struct RecurringProducer {
    scheduler: Arc<dyn Schedule>,
    dispatcher: Dispatcher,
    interval: Duration,
    action: Arc<str>,
    pending: Mutex<Option<TimerHandle>>,
    ticks: AtomicU64,
    me: Weak<Self>,
}

impl RecurringProducer {
    /// Creates an unarmed producer using `cfg.interval` and `cfg.action`.
    pub fn new(scheduler: Arc<dyn Schedule>, dispatcher: Dispatcher, cfg: &Config) -> Arc<Self> {
        let interval = cfg.interval_clamped();
        let action = Arc::clone(&cfg.action);
        Arc::new_cyclic(|me| Self {
            scheduler,
            dispatcher,
            interval,
            action,
            pending: Mutex::new(None),
            ticks: AtomicU64::new(0),
            me: me.clone(),
        })
    }

    /// Arms the producer for one interval from now.
    ///
    /// Already armed: the pending timer is replaced by a fresh one.
    ///
    /// ### Errors
    /// Propagates the [`SchedulerError`]; the producer is then unarmed.
    pub fn start(&self) -> Result<(), SchedulerError> {
        let mut pending = self.pending();
        if let Some(old) = pending.take() {
            self.scheduler.cancel(&old);
        }
        match self.arm() {
            Ok(handle) => {
                *pending = Some(handle);
                tracing::info!(interval = ?self.interval, "producer started");
                Ok(())
            }
            Err(error) => {
                tracing::warn!(label = error.as_label(), %error, "producer failed to start");
                Err(error)
            }
        }
    }

    /// Cancels the pending timer. Returns `true` if one was pending.
    ///
    /// A timer the scheduler has already dropped (e.g. on close) does not count.
    pub fn stop(&self) -> bool {
        let stopped = self.pending().take();
        match stopped {
            Some(handle) => {
                let live = self.scheduler.is_pending(&handle);
                self.scheduler.cancel(&handle);
                if live {
                    tracing::info!("producer stopped");
                } else {
                    tracing::debug!(timer = handle.id(), "timer already dropped");
                }
                live
            }
            None => false,
        }
    }

    /// Returns `true` while a timer is pending.
    ///
    /// A handle the scheduler no longer tracks is forgotten here, leaving the
    /// producer unarmed.
    pub fn is_armed(&self) -> bool {
        let mut pending = self.pending();
        match *pending {
            Some(handle) if self.scheduler.is_pending(&handle) => true,
            Some(handle) => {
                tracing::warn!(timer = handle.id(), "pending timer dropped by the scheduler");
                *pending = None;
                false
            }
            None => false,
        }
    }

    /// Number of ticks that reached the dispatcher.
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Returns the re-arm interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    fn pending(&self) -> MutexGuard<'_, Option<TimerHandle>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn arm(&self) -> Result<TimerHandle, SchedulerError> {
        let me = self.me.clone();
        let fire: Fire = Box::new(move |handle| {
            Box::pin(async move {
                if let Some(producer) = me.upgrade() {
                    producer.on_fire(handle).await;
                }
            })
        });
        self.scheduler.schedule(self.interval, fire)
    }

    async fn on_fire(&self, fired: TimerHandle) {
        {
            let mut pending = self.pending();
            if *pending != Some(fired) {
                tracing::debug!(timer = fired.id(), "stale timer ignored");
                return;
            }
            *pending = match self.arm() {
                Ok(next) => Some(next),
                Err(error) => {
                    tracing::warn!(label = error.as_label(), %error, "producer failed to re-arm");
                    None
                }
            };
        }

        self.ticks.fetch_add(1, Ordering::Relaxed);
        let event = Event::new(Arc::clone(&self.action));
        let outcome = self.dispatcher.dispatch(&event).await;
        tracing::debug!(
            seq = event.seq,
            invoked = outcome.invoked.len(),
            aborted_by = outcome.aborted_by.as_deref().unwrap_or("none"),
            failed = outcome.failed.len(),
            "tick dispatched"
        );
    }
}
