//! # TokioScheduler — timers on the tokio runtime
//!
//! Each scheduled timer is a spawned task racing `tokio::time::sleep` against
//! its own [`CancellationToken`], a child of the scheduler's root token.
//!
//! ## Timer states
//! ```text
//! schedule() ──► Armed ──sleep elapsed──► Firing ──fire returned──► (removed)
//!                  │                        │
//!                  └──cancel()/close()──► Cancelled (removed)
//! ```
//!
//! ## Rules
//! - Fire and cancel race on a single compare-and-swap out of `Armed`; the loser
//!   backs off, so a cancelled timer never fires.
//! - A timer stays in the table while its callback runs, so
//!   [`Schedule::is_pending`] covers the whole callback.
//! - [`TokioScheduler::close`] cancels every timer and rejects new ones
//!   with [`SchedulerError::Closed`].
//! - Scheduling outside a tokio runtime fails with [`SchedulerError::Rejected`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicU8, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::SchedulerError;
use crate::scheduler::{Fire, Schedule, TimerHandle};

const ARMED: u8 = 0;
const FIRING: u8 = 1;
const CANCELLED: u8 = 2;

struct Timer {
    token: CancellationToken,
    state: Arc<AtomicU8>,
}

impl Timer {
    fn cancel(&self) {
        self.state.store(CANCELLED, Ordering::Release);
        self.token.cancel();
    }

    fn is_armed(&self) -> bool {
        self.state.load(Ordering::Acquire) == ARMED
    }
}

#[derive(Default)]
struct Inner {
    next_id: AtomicU64,
    timers: Mutex<HashMap<u64, Timer>>,
    root: CancellationToken,
}

impl Inner {
    fn timers(&self) -> MutexGuard<'_, HashMap<u64, Timer>> {
        self.timers.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// [`Schedule`] implementation backed by tokio timers.
#[derive(Clone, Default)]
pub struct TokioScheduler {
    inner: Arc<Inner>,
}

impl TokioScheduler {
    /// Creates a scheduler with no pending timers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of timers still waiting for their deadline.
    ///
    /// A timer whose callback is running is not counted.
    pub fn pending(&self) -> usize {
        self.inner.timers().values().filter(|t| t.is_armed()).count()
    }

    /// Cancels all timers and refuses new ones.
    ///
    /// A callback that is already running is left to finish.
    pub fn close(&self) {
        self.inner.root.cancel();
        let drained: Vec<Timer> = self.inner.timers().drain().map(|(_, t)| t).collect();
        for timer in &drained {
            timer.cancel();
        }
        tracing::debug!(cancelled = drained.len(), "scheduler closed");
    }

    /// Returns `true` once [`close`](Self::close) has been called.
    pub fn is_closed(&self) -> bool {
        self.inner.root.is_cancelled()
    }
}

impl Schedule for TokioScheduler {
    fn schedule(&self, delay: Duration, fire: Fire) -> Result<TimerHandle, SchedulerError> {
        if self.is_closed() {
            return Err(SchedulerError::Closed);
        }
        let runtime = tokio::runtime::Handle::try_current().map_err(|e| SchedulerError::Rejected {
            reason: e.to_string(),
        })?;

        let handle = TimerHandle::new(self.inner.next_id.fetch_add(1, Ordering::Relaxed));
        let token = self.inner.root.child_token();
        let state = Arc::new(AtomicU8::new(ARMED));
        self.inner.timers().insert(
            handle.id(),
            Timer {
                token: token.clone(),
                state: Arc::clone(&state),
            },
        );

        let inner = Arc::clone(&self.inner);
        runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(delay) => {
                    let won = state
                        .compare_exchange(ARMED, FIRING, Ordering::AcqRel, Ordering::Acquire)
                        .is_ok();
                    if won {
                        fire(handle).await;
                    }
                }
            }
            inner.timers().remove(&handle.id());
        });
        Ok(handle)
    }

    fn cancel(&self, handle: &TimerHandle) {
        if let Some(timer) = self.inner.timers().remove(&handle.id()) {
            timer.cancel();
        }
    }

    fn is_pending(&self, handle: &TimerHandle) -> bool {
        self.inner.timers().contains_key(&handle.id())
    }
}
