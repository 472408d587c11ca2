use futures::future::BoxFuture;

use crate::error::SchedulerError;

/// Opaque identifier of one pending timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerHandle {
    id: u64,
}

impl TimerHandle {
    /// Wraps a scheduler-assigned id.
    #[inline]
    pub fn new(id: u64) -> Self {
        Self { id }
    }

    /// Returns the scheduler-assigned id.
    #[inline]
    pub fn id(&self) -> u64 {
        self.id
    }
}

/// One-shot callback run when a timer fires.
///
/// Receives the handle of the timer that fired, so the owner can tell a
/// current timer from one it has already replaced or cancelled.
pub type Fire = Box<dyn FnOnce(TimerHandle) -> BoxFuture<'static, ()> + Send>;

/// Timer service used by the recurring producer.
///
/// ### Implementation requirements
/// - `schedule` returns immediately; `fire` runs later, at most once.
/// - After `cancel(handle)` returns, `fire` for that handle must not start.
/// - `cancel` on an unknown or already fired handle is a no-op.
/// - `is_pending` stays `true` from `schedule` until `fire` has returned, and turns
///   `false` as soon as the timer is cancelled by anyone, including the service itself.
pub trait Schedule: Send + Sync + 'static {
    /// Arranges for `fire` to run once after `delay`.
    fn schedule(
        &self,
        delay: std::time::Duration,
        fire: Fire,
    ) -> Result<TimerHandle, SchedulerError>;

    /// Cancels a pending timer.
    fn cancel(&self, handle: &TimerHandle);

    /// Returns `true` while the timer is waiting or its callback is running.
    fn is_pending(&self, handle: &TimerHandle) -> bool;
}
