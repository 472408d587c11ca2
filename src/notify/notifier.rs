use crate::error::NotifyError;
use crate::notify::Notification;

/// Notification service used by consumers that need a durable side effect.
///
/// ### Implementation requirements
/// - `post` is fire-and-forget: hand the notification off and return quickly.
/// - Return [`NotifyError`] only when the service refused the post outright.
pub trait Notify: Send + Sync + 'static {
    /// Posts (or replaces, by id) a notification.
    fn post(&self, notification: Notification) -> Result<(), NotifyError>;
}
