//! # LogNotifier — notifications as log lines
//!
//! A minimal [`Notify`] implementation that writes each posted notification
//! through `tracing`. Use it for tests or demos.
//!
//! ## Example output
//! ```text
//! INFO ordcast::notify::log: notification posted id=1 title="Ordered broadcast" body="Received in background" on_click="main"
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::NotifyError;
use crate::notify::{Notification, Notify};

/// Notifier that logs instead of presenting anything.
#[derive(Default)]
pub struct LogNotifier {
    posted: AtomicU64,
}

impl LogNotifier {
    /// Construct a new [`LogNotifier`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of notifications posted so far.
    pub fn posted(&self) -> u64 {
        self.posted.load(Ordering::Relaxed)
    }
}

impl Notify for LogNotifier {
    fn post(&self, n: Notification) -> Result<(), NotifyError> {
        self.posted.fetch_add(1, Ordering::Relaxed);
        tracing::info!(
            id = n.id,
            title = %n.title,
            body = %n.body,
            on_click = %n.on_click,
            "notification posted"
        );
        Ok(())
    }
}
