//! # Notification service collaborator.
//!
//! The core never presents notifications itself. It hands a [`Notification`]
//! to whatever implements [`Notify`] and moves on.
//!
//! ## Contents
//! - [`Notify`] the collaborator seam: `post(notification)`
//! - [`Notification`] title, body and click target of a durable notification
//! - [`LogNotifier`] reference implementation writing through `tracing` (feature `logging`)

mod notification;
mod notifier;

#[cfg(feature = "logging")]
mod log;

pub use notification::Notification;
pub use notifier::Notify;

#[cfg(feature = "logging")]
pub use log::LogNotifier;
