//! # Scheduling service collaborator.
//!
//! The producer never sleeps itself; it asks a [`Schedule`] implementation to
//! run a one-shot [`Fire`] callback after a delay and keeps the returned
//! [`TimerHandle`] so it can cancel it.
//!
//! ## Contents
//! - [`Schedule`] the collaborator seam: `schedule(delay, fire)`, `cancel(handle)`
//! - [`TimerHandle`] opaque id of one pending timer
//! - [`TokioScheduler`] reference implementation on `tokio::time`

mod schedule;
mod tokio_scheduler;

pub use schedule::{Fire, Schedule, TimerHandle};
pub use tokio_scheduler::TokioScheduler;
