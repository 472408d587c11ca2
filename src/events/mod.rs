//! Events delivered through the ordered dispatcher.
//!
//! ## Contents
//! - [`Event`] immutable action + optional payload, stamped with a sequence number
//! - [`ACTION_RECEIVE_NOTIFICATION`] the action emitted by the recurring producer
//!
//! ## Quick reference
//! - **Producers**: [`RecurringProducer`](crate::RecurringProducer) on every tick.
//! - **Consumers**: everything registered in the [`Registry`](crate::Registry),
//!   reached through [`Dispatcher::dispatch`](crate::Dispatcher::dispatch).

mod event;

pub use event::{ACTION_RECEIVE_NOTIFICATION, Event};
