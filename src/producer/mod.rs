//! Timer-driven event production.
//!
//! - [`RecurringProducer`] re-arms itself on every tick and emits one event
//!   into the [`Dispatcher`](crate::Dispatcher).

mod recurring;

pub use recurring::RecurringProducer;
