//! Ordered, abortable delivery.
//!
//! - [`Dispatcher`] walks a frozen registry snapshot, highest priority first.
//! - [`Outcome`] records who was invoked, who failed, and who aborted.

mod dispatcher;
mod outcome;

pub use dispatcher::Dispatcher;
pub use outcome::{Failure, Outcome};
