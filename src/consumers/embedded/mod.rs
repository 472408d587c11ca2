//! Built-in consumers.
//!
//! - [`ForegroundConsumer`] intercepts events while attached and stops delivery.
//! - [`FallbackConsumer`] turns any event nobody intercepted into a durable notification.

mod fallback;
mod foreground;

pub use fallback::FallbackConsumer;
pub use foreground::ForegroundConsumer;
