//! # Function-backed consumer (`ConsumerFn`)
//!
//! [`ConsumerFn`] wraps a closure `F: Fn(&Event) -> Result<Signal, ConsumerError>`.
//! Shared state, if any, is captured explicitly (`Arc<...>`) by the closure.
//!
//! ## Example
//! ```rust
//! use ordcast::{ConsumerFn, ConsumerRef, Signal, Consume};
//!
//! let c: ConsumerRef = ConsumerFn::arc("interceptor", |_ev| Ok(Signal::Abort));
//! assert_eq!(c.name(), "interceptor");
//! ```

use std::borrow::Cow;
use std::sync::Arc;

use async_trait::async_trait;

use crate::consumers::{Consume, Signal};
use crate::error::ConsumerError;
use crate::events::Event;

/// Function-backed consumer implementation.
pub struct ConsumerFn<F> {
    name: Cow<'static, str>,
    f: F,
}

impl<F> ConsumerFn<F>
where
    F: Fn(&Event) -> Result<Signal, ConsumerError> + Send + Sync + 'static,
{
    /// Creates a new function-backed consumer.
    ///
    /// Prefer [`ConsumerFn::arc`] when you immediately need a [`ConsumerRef`](crate::ConsumerRef).
    pub fn new(name: impl Into<Cow<'static, str>>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }

    /// Creates the consumer and returns it as a shared handle.
    pub fn arc(name: impl Into<Cow<'static, str>>, f: F) -> Arc<Self> {
        Arc::new(Self::new(name, f))
    }
}

#[async_trait]
impl<F> Consume for ConsumerFn<F>
where
    F: Fn(&Event) -> Result<Signal, ConsumerError> + Send + Sync + 'static,
{
    async fn on_event(&self, event: &Event) -> Result<Signal, ConsumerError> {
        (self.f)(event)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
