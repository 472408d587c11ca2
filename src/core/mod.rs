//! Host wiring: one registry, one dispatcher, one producer.
//!
//! The only public API from this module is [`App`] (built with [`AppBuilder`]),
//! which owns the runtime pieces and exposes the host lifecycle:
//!
//! - `start` / `stop`: arm or cancel the recurring producer;
//! - `resume` / `pause`: attach or detach the foreground consumer;
//! - `run` / `run_until`: start, then stop cleanly on a termination signal
//!   (or any other shutdown future).
//!
//! Internal modules:
//! - [`app`]: the runtime object;
//! - [`builder`]: assembly and registration of the fallback consumer.

mod app;
mod builder;

pub use app::App;
pub use builder::AppBuilder;
