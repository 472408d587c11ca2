//! # App: owns the registry, dispatcher and recurring producer.
//!
//! ## High-level architecture
//! ```text
//! AppBuilder::build()
//!   ├─► Registry  ◄── register_fallback(FallbackConsumer)
//!   ├─► Dispatcher(registry)
//!   └─► RecurringProducer(scheduler, dispatcher)
//!
//! Host lifecycle:
//!   start()  ──► producer.start()       (reset on restart)
//!   stop()   ──► producer.stop()
//!   resume() ──► register(ForegroundConsumer, FOREGROUND_PRIORITY)
//!   pause()  ──► unregister(ForegroundConsumer)
//!
//! Tick:
//!   producer ──► dispatch(Event) ──► Foreground (abort)   while resumed
//!                                └─► Fallback (notify)    while paused
//!
//! Shutdown path:
//!   run()        = run_until(SIGINT | SIGTERM | SIGQUIT)   (Ctrl-C off unix)
//!   run_until(f) ──► start() ──► f resolves
//!             └─► producer.stop()
//!             └─► owned scheduler closed (no new timers)
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use ordcast::{App, Config, Notification, Notify, NotifyError};
//!
//! struct Stdout;
//!
//! impl Notify for Stdout {
//!     fn post(&self, n: Notification) -> Result<(), NotifyError> {
//!         println!("{}: {}", n.title, n.body);
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let app = App::builder(Config::default(), Arc::new(Stdout)).build().await?;
//!     app.resume().await?;
//!     app.run().await?;
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::sync::Arc;

use crate::{
    config::Config,
    consumers::{FOREGROUND_PRIORITY, ForegroundConsumer, Registry},
    dispatch::{Dispatcher, Outcome},
    error::{RegistrationError, RuntimeError, SchedulerError},
    events::Event,
    notify::Notify,
    producer::RecurringProducer,
    scheduler::TokioScheduler,
};

use super::builder::AppBuilder;

/// Runtime object wiring the ordered-delivery pieces together.
pub struct App {
    cfg: Config,
    registry: Arc<Registry>,
    dispatcher: Dispatcher,
    producer: Arc<RecurringProducer>,
    foreground: Arc<ForegroundConsumer>,
    owned_scheduler: Option<TokioScheduler>,
}

impl App {
    /// Returns a builder; `notifier` receives the fallback notifications.
    pub fn builder(cfg: Config, notifier: Arc<dyn Notify>) -> AppBuilder {
        AppBuilder::new(cfg, notifier)
    }

    pub(super) fn new_internal(
        cfg: Config,
        registry: Arc<Registry>,
        dispatcher: Dispatcher,
        producer: Arc<RecurringProducer>,
        foreground: Arc<ForegroundConsumer>,
        owned_scheduler: Option<TokioScheduler>,
    ) -> Self {
        Self {
            cfg,
            registry,
            dispatcher,
            producer,
            foreground,
            owned_scheduler,
        }
    }

    /// Arms the recurring producer; restarting resets the pending timer.
    pub fn start(&self) -> Result<(), SchedulerError> {
        self.producer.start()
    }

    /// Cancels the pending tick. Returns `true` if one was pending.
    pub fn stop(&self) -> bool {
        self.producer.stop()
    }

    /// Attaches the foreground consumer; events are intercepted until [`pause`](Self::pause).
    pub async fn resume(&self) -> Result<(), RegistrationError> {
        let foreground = Arc::clone(&self.foreground);
        self.registry.register(foreground, FOREGROUND_PRIORITY).await
    }

    /// Detaches the foreground consumer; events fall through to the fallback.
    pub async fn pause(&self) {
        self.registry.unregister(ForegroundConsumer::NAME).await;
    }

    /// Delivers one event immediately, outside the timer cycle.
    pub async fn emit(&self) -> Outcome {
        let event = Event::new(Arc::clone(&self.cfg.action));
        self.dispatcher.dispatch(&event).await
    }

    /// Starts the producer and runs until a termination signal arrives.
    ///
    /// See [`run_until`](Self::run_until) for what happens on the way out.
    pub async fn run(&self) -> Result<(), RuntimeError> {
        self.run_until(async {
            let signal = termination().await?;
            tracing::info!(signal, "termination signal received");
            Ok::<(), std::io::Error>(())
        })
        .await
    }

    /// Starts the producer and runs until `shutdown` resolves.
    ///
    /// Then the producer is stopped and the built-in scheduler (if used) is
    /// closed, even when `shutdown` failed. A tick already dispatching is
    /// allowed to finish.
    ///
    /// ### Errors
    /// - [`RuntimeError::Start`] if the producer cannot be armed; nothing is awaited.
    /// - [`RuntimeError::Signal`] if `shutdown` resolves to an error.
    pub async fn run_until<F>(&self, shutdown: F) -> Result<(), RuntimeError>
    where
        F: Future<Output = std::io::Result<()>>,
    {
        self.start()?;
        let waited = shutdown.await;
        self.shutdown();
        tracing::info!(
            ticks = self.producer.ticks(),
            foreground_received = self.foreground.received(),
            "ordered delivery stopped"
        );
        waited.map_err(RuntimeError::from)
    }

    /// Stops the producer and closes the built-in scheduler.
    pub fn shutdown(&self) {
        self.producer.stop();
        if let Some(scheduler) = &self.owned_scheduler {
            scheduler.close();
        }
    }

    /// Returns the runtime configuration.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Returns the consumer registry.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Returns the recurring producer.
    pub fn producer(&self) -> &Arc<RecurringProducer> {
        &self.producer
    }

    /// Returns the foreground consumer (registered or not).
    pub fn foreground(&self) -> &Arc<ForegroundConsumer> {
        &self.foreground
    }
}

/// Resolves with the name of the first termination signal received.
#[cfg(unix)]
async fn termination() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;
    let mut quit = signal(SignalKind::quit())?;

    let name = tokio::select! {
        _ = interrupt.recv() => "SIGINT",
        _ = terminate.recv() => "SIGTERM",
        _ = quit.recv() => "SIGQUIT",
    };
    Ok(name)
}

#[cfg(not(unix))]
async fn termination() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("ctrl-c")
}
