use std::sync::Arc;

use crate::{
    config::Config,
    consumers::{ConsumerRef, FallbackConsumer, ForegroundConsumer, Registry},
    dispatch::Dispatcher,
    error::RegistrationError,
    notify::Notify,
    producer::RecurringProducer,
    scheduler::{Schedule, TokioScheduler},
};

use super::app::App;

/// Builder for constructing an [`App`].
pub struct AppBuilder {
    cfg: Config,
    notifier: Arc<dyn Notify>,
    scheduler: Option<Arc<dyn Schedule>>,
    consumers: Vec<(ConsumerRef, i32)>,
}

impl AppBuilder {
    /// Creates a new builder; `notifier` receives the fallback notifications.
    pub fn new(cfg: Config, notifier: Arc<dyn Notify>) -> Self {
        Self {
            cfg,
            notifier,
            scheduler: None,
            consumers: Vec::new(),
        }
    }

    /// Uses an external scheduling service instead of the built-in [`TokioScheduler`].
    pub fn with_scheduler(mut self, scheduler: Arc<dyn Schedule>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Registers an additional consumer at `priority` when the app is built.
    ///
    /// [`FALLBACK_PRIORITY`](crate::FALLBACK_PRIORITY) is reserved; using it
    /// makes [`build`](Self::build) fail.
    pub fn with_consumer(mut self, consumer: ConsumerRef, priority: i32) -> Self {
        self.consumers.push((consumer, priority));
        self
    }

    /// Builds and returns the App instance.
    ///
    /// This consumes the builder and initializes all runtime components:
    /// - Registry with the fallback consumer (always active, lowest priority)
    /// - Additional consumers, in the order they were added
    /// - Dispatcher over the registry
    /// - Unarmed recurring producer
    ///
    /// The foreground consumer is created but only registered by [`App::resume`].
    pub async fn build(self) -> Result<Arc<App>, RegistrationError> {
        let registry = Registry::new();
        let fallback = Arc::new(FallbackConsumer::from_config(self.notifier, &self.cfg));
        registry.register_fallback(fallback).await?;
        for (consumer, priority) in self.consumers {
            registry.register(consumer, priority).await?;
        }

        let dispatcher = Dispatcher::new(Arc::clone(&registry));

        let (scheduler, owned_scheduler) = match self.scheduler {
            Some(external) => (external, None),
            None => {
                let owned = TokioScheduler::new();
                (Arc::new(owned.clone()) as Arc<dyn Schedule>, Some(owned))
            }
        };
        let producer = RecurringProducer::new(scheduler, dispatcher.clone(), &self.cfg);

        Ok(Arc::new(App::new_internal(
            self.cfg,
            registry,
            dispatcher,
            producer,
            Arc::new(ForegroundConsumer::new()),
            owned_scheduler,
        )))
    }
}
