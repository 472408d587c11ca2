//! End-to-end delivery scenarios: foreground interception, fallback
//! notification, and the timer-driven cycle through the `App` wiring.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ordcast::{
    App, Config, ConsumerError, ConsumerFn, Dispatcher, Event, FALLBACK_PRIORITY,
    FOREGROUND_PRIORITY, FallbackConsumer, ForegroundConsumer, Notification, Notify, NotifyError,
    Outcome, RegistrationError, Registry, RuntimeError, Signal, TokioScheduler,
};

const INTERVAL: Duration = Duration::from_secs(5);
const EPS: Duration = Duration::from_millis(1);

#[derive(Default)]
struct RecordingNotifier {
    posted: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    fn count(&self) -> usize {
        self.posted.lock().unwrap().len()
    }
}

impl Notify for RecordingNotifier {
    fn post(&self, n: Notification) -> Result<(), NotifyError> {
        self.posted.lock().unwrap().push(n);
        Ok(())
    }
}

fn cfg() -> Config {
    Config {
        interval: INTERVAL,
        ..Config::default()
    }
}

#[tokio::test]
async fn foreground_intercepts_then_fallback_takes_over() {
    let registry = Registry::new();
    let notifier = Arc::new(RecordingNotifier::default());
    let foreground = Arc::new(ForegroundConsumer::new());
    registry
        .register(foreground.clone(), FOREGROUND_PRIORITY)
        .await
        .unwrap();
    registry
        .register_fallback(Arc::new(FallbackConsumer::from_config(
            notifier.clone(),
            &cfg(),
        )))
        .await
        .unwrap();
    let dispatcher = Dispatcher::new(Arc::clone(&registry));
    let event = Event::new(cfg().action);

    let first = dispatcher.dispatch(&event).await;
    assert_eq!(first.invoked_names(), [ForegroundConsumer::NAME]);
    assert_eq!(first.aborted_by.as_deref(), Some(ForegroundConsumer::NAME));
    assert_eq!(notifier.count(), 0);

    assert!(registry.unregister(ForegroundConsumer::NAME).await);
    let second = dispatcher.dispatch(&event).await;
    assert_eq!(second.invoked_names(), [FallbackConsumer::NAME]);
    assert!(second.aborted_by.is_none());
    assert_eq!(notifier.count(), 1);
    assert_eq!(foreground.received(), 1);
}

#[tokio::test]
async fn every_higher_priority_consumer_runs_before_an_abort() {
    let registry = Registry::new();
    let log = Arc::new(Mutex::new(Vec::new()));
    for (name, priority, signal) in [
        ("audit", 10, Signal::Continue),
        ("metrics", 5, Signal::Continue),
        ("gate", 3, Signal::Abort),
        ("late-tie", 3, Signal::Continue),
        ("bottom", -1, Signal::Continue),
    ] {
        let log = Arc::clone(&log);
        registry
            .register(
                ConsumerFn::arc(name, move |_ev| {
                    log.lock().unwrap().push(name);
                    Ok(signal)
                }),
                priority,
            )
            .await
            .unwrap();
    }

    let outcome = Dispatcher::new(registry).dispatch(&Event::new("tick")).await;

    assert_eq!(*log.lock().unwrap(), ["audit", "metrics", "gate"]);
    assert_eq!(outcome.aborted_by.as_deref(), Some("gate"));
}

#[tokio::test(start_paused = true)]
async fn app_cycle_notifies_only_while_paused() {
    let notifier = Arc::new(RecordingNotifier::default());
    let app = App::builder(cfg(), notifier.clone()).build().await.unwrap();

    app.start().unwrap();
    tokio::time::sleep(INTERVAL + EPS).await;
    assert_eq!(notifier.count(), 1);
    assert!(app.producer().is_armed());

    app.resume().await.unwrap();
    tokio::time::sleep(INTERVAL).await;
    assert_eq!(notifier.count(), 1);
    assert_eq!(app.foreground().received(), 1);

    app.pause().await;
    tokio::time::sleep(INTERVAL).await;
    assert_eq!(notifier.count(), 2);
    assert_eq!(app.producer().ticks(), 3);
}

#[tokio::test(start_paused = true)]
async fn app_stop_silences_the_cycle() {
    let notifier = Arc::new(RecordingNotifier::default());
    let app = App::builder(cfg(), notifier.clone()).build().await.unwrap();

    app.start().unwrap();
    app.start().unwrap();
    assert!(app.stop());
    tokio::time::sleep(INTERVAL * 3).await;

    assert_eq!(notifier.count(), 0);
    assert_eq!(app.producer().ticks(), 0);
}

#[tokio::test(start_paused = true)]
async fn faulty_consumer_neither_blocks_fallback_nor_the_next_tick() {
    let notifier = Arc::new(RecordingNotifier::default());
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let app = App::builder(cfg(), notifier.clone())
        .with_consumer(
            ConsumerFn::arc("flaky", move |_ev| {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(ConsumerError::fail("database unavailable"))
            }),
            0,
        )
        .build()
        .await
        .unwrap();

    app.start().unwrap();
    tokio::time::sleep(INTERVAL * 2 + EPS).await;

    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert_eq!(notifier.count(), 2);
    assert!(app.producer().is_armed());
}

#[tokio::test]
async fn resume_twice_is_idempotent_and_emit_reports_outcome() {
    let notifier = Arc::new(RecordingNotifier::default());
    let app = App::builder(cfg(), notifier.clone()).build().await.unwrap();

    app.resume().await.unwrap();
    app.resume().await.unwrap();
    assert_eq!(app.registry().len().await, 2);

    let outcome = app.emit().await;
    assert_eq!(outcome.aborted_by.as_deref(), Some(ForegroundConsumer::NAME));

    app.pause().await;
    app.pause().await;
    let outcome = app.emit().await;
    assert_eq!(outcome.invoked_names(), [FallbackConsumer::NAME]);
    assert_eq!(notifier.count(), 1);
}

#[tokio::test]
async fn shutdown_closes_the_built_in_scheduler() {
    let app = App::builder(cfg(), Arc::new(RecordingNotifier::default()))
        .build()
        .await
        .unwrap();

    app.start().unwrap();
    app.shutdown();

    assert!(!app.producer().is_armed());
    assert!(!app.stop());
    assert_eq!(app.start().unwrap_err().as_label(), "scheduler_closed");
}

#[tokio::test]
async fn extra_consumer_cannot_take_the_fallback_slot() {
    let built = App::builder(cfg(), Arc::new(RecordingNotifier::default()))
        .with_consumer(
            ConsumerFn::arc("bottom", |_ev| Ok(Signal::Continue)),
            FALLBACK_PRIORITY,
        )
        .build()
        .await;

    assert!(matches!(
        built,
        Err(RegistrationError::ReservedPriority { priority }) if priority == FALLBACK_PRIORITY
    ));
}

#[tokio::test(start_paused = true)]
async fn run_until_ticks_then_shuts_everything_down() {
    let notifier = Arc::new(RecordingNotifier::default());
    let app = App::builder(cfg(), notifier.clone()).build().await.unwrap();

    app.run_until(async {
        tokio::time::sleep(INTERVAL * 2 + EPS).await;
        Ok(())
    })
    .await
    .unwrap();

    assert_eq!(notifier.count(), 2);
    assert!(!app.producer().is_armed());
    tokio::time::sleep(INTERVAL * 2).await;
    assert_eq!(notifier.count(), 2);
    assert_eq!(app.start().unwrap_err().as_label(), "scheduler_closed");
}

#[tokio::test(start_paused = true)]
async fn run_until_shuts_down_even_when_waiting_fails() {
    let app = App::builder(cfg(), Arc::new(RecordingNotifier::default()))
        .build()
        .await
        .unwrap();

    let err = app
        .run_until(async { Err(std::io::Error::other("no signal handler")) })
        .await
        .unwrap_err();

    assert!(matches!(err, RuntimeError::Signal(_)));
    assert_eq!(err.as_label(), "runtime_signal_failed");
    assert!(!app.producer().is_armed());
}

#[tokio::test]
async fn run_until_does_not_wait_when_the_producer_cannot_start() {
    let sched = TokioScheduler::new();
    sched.close();
    let app = App::builder(cfg(), Arc::new(RecordingNotifier::default()))
        .with_scheduler(Arc::new(sched))
        .build()
        .await
        .unwrap();

    let waited = Arc::new(AtomicUsize::new(0));
    let flag = Arc::clone(&waited);
    let err = app
        .run_until(async move {
            flag.fetch_add(1, Ordering::SeqCst);
            Ok(())
        })
        .await
        .unwrap_err();

    assert_eq!(err.as_label(), "runtime_start_failed");
    assert_eq!(waited.load(Ordering::SeqCst), 0);
}

/// Each delivery reaches exactly one of the two built-in consumers.
fn assert_exclusive(outcome: &Outcome) {
    match outcome.aborted_by.as_deref() {
        Some(name) => {
            assert_eq!(name, ForegroundConsumer::NAME);
            assert_eq!(outcome.invoked_names(), [ForegroundConsumer::NAME]);
        }
        None => assert_eq!(outcome.invoked_names(), [FallbackConsumer::NAME]),
    }
    assert!(outcome.failed.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn attach_detach_racing_the_timer_keeps_one_cycle_alive() {
    const TASKS: usize = 4;
    const ROUNDS: usize = 500;

    let sched = TokioScheduler::new();
    let notifier = Arc::new(RecordingNotifier::default());
    let fast = Config {
        interval: Duration::from_millis(1),
        ..Config::default()
    };
    let app = App::builder(fast, notifier.clone())
        .with_scheduler(Arc::new(sched.clone()))
        .build()
        .await
        .unwrap();
    app.start().unwrap();

    let emitted = Arc::new(AtomicUsize::new(0));
    let churn: Vec<_> = (0..TASKS)
        .map(|_| {
            let app = Arc::clone(&app);
            let emitted = Arc::clone(&emitted);
            tokio::spawn(async move {
                for round in 0..ROUNDS {
                    app.resume().await.unwrap();
                    assert_exclusive(&app.emit().await);
                    app.pause().await;
                    assert_exclusive(&app.emit().await);
                    emitted.fetch_add(2, Ordering::SeqCst);
                    if round % 10 == 0 {
                        app.start().unwrap();
                    }
                    tokio::task::yield_now().await;
                }
            })
        })
        .collect();

    while !churn.iter().all(|task| task.is_finished()) {
        assert!(sched.pending() <= 1);
        tokio::time::sleep(Duration::from_micros(200)).await;
    }
    for task in churn {
        task.await.unwrap();
    }

    // The cycle survived the churn.
    let before = app.producer().ticks();
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(app.producer().ticks() > before);
    assert!(app.producer().is_armed());

    // Between a fire and its re-arm nothing is waiting; otherwise exactly one timer is.
    let mut saw_one = false;
    for _ in 0..1_000 {
        let pending = sched.pending();
        assert!(pending <= 1);
        if pending == 1 {
            saw_one = true;
            break;
        }
        tokio::task::yield_now().await;
    }
    assert!(saw_one);

    assert!(app.stop());
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert_eq!(sched.pending(), 0);
    let delivered = app.foreground().received() as usize + notifier.count();
    assert_eq!(
        delivered,
        app.producer().ticks() as usize + emitted.load(Ordering::SeqCst)
    );
}
