//! # Ordered delivery demo
//!
//! Runs the recurring producer with a short interval and toggles the
//! foreground consumer every few ticks, so the log alternates between
//! "received in foreground" and fallback notifications.
//!
//! ## Run
//! ```bash
//! RUST_LOG=ordcast=debug cargo run --example ordered --features logging
//! ```

use std::sync::Arc;
use std::time::Duration;

use ordcast::{App, Config, LogNotifier};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("ordcast=info")),
        )
        .init();

    let cfg = Config {
        interval: Duration::from_secs(1),
        ..Config::default()
    };
    let notifier = Arc::new(LogNotifier::new());
    let app = App::builder(cfg, notifier.clone()).build().await?;

    app.start()?;
    for round in 0..3 {
        println!("round {round}: foreground attached");
        app.resume().await?;
        tokio::time::sleep(Duration::from_millis(2_500)).await;

        println!("round {round}: foreground detached");
        app.pause().await;
        tokio::time::sleep(Duration::from_millis(2_500)).await;
    }
    app.shutdown();

    println!();
    println!("Summary:");
    println!(" ├─► Ticks:         {}", app.producer().ticks());
    println!(" ├─► Intercepted:   {}", app.foreground().received());
    println!(" └─► Notifications: {}", notifier.posted());
    Ok(())
}
