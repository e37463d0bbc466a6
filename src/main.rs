//! Runs every configured stub backend in one process
//!
//! Each backend gets its own listener and task; Ctrl-C or SIGTERM stops
//! them all.

use stub_backends::infrastructure::logging::init_logging;
use stub_backends::infrastructure::{shutdown_signal, Shutdown};
use stub_backends::{serve_all, Config, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::load()?;
    let _guards = init_logging(&config.log, "stub-backends");

    tracing::info!("Starting {} backends", config.backends.len());

    let shutdown = Shutdown::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        shutdown_signal().await;
        trigger.trigger();
    });

    serve_all(config.backends, shutdown).await.inspect_err(|e| {
        tracing::error!("{}", e);
    })
}
