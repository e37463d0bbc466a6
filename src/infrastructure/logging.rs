//! File-based logging
//!
//! Each process writes under `<directory>/<slug>/`:
//! - `main.*` - all events, JSON lines
//! - `error.*` - warnings and errors only
//!
//! plus a console layer for interactive runs.

use std::fs;
use std::io;
use std::path::Path;
use tracing_appender::non_blocking::{NonBlocking, WorkerGuard};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{
    layer::{Layer, SubscriberExt},
    util::SubscriberInitExt,
    EnvFilter,
};

use crate::infrastructure::config::LogConfig;

/// Initialize logging for one process
///
/// `process` names the log subdirectory ("Backend 1" -> `logs/backend-1/`).
/// If that directory cannot be created or written, only the console layer is
/// installed and a warning names the path; logging never stops a backend.
/// Returns WorkerGuards which must be kept alive for the duration of the program.
pub fn init_logging(config: &LogConfig, process: &str) -> Vec<WorkerGuard> {
    let dir = config.directory.join(slug(process));
    let mut guards = Vec::new();

    let (main_appender, error_appender, file_error) = match open_appenders(&dir) {
        Ok((main, error)) => {
            guards.push(main.1);
            guards.push(error.1);
            (Some(main.0), Some(error.0), None)
        }
        Err(e) => (None, None, Some(e)),
    };

    let main_layer = main_appender.map(|writer| {
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_level(true)
            .with_thread_ids(true)
            .json()
    });

    let error_layer = error_appender.map(|writer| {
        tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(false)
            .with_target(true)
            .with_level(true)
            .with_filter(tracing_subscriber::filter::LevelFilter::WARN)
    });

    let console_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true);

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.level));

    let installed = tracing_subscriber::registry()
        .with(filter)
        .with(main_layer)
        .with(error_layer)
        .with(console_layer)
        .try_init();

    if let Err(e) = installed {
        tracing::debug!("Global subscriber already set: {}", e);
    }

    match file_error {
        None => tracing::info!("Logging initialized in {}", dir.display()),
        Some(e) => tracing::warn!(
            "Cannot write logs to {}: {}; logging to console only",
            dir.display(),
            e
        ),
    }

    guards
}

type Appender = (NonBlocking, WorkerGuard);

/// Create the log directory and both file appenders
fn open_appenders(dir: &Path) -> io::Result<(Appender, Appender)> {
    fs::create_dir_all(dir)?;
    let main = create_appender(dir, "main")?;
    let error = create_appender(dir, "error")?;
    Ok((main, error))
}

/// Create a daily rolling file appender
fn create_appender(dir: &Path, name: &str) -> io::Result<Appender> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(name)
        .build(dir)
        .map_err(io::Error::other)?;

    Ok(tracing_appender::non_blocking(appender))
}

/// Lowercase, dash-separated directory name
fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() {
        out.push_str("main");
    }
    out
}

/// Event on the request/response path
#[macro_export]
macro_rules! log_http {
    ($level:expr, $($arg:tt)+) => {
        tracing::event!(target: "http", $level, $($arg)+)
    };
}
