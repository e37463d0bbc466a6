//! Infrastructure
//!
//! Everything around the responder itself:
//! - Configuration management
//! - Logging and request metrics
//! - Graceful shutdown

pub mod config;
pub mod logging;
pub mod metrics;
pub mod shutdown;

pub use metrics::{MetricsSnapshot, RequestMetrics};
pub use shutdown::{shutdown_signal, Shutdown};
