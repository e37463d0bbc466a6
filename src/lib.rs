//! Static HTML stub backends
//!
//! Each backend accepts any HTTP request on a fixed loopback port and answers
//! with the same `200 text/html` body, regardless of method, path or payload.

pub mod infrastructure;
pub mod responder;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use infrastructure::config::{BackendConfig, Config, LogConfig};
pub use responder::{router, serve_all, StubServer};

use std::net::SocketAddr;
use thiserror::Error;

/// Main error type for the stub backends
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, BackendError>;
