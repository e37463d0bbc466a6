//! Request counters
//!
//! Lock-free counters bumped by the responder on every request.
//! Summarized in the log when a server shuts down.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

/// Per-server request metrics
pub struct RequestMetrics {
    /// Responses written
    served: AtomicU64,
    /// Start time for uptime calculation
    start_time: Instant,
}

/// Metrics snapshot
#[derive(Debug, Clone, Copy)]
pub struct MetricsSnapshot {
    pub served: u64,
    pub uptime_seconds: u64,
    pub request_rate: f64, // requests per second
}

impl RequestMetrics {
    pub fn new() -> Self {
        Self {
            served: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record one response
    #[inline]
    pub fn record_response(&self) {
        self.served.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn served(&self) -> u64 {
        self.served.load(Ordering::Relaxed)
    }

    /// Get current snapshot of metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        let served = self.served();
        let uptime = self.start_time.elapsed().as_secs();
        let rate = if uptime > 0 {
            served as f64 / uptime as f64
        } else {
            0.0
        };

        MetricsSnapshot {
            served,
            uptime_seconds: uptime,
            request_rate: rate,
        }
    }
}

impl Default for RequestMetrics {
    fn default() -> Self {
        Self::new()
    }
}
