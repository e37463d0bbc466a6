//! Static responder
//!
//! A single fallback handler answers every method on every path with the
//! configured body. The request is never read.

use axum::{
    body::Bytes,
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::IntoResponse,
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::infrastructure::config::BackendConfig;
use crate::infrastructure::metrics::RequestMetrics;
use crate::log_http;

/// Content-Type sent with every response
pub const CONTENT_TYPE_HTML: &str = "text/html";

/// Shared responder state
#[derive(Clone)]
pub struct ResponderState {
    /// Fixed response body
    pub body: Bytes,
    pub metrics: Arc<RequestMetrics>,
}

/// Build the router for one backend
pub fn router(config: &BackendConfig, metrics: Arc<RequestMetrics>) -> Router {
    let state = ResponderState {
        body: Bytes::from(config.body.clone()),
        metrics,
    };

    Router::new()
        .fallback(respond)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn respond(State(state): State<ResponderState>) -> impl IntoResponse {
    state.metrics.record_response();
    log_http!(tracing::Level::DEBUG, served = state.metrics.served(), "static response");

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE_HTML))],
        state.body,
    )
}
