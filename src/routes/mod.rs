//! Router assembly: versioned API routes, fallbacks, and the middleware stack.

pub mod common;
pub mod movies;

use crate::handlers::not_found;
use crate::middleware::{envelope_payload_too_large, log_server_errors};
use crate::state::AppState;
use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

/// Request bodies above this size are rejected.
pub const MAX_BODY_BYTES: usize = 1_048_576;

pub use common::common_routes;
pub use movies::movie_routes;

/// Full application: `/v1` routes with JSON 404/405 fallbacks, body limit,
/// server-error logging, and request tracing.
pub fn app(state: AppState) -> Router {
    Router::new()
        .nest("/v1", common_routes().merge(movie_routes()))
        .fallback(not_found)
        .layer(axum::middleware::from_fn(log_server_errors))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_BYTES))
        .layer(axum::middleware::from_fn(envelope_payload_too_large))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
