//! Common routes: healthcheck and readiness.

use crate::handlers::{healthcheck, method_not_allowed, ready};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn common_routes() -> Router<AppState> {
    Router::new()
        .route("/healthcheck", get(healthcheck).fallback(method_not_allowed))
        .route("/ready", get(ready).fallback(method_not_allowed))
}
