//! Response post-processing: server-error logging and error envelopes for
//! rejections produced outside the handlers.

use crate::error::{AppError, ServerErrorCause};
use crate::routes::MAX_BODY_BYTES;
use axum::{
    extract::Request,
    http::{header, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
};

/// Logs the cause of any 500 response together with the request method and URI.
pub async fn log_server_errors(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let response = next.run(req).await;
    if let Some(cause) = response.extensions().get::<ServerErrorCause>() {
        tracing::error!(%method, %uri, error = %cause.0, "server error");
    }
    response
}

/// The body limit layer answers an oversized `Content-Length` with a plain-text
/// 413 before any handler runs; rewrite it into the JSON envelope.
pub async fn envelope_payload_too_large(req: Request, next: Next) -> Response {
    let response = next.run(req).await;
    if response.status() == StatusCode::PAYLOAD_TOO_LARGE && !is_json(&response) {
        return AppError::PayloadTooLarge(MAX_BODY_BYTES).into_response();
    }
    response
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}
