//! HTTP handlers for the healthcheck and movie CRUD.

pub mod healthcheck;
pub mod movies;
pub use healthcheck::*;
pub use movies::*;

use crate::error::AppError;
use axum::http::Method;

pub async fn not_found() -> AppError {
    AppError::NotFound
}

pub async fn method_not_allowed(method: Method) -> AppError {
    AppError::MethodNotAllowed(method)
}
