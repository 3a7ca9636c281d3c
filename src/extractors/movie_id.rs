//! Extract the movie id from the `:id` path segment.

use crate::error::AppError;
use async_trait::async_trait;
use axum::{
    extract::{FromRequestParts, Path},
    http::request::Parts,
};

/// A positive movie id. Anything that is not a positive integer is a 404,
/// so the store is never asked for it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MovieId(pub i64);

impl MovieId {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.parse::<i64>() {
            Ok(id) if id >= 1 => Some(MovieId(id)),
            _ => None,
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for MovieId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::NotFound)?;
        MovieId::parse(&raw).ok_or(AppError::NotFound)
    }
}
