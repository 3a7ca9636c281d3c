//! Success envelope helpers.

use crate::model::{Metadata, Movie};
use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    Json,
};
use serde::Serialize;

/// Body of `GET /v1/movies`.
#[derive(Serialize)]
pub struct MovieList {
    pub metadata: Metadata,
    pub movies: Vec<Movie>,
}

#[derive(Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

pub fn ok<T: Serialize>(data: T) -> (StatusCode, Json<T>) {
    (StatusCode::OK, Json(data))
}

/// 201 with a `Location` header pointing at the new resource.
pub fn created<T: Serialize>(location: &str, data: T) -> (StatusCode, HeaderMap, Json<T>) {
    let mut headers = HeaderMap::new();
    if let Ok(value) = HeaderValue::from_str(location) {
        headers.insert(header::LOCATION, value);
    }
    (StatusCode::CREATED, headers, Json(data))
}

pub fn message(message: &'static str) -> (StatusCode, Json<MessageBody>) {
    ok(MessageBody { message })
}
