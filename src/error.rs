//! Typed errors and HTTP mapping.

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid value for {key}: '{value}' ({reason})")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

/// Failures surfaced by the movie store. Only `RecordNotFound` and
/// `EditConflict` are translations; everything else is the driver error.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("record not found")]
    RecordNotFound,
    #[error("edit conflict")]
    EditConflict,
    #[error("query timed out")]
    Timeout,
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("request body exceeds {0} bytes")]
    PayloadTooLarge(usize),
    #[error("validation failed")]
    FailedValidation(BTreeMap<String, String>),
    #[error("not found")]
    NotFound,
    #[error("method {0} not allowed")]
    MethodNotAllowed(Method),
    #[error("edit conflict")]
    EditConflict,
    #[error("internal: {0}")]
    Internal(String),
    // Reserved for an authentication layer; nothing in this crate raises them yet.
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("invalid or missing authentication token")]
    InvalidAuthenticationToken,
    #[error("authentication required")]
    AuthenticationRequired,
    #[error("inactive account")]
    InactiveAccount,
    #[error("not permitted")]
    NotPermitted,
    #[error("rate limit exceeded")]
    RateLimitExceeded,
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::RecordNotFound => AppError::NotFound,
            StoreError::EditConflict => AppError::EditConflict,
            other => AppError::Internal(other.to_string()),
        }
    }
}

/// Payload of the `error` key: a plain message or a field -> message map.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ErrorMessage {
    Message(String),
    Fields(BTreeMap<String, String>),
}

#[derive(Serialize, Debug)]
pub struct ErrorBody {
    pub error: ErrorMessage,
}

/// Cause of a 500 response, attached to the response extensions so the
/// logging middleware can report it next to the request method and URI.
#[derive(Clone, Debug)]
pub struct ServerErrorCause(pub String);

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            AppError::FailedValidation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            AppError::EditConflict => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InvalidCredentials
            | AppError::InvalidAuthenticationToken
            | AppError::AuthenticationRequired => StatusCode::UNAUTHORIZED,
            AppError::InactiveAccount | AppError::NotPermitted => StatusCode::FORBIDDEN,
            AppError::RateLimitExceeded => StatusCode::TOO_MANY_REQUESTS,
        }
    }

    /// Client-facing message. Internal causes are never exposed.
    pub fn message(&self) -> ErrorMessage {
        let text = match self {
            AppError::FailedValidation(fields) => return ErrorMessage::Fields(fields.clone()),
            AppError::BadRequest(msg) => msg.clone(),
            AppError::PayloadTooLarge(limit) => {
                format!("body must not be larger than {} bytes", limit)
            }
            AppError::NotFound => "the requested resource could not be found".into(),
            AppError::MethodNotAllowed(method) => {
                format!("the {} method is not supported for this resource", method)
            }
            AppError::EditConflict => {
                "unable to update the record due to an edit conflict, please try again".into()
            }
            AppError::Internal(_) => {
                "the server encountered a problem and could not process your request".into()
            }
            AppError::InvalidCredentials => "invalid authentication credentials".into(),
            AppError::InvalidAuthenticationToken => {
                "invalid or missing authentication token".into()
            }
            AppError::AuthenticationRequired => {
                "you must be authenticated to access this resource".into()
            }
            AppError::InactiveAccount => {
                "your user account must be activated to access this resource".into()
            }
            AppError::NotPermitted => {
                "your user account doesn't have the necessary permissions to access this resource"
                    .into()
            }
            AppError::RateLimitExceeded => "rate limit exceeded".into(),
        };
        ErrorMessage::Message(text)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.message(),
        };
        let mut response = (status, Json(body)).into_response();
        match self {
            AppError::Internal(cause) => {
                response.extensions_mut().insert(ServerErrorCause(cause));
            }
            AppError::InvalidAuthenticationToken => {
                response
                    .headers_mut()
                    .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
            }
            _ => {}
        }
        response
    }
}
