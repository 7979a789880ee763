//! # API Error Mapping
//!
//! Every domain error converges here and becomes a status code plus a
//! `{"error": "..."}` body. Internal failures are logged with their
//! detail and surfaced as a generic 500; the detail never leaves the
//! process.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::error;

use crate::account::AccountError;
use crate::auth::AuthError;
use crate::authors::AuthorError;

/// HTTP-facing error
#[derive(Debug)]
pub enum ApiError {
    /// Bad input, failed credentials, or a token that fails verification
    BadRequest(String),
    /// No token on a protected route
    Unauthorized(String),
    /// Valid identity, wrong owner
    Forbidden(String),
    NotFound(String),
    /// Store or other unexpected failure; the payload is log-only
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = match &self {
            ApiError::Internal(detail) => {
                error!(%detail, "internal error");
                "Internal server error".to_string()
            }
            ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg) => msg.clone(),
        };
        (self.status(), Json(json!({ "error": message }))).into_response()
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::NoToken => ApiError::Unauthorized(err.to_string()),
            // Invalid and expired tokens are 400s, per the API contract
            AuthError::Malformed | AuthError::BadSignature | AuthError::Expired => {
                ApiError::BadRequest("Invalid or expired token".to_string())
            }
        }
    }
}

impl From<AccountError> for ApiError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::PasswordMismatch
            | AccountError::DuplicateEmail
            | AccountError::InvalidCredentials
            | AccountError::Validation(_) => ApiError::BadRequest(err.to_string()),
            AccountError::Internal(detail) => ApiError::Internal(detail),
        }
    }
}

impl From<AuthorError> for ApiError {
    fn from(err: AuthorError) -> Self {
        match err {
            AuthorError::Validation(_) => ApiError::BadRequest(err.to_string()),
            AuthorError::NotFound => ApiError::NotFound(err.to_string()),
            AuthorError::Forbidden => ApiError::Forbidden(err.to_string()),
            AuthorError::Internal(detail) => ApiError::Internal(detail),
        }
    }
}
