//! # Auth Gateway
//!
//! The single authorization gate in front of every record route. Resolves
//! the raw token in the `Authorization` header (no "Bearer " prefix; the
//! clients send the token as-is) into a user id, or rejects the request.
//! Each request is verified independently; nothing is cached between
//! requests.

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use uuid::Uuid;

use super::errors::AuthError;
use crate::http::{ApiError, AppState};

/// The authenticated caller, extracted per request.
///
/// A handler that takes `AuthUser` cannot run without a verified token;
/// there is no other way to construct one from a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthUser(pub Uuid);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .filter(|value| !value.is_empty())
            .ok_or(AuthError::NoToken)?;

        let user_id = state.tokens.verify(token)?;
        Ok(AuthUser(user_id))
    }
}
