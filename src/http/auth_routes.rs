//! # Auth Routes
//!
//! `/api/auth/signup` and `/api/auth/login`. Neither requires a token.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use super::{ApiError, AppState};

/// Signup body. Fields default to empty so that a missing field reads as
/// a validation failure (400) instead of a deserialization error.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Login body
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/signup
pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .accounts
        .register(&body.email, &body.password, &body.confirm_password)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User created successfully",
            "user": user,
        })),
    ))
}

/// POST /api/auth/login
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let (token, user) = state.accounts.login(&body.email, &body.password)?;
    Ok(Json(json!({
        "token": token,
        "user": user,
    })))
}
