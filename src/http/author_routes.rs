//! # Author Routes
//!
//! `/api/author/*`. Every handler takes [`AuthUser`], so every route is
//! behind the auth gateway; there is no unauthenticated path to a record.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use super::{ApiError, AppState};
use crate::auth::AuthUser;

/// Create body. Missing fields read as empty and fail validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateAuthorRequest {
    pub name: String,
    pub description: String,
}

/// Update body. Omitted fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct UpdateAuthorRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// An id that is not a well-formed UUID cannot name any record, so it
/// gets the same 404 as an absent one.
fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound("Author not found".to_string()))
}

/// POST /api/author/authorcreate
pub async fn create_author(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Json(body): Json<CreateAuthorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.authors.create(caller, &body.name, &body.description)?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Author created successfully",
            "author": record,
        })),
    ))
}

/// GET /api/author/getauthors
pub async fn get_authors(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
) -> Result<impl IntoResponse, ApiError> {
    let records = state.authors.list_mine(caller)?;
    Ok(Json(records))
}

/// GET /api/author/getauthor/{id}
pub async fn get_author(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state.authors.get_by_id(caller, parse_id(&id)?)?;
    Ok(Json(record))
}

/// PUT /api/author/updateauthor/{id}
pub async fn update_author(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
    Json(body): Json<UpdateAuthorRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let record = state
        .authors
        .update(caller, parse_id(&id)?, body.name, body.description)?;
    Ok(Json(json!({
        "message": "Author updated successfully",
        "author": record,
    })))
}

/// DELETE /api/author/deleteauthor/{id}
pub async fn delete_author(
    State(state): State<AppState>,
    AuthUser(caller): AuthUser,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.authors.delete(caller, parse_id(&id)?)?;
    Ok(Json(json!({ "message": "Author deleted successfully" })))
}
