//! # HTTP Layer
//!
//! Axum router, shared state, and the server entry point.

pub mod auth_routes;
pub mod author_routes;
pub mod error;

pub use error::ApiError;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{delete, get, post, put};
use axum::Router;
use thiserror::Error;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::account::AccountService;
use crate::auth::{TokenService, UserRepository};
use crate::authors::{AuthorRepository, AuthorService};
use crate::config::AppConfig;
use crate::store::{FileStore, MemoryStore, StoreError};

/// Server startup errors
#[derive(Debug, Error)]
pub enum ServeError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("Cannot bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Shared state behind every handler
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub authors: AuthorService,
    pub tokens: TokenService,
}

impl AppState {
    /// Wire the services up around a single document store.
    pub fn with_store<S>(store: Arc<S>, config: &AppConfig) -> Self
    where
        S: UserRepository + AuthorRepository + 'static,
    {
        let tokens = TokenService::new(config);
        Self {
            accounts: AccountService::new(store.clone(), tokens.clone()),
            authors: AuthorService::new(store),
            tokens,
        }
    }
}

/// Build the application router.
///
/// CORS is permissive: the single-page client is served from a different
/// origin in development.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/auth/signup", post(auth_routes::signup))
        .route("/api/auth/login", post(auth_routes::login))
        .route("/api/author/authorcreate", post(author_routes::create_author))
        .route("/api/author/getauthors", get(author_routes::get_authors))
        .route("/api/author/getauthor/{id}", get(author_routes::get_author))
        .route("/api/author/updateauthor/{id}", put(author_routes::update_author))
        .route("/api/author/deleteauthor/{id}", delete(author_routes::delete_author))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn root() -> &'static str {
    "authorly is running"
}

/// Open the configured store, bind, and serve until shutdown.
pub async fn serve(config: AppConfig) -> Result<(), ServeError> {
    let state = match &config.data_path {
        Some(path) => {
            info!(path = %path.display(), "using file-backed store");
            AppState::with_store(Arc::new(FileStore::open(path.clone())?), &config)
        }
        None => {
            info!("no data path configured, running in-memory");
            AppState::with_store(Arc::new(MemoryStore::new()), &config)
        }
    };

    let addr = SocketAddr::new(config.bind, config.port);
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;
    info!(%addr, "listening");
    axum::serve(listener, router(state)).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    fn test_app() -> Router {
        let state = AppState::with_store(Arc::new(MemoryStore::new()), &AppConfig::for_tests());
        router(state)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", token);
        }
        let request = match body {
            Some(value) => builder
                .header("content-type", "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn signup_and_login(app: &Router, email: &str, password: &str) -> String {
        let (status, _) = send(
            app,
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({ "email": email, "password": password, "confirmPassword": password })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) = send(
            app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": email, "password": password })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        body["token"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn test_full_crud_scenario() {
        let app = test_app();

        // Register and log in
        let token = signup_and_login(&app, "a@x.com", "pw123").await;

        // Create a record
        let (status, body) = send(
            &app,
            "POST",
            "/api/author/authorcreate",
            Some(&token),
            Some(json!({ "name": "Jane", "description": "bio" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let record_id = body["author"]["id"].as_str().unwrap().to_string();
        assert_eq!(body["author"]["name"], "Jane");
        assert_eq!(body["author"]["description"], "bio");

        // It shows up in the owner's list
        let (status, body) =
            send(&app, "GET", "/api/author/getauthors", Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["id"].as_str().unwrap(), record_id);

        // Partial update: name changes, description survives
        let (status, body) = send(
            &app,
            "PUT",
            &format!("/api/author/updateauthor/{record_id}"),
            Some(&token),
            Some(json!({ "name": "Janet" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["author"]["name"], "Janet");
        assert_eq!(body["author"]["description"], "bio");

        // A different user with a valid token cannot delete it
        let other_token = signup_and_login(&app, "b@x.com", "pw456").await;
        let (status, _) = send(
            &app,
            "DELETE",
            &format!("/api/author/deleteauthor/{record_id}"),
            Some(&other_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        // But the other user can read it by id (reads are not owner-scoped)
        let (status, _) = send(
            &app,
            "GET",
            &format!("/api/author/getauthor/{record_id}"),
            Some(&other_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        // The owner deletes it, and it is gone
        let (status, _) = send(
            &app,
            "DELETE",
            &format!("/api/author/deleteauthor/{record_id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(
            &app,
            "GET",
            &format!("/api/author/getauthor/{record_id}"),
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_signup_failures() {
        let app = test_app();

        let (status, body) = send(
            &app,
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({ "email": "a@x.com", "password": "pw123", "confirmPassword": "other" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Passwords do not match");

        signup_and_login(&app, "a@x.com", "pw123").await;
        let (status, body) = send(
            &app,
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({ "email": "a@x.com", "password": "pw999", "confirmPassword": "pw999" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "User already exists");
    }

    #[tokio::test]
    async fn test_login_failures_are_uniform() {
        let app = test_app();
        signup_and_login(&app, "a@x.com", "pw123").await;

        let (unknown_status, unknown_body) = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "ghost@x.com", "password": "pw123" })),
        )
        .await;
        let (wrong_status, wrong_body) = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "a@x.com", "password": "wrong" })),
        )
        .await;

        assert_eq!(unknown_status, StatusCode::BAD_REQUEST);
        assert_eq!(wrong_status, StatusCode::BAD_REQUEST);
        assert_eq!(unknown_body, wrong_body);
    }

    #[tokio::test]
    async fn test_protected_routes_reject_bad_tokens() {
        let app = test_app();

        // No token at all
        let (status, body) =
            send(&app, "GET", "/api/author/getauthors", None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["error"], "Access denied, no token provided");

        // Garbage token
        let (status, body) =
            send(&app, "GET", "/api/author/getauthors", Some("garbage"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid or expired token");

        // Token signed with a different secret
        let mut foreign = AppConfig::for_tests();
        foreign.secret = "other-secret".to_string();
        let foreign_token = TokenService::new(&foreign).issue(uuid::Uuid::new_v4());
        let (status, body) = send(
            &app,
            "GET",
            "/api/author/getauthors",
            Some(&foreign_token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid or expired token");
    }

    #[tokio::test]
    async fn test_create_requires_fields() {
        let app = test_app();
        let token = signup_and_login(&app, "a@x.com", "pw123").await;

        let (status, body) = send(
            &app,
            "POST",
            "/api/author/authorcreate",
            Some(&token),
            Some(json!({ "name": "Jane" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Name and description are required");
    }

    #[tokio::test]
    async fn test_non_uuid_id_is_not_found() {
        let app = test_app();
        let token = signup_and_login(&app, "a@x.com", "pw123").await;

        let (status, _) = send(
            &app,
            "GET",
            "/api/author/getauthor/not-a-uuid",
            Some(&token),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_login_response_never_contains_hash() {
        let app = test_app();
        let (_, signup_body) = send(
            &app,
            "POST",
            "/api/auth/signup",
            None,
            Some(json!({ "email": "a@x.com", "password": "pw123", "confirmPassword": "pw123" })),
        )
        .await;
        assert!(signup_body["user"].get("passwordHash").is_none());

        let (_, login_body) = send(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({ "email": "a@x.com", "password": "pw123" })),
        )
        .await;
        assert!(login_body["user"].get("passwordHash").is_none());
        assert_eq!(login_body["user"]["email"], "a@x.com");
    }
}
