//! # Users
//!
//! Account records and the credential-store seam.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::StoreResult;

/// A registered user.
///
/// Created on signup and immutable afterwards; no exposed operation
/// updates or deletes a user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    /// Unique, compared case-sensitively as stored
    pub email: String,
    /// Argon2 PHC string; never serialized to API responses
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn new(email: String, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}

/// User shape returned by the API: everything except the hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            created_at: user.created_at,
        }
    }
}

/// Credential store interface.
///
/// Any document store with a unique index on email fits behind this seam;
/// the bundled implementations live in `crate::store`.
pub trait UserRepository: Send + Sync {
    /// Insert a new user. The store's unique-email guard is authoritative:
    /// a duplicate yields `StoreError::DuplicateEmail` even if a pre-check
    /// raced with a concurrent insert.
    fn create_user(&self, user: User) -> StoreResult<User>;

    /// Exact-match lookup by email.
    fn find_by_email(&self, email: &str) -> StoreResult<Option<User>>;

    /// Lookup by id.
    fn find_user(&self, id: Uuid) -> StoreResult<Option<User>>;
}
