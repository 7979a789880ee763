//! # Author Records
//!
//! The owned content type of the service, plus the record-store seam.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::store::StoreResult;

/// An article embedded in an author profile.
///
/// Part of the stored shape and echoed back in responses; no API
/// operation writes articles yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub content: String,
}

/// An author profile owned by a single user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorRecord {
    pub id: Uuid,
    /// Owning user; set at creation and never transferred
    pub user_id: Uuid,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub articles: Vec<Article>,
    pub created_at: DateTime<Utc>,
}

impl AuthorRecord {
    pub fn new(user_id: Uuid, name: String, description: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            name,
            description,
            articles: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

/// Record store interface.
pub trait AuthorRepository: Send + Sync {
    /// Insert a new record.
    fn create_author(&self, record: AuthorRecord) -> StoreResult<AuthorRecord>;

    /// All records owned by `user_id`, in insertion order.
    fn list_for_user(&self, user_id: Uuid) -> StoreResult<Vec<AuthorRecord>>;

    /// Lookup by id.
    fn find_author(&self, id: Uuid) -> StoreResult<Option<AuthorRecord>>;

    /// Replace an existing record (matched by id). Returns `false` when no
    /// record with that id exists.
    fn save_author(&self, record: &AuthorRecord) -> StoreResult<bool>;

    /// Remove a record permanently. Returns `false` when already absent.
    fn delete_author(&self, id: Uuid) -> StoreResult<bool>;
}
