//! # In-Memory Store
//!
//! `RwLock`-guarded maps with a unique email index. Backs the tests and
//! ephemeral runs directly, and [`FileStore`](super::FileStore) through
//! composition.

use std::collections::HashMap;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::user::{User, UserRepository};
use crate::authors::model::{AuthorRecord, AuthorRepository};
use super::{StoreError, StoreResult};

/// Serializable dump of the whole store, in insertion order.
/// This is also the on-disk shape used by `FileStore`.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    pub users: Vec<User>,
    pub authors: Vec<AuthorRecord>,
}

#[derive(Debug, Default)]
struct Inner {
    /// Users in insertion order; the id and email maps index into it
    users: Vec<User>,
    users_by_id: HashMap<Uuid, usize>,
    /// Unique email index; the authoritative duplicate-email guard
    users_by_email: HashMap<String, usize>,
    /// Author records in insertion order
    authors: Vec<AuthorRecord>,
}

/// In-memory document store
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from a snapshot.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut inner = Inner {
            authors: snapshot.authors,
            ..Inner::default()
        };
        for user in snapshot.users {
            let idx = inner.users.len();
            inner.users_by_id.insert(user.id, idx);
            inner.users_by_email.insert(user.email.clone(), idx);
            inner.users.push(user);
        }
        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Dump the store for persistence.
    pub fn snapshot(&self) -> Snapshot {
        let inner = self.inner.read().unwrap();
        Snapshot {
            users: inner.users.clone(),
            authors: inner.authors.clone(),
        }
    }
}

impl UserRepository for MemoryStore {
    fn create_user(&self, user: User) -> StoreResult<User> {
        let mut inner = self.inner.write().unwrap();
        if inner.users_by_email.contains_key(&user.email) {
            return Err(StoreError::DuplicateEmail);
        }
        let idx = inner.users.len();
        inner.users_by_id.insert(user.id, idx);
        inner.users_by_email.insert(user.email.clone(), idx);
        inner.users.push(user.clone());
        Ok(user)
    }

    fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .users_by_email
            .get(email)
            .map(|&idx| inner.users[idx].clone()))
    }

    fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.users_by_id.get(&id).map(|&idx| inner.users[idx].clone()))
    }
}

impl AuthorRepository for MemoryStore {
    fn create_author(&self, record: AuthorRecord) -> StoreResult<AuthorRecord> {
        let mut inner = self.inner.write().unwrap();
        inner.authors.push(record.clone());
        Ok(record)
    }

    fn list_for_user(&self, user_id: Uuid) -> StoreResult<Vec<AuthorRecord>> {
        let inner = self.inner.read().unwrap();
        Ok(inner
            .authors
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    fn find_author(&self, id: Uuid) -> StoreResult<Option<AuthorRecord>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.authors.iter().find(|r| r.id == id).cloned())
    }

    fn save_author(&self, record: &AuthorRecord) -> StoreResult<bool> {
        let mut inner = self.inner.write().unwrap();
        match inner.authors.iter_mut().find(|r| r.id == record.id) {
            Some(slot) => {
                *slot = record.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn delete_author(&self, id: Uuid) -> StoreResult<bool> {
        let mut inner = self.inner.write().unwrap();
        let before = inner.authors.len();
        inner.authors.retain(|r| r.id != id);
        Ok(inner.authors.len() != before)
    }
}
