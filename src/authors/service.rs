//! # Author Record Service
//!
//! Every operation takes the caller id resolved by the auth gateway;
//! nothing here is reachable without an authenticated identity.

use std::sync::Arc;

use thiserror::Error;
use uuid::Uuid;

use super::model::{AuthorRecord, AuthorRepository};
use crate::store::StoreError;

/// Record operation errors
#[derive(Debug, Error)]
pub enum AuthorError {
    #[error("{0}")]
    Validation(String),

    #[error("Author not found")]
    NotFound,

    /// Valid identity, but not the record's owner
    #[error("Unauthorized action")]
    Forbidden,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AuthorError {
    fn from(err: StoreError) -> Self {
        AuthorError::Internal(err.to_string())
    }
}

/// CRUD over the record store
#[derive(Clone)]
pub struct AuthorService {
    authors: Arc<dyn AuthorRepository>,
}

impl AuthorService {
    pub fn new(authors: Arc<dyn AuthorRepository>) -> Self {
        Self { authors }
    }

    /// Create a record owned by `caller`.
    pub fn create(
        &self,
        caller: Uuid,
        name: &str,
        description: &str,
    ) -> Result<AuthorRecord, AuthorError> {
        if name.trim().is_empty() || description.trim().is_empty() {
            return Err(AuthorError::Validation(
                "Name and description are required".to_string(),
            ));
        }
        let record = AuthorRecord::new(caller, name.to_string(), description.to_string());
        Ok(self.authors.create_author(record)?)
    }

    /// All records owned by `caller`, in insertion order.
    pub fn list_mine(&self, caller: Uuid) -> Result<Vec<AuthorRecord>, AuthorError> {
        Ok(self.authors.list_for_user(caller)?)
    }

    /// Fetch a record by id.
    ///
    /// Reads are not ownership-restricted: any authenticated user may fetch
    /// any record by id. Kept as-is on purpose; see DESIGN.md before
    /// tightening this.
    pub fn get_by_id(&self, _caller: Uuid, id: Uuid) -> Result<AuthorRecord, AuthorError> {
        self.authors.find_author(id)?.ok_or(AuthorError::NotFound)
    }

    /// Update the caller's record. Supplied fields replace, omitted fields
    /// keep their prior value; a supplied-but-empty field is rejected so a
    /// stored record never violates the non-empty invariant.
    pub fn update(
        &self,
        caller: Uuid,
        id: Uuid,
        name: Option<String>,
        description: Option<String>,
    ) -> Result<AuthorRecord, AuthorError> {
        let mut record = self.authors.find_author(id)?.ok_or(AuthorError::NotFound)?;
        if record.user_id != caller {
            return Err(AuthorError::Forbidden);
        }

        if let Some(name) = name {
            if name.trim().is_empty() {
                return Err(AuthorError::Validation("Name must not be empty".to_string()));
            }
            record.name = name;
        }
        if let Some(description) = description {
            if description.trim().is_empty() {
                return Err(AuthorError::Validation(
                    "Description must not be empty".to_string(),
                ));
            }
            record.description = description;
        }

        if !self.authors.save_author(&record)? {
            // Deleted between the read and the write
            return Err(AuthorError::NotFound);
        }
        Ok(record)
    }

    /// Delete the caller's record permanently.
    pub fn delete(&self, caller: Uuid, id: Uuid) -> Result<(), AuthorError> {
        let record = self.authors.find_author(id)?.ok_or(AuthorError::NotFound)?;
        if record.user_id != caller {
            return Err(AuthorError::Forbidden);
        }
        if !self.authors.delete_author(id)? {
            return Err(AuthorError::NotFound);
        }
        Ok(())
    }
}
