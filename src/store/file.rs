//! # File-Backed Store
//!
//! A [`MemoryStore`] that loads a JSON snapshot at startup and rewrites it
//! after every mutation. The snapshot is written to a sibling temp file and
//! renamed into place, so a crash mid-write leaves the previous snapshot
//! intact rather than a truncated one.

use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Mutex;

use uuid::Uuid;

use crate::auth::user::{User, UserRepository};
use crate::authors::model::{AuthorRecord, AuthorRepository};
use super::memory::{MemoryStore, Snapshot};
use super::StoreResult;

/// JSON-snapshot document store
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    memory: MemoryStore,
    /// Serializes snapshot writes; concurrent mutations must not interleave
    /// their temp-file renames
    write_lock: Mutex<()>,
}

impl FileStore {
    /// Open a store at `path`, loading the existing snapshot if present.
    pub fn open(path: PathBuf) -> StoreResult<Self> {
        let memory = match fs::read(&path) {
            Ok(bytes) => {
                let snapshot: Snapshot = serde_json::from_slice(&bytes)?;
                MemoryStore::from_snapshot(snapshot)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => MemoryStore::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(Self {
            path,
            memory,
            write_lock: Mutex::new(()),
        })
    }

    fn persist(&self) -> StoreResult<()> {
        let _guard = self.write_lock.lock().unwrap();
        let snapshot = self.memory.snapshot();
        let bytes = serde_json::to_vec_pretty(&snapshot)?;

        let tmp = self.path.with_extension("tmp");
        {
            let mut file = fs::File::create(&tmp)?;
            file.write_all(&bytes)?;
            file.sync_all()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl UserRepository for FileStore {
    fn create_user(&self, user: User) -> StoreResult<User> {
        let created = self.memory.create_user(user)?;
        self.persist()?;
        Ok(created)
    }

    fn find_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        self.memory.find_by_email(email)
    }

    fn find_user(&self, id: Uuid) -> StoreResult<Option<User>> {
        self.memory.find_user(id)
    }
}

impl AuthorRepository for FileStore {
    fn create_author(&self, record: AuthorRecord) -> StoreResult<AuthorRecord> {
        let created = self.memory.create_author(record)?;
        self.persist()?;
        Ok(created)
    }

    fn list_for_user(&self, user_id: Uuid) -> StoreResult<Vec<AuthorRecord>> {
        self.memory.list_for_user(user_id)
    }

    fn find_author(&self, id: Uuid) -> StoreResult<Option<AuthorRecord>> {
        self.memory.find_author(id)
    }

    fn save_author(&self, record: &AuthorRecord) -> StoreResult<bool> {
        let saved = self.memory.save_author(record)?;
        if saved {
            self.persist()?;
        }
        Ok(saved)
    }

    fn delete_author(&self, id: Uuid) -> StoreResult<bool> {
        let deleted = self.memory.delete_author(id)?;
        if deleted {
            self.persist()?;
        }
        Ok(deleted)
    }
}
