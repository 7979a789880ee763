//! # Document Store
//!
//! Persistence for users and author records. The service talks to the
//! repository traits (`UserRepository`, `AuthorRepository`); two
//! implementations are bundled:
//!
//! - [`MemoryStore`]: in-memory maps, used by tests and `--ephemeral` runs
//! - [`FileStore`]: `MemoryStore` plus an atomically rewritten JSON snapshot

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Store errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// Unique-email constraint violation on user insert
    #[error("User already exists")]
    DuplicateEmail,

    /// Snapshot file could not be read or written
    #[error("Store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Snapshot file exists but does not parse
    #[error("Store corruption: {0}")]
    Corrupt(#[from] serde_json::Error),
}
