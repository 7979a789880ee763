//! # Author Records
//!
//! CRUD over author profiles with the ownership invariant: a record is
//! mutated or deleted only by the user that created it.

pub mod model;
pub mod service;

pub use model::{Article, AuthorRecord, AuthorRepository};
pub use service::{AuthorError, AuthorService};
