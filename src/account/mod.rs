//! # Account Service
//!
//! Registration and login: the only two operations that run without an
//! authenticated identity.

pub mod service;

pub use service::{AccountError, AccountService};
