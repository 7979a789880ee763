//! authorly - a small, self-hostable author-profile service
//!
//! Users register and log in with email + password, then manage
//! author-profile records scoped to their own account over a REST API.

pub mod account;
pub mod auth;
pub mod authors;
pub mod config;
pub mod http;
pub mod store;
