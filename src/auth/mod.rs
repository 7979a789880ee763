//! # Authentication
//!
//! Session tokens, password hashing, user records, and the request-time
//! auth gateway.

pub mod errors;
pub mod gateway;
pub mod password;
pub mod token;
pub mod user;

pub use errors::{AuthError, AuthResult};
pub use gateway::AuthUser;
pub use token::{TokenClaims, TokenService, TOKEN_TTL_SECS};
pub use user::{PublicUser, User, UserRepository};
