//! # Auth Errors

use thiserror::Error;

/// Result type for token and gateway operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Token verification and request authentication errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No token header on the request
    #[error("Access denied, no token provided")]
    NoToken,

    /// Token cannot be decoded into payload + signature
    #[error("Malformed token")]
    Malformed,

    /// Signature does not verify against the service secret
    #[error("Invalid token signature")]
    BadSignature,

    /// Token is past its embedded expiry
    #[error("Token expired")]
    Expired,
}

impl AuthError {
    /// HTTP status for this failure.
    ///
    /// A missing header is 401; a token that fails verification is 400,
    /// matching the API contract clients already depend on.
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::NoToken => 401,
            AuthError::Malformed | AuthError::BadSignature | AuthError::Expired => 400,
        }
    }
}
