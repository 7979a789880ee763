//! # Registration & Login

use std::sync::Arc;

use thiserror::Error;
use tracing::warn;

use crate::auth::password::{hash_password, verify_password, DUMMY_HASH};
use crate::auth::token::TokenService;
use crate::auth::user::{PublicUser, User, UserRepository};
use crate::store::StoreError;

/// Account operation errors
#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("User already exists")]
    DuplicateEmail,

    /// Deliberately identical for unknown email and wrong password, so a
    /// caller cannot probe which addresses are registered.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("{0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for AccountError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => AccountError::DuplicateEmail,
            other => AccountError::Internal(other.to_string()),
        }
    }
}

/// Registration and login over the credential store
#[derive(Clone)]
pub struct AccountService {
    users: Arc<dyn UserRepository>,
    tokens: TokenService,
}

impl AccountService {
    pub fn new(users: Arc<dyn UserRepository>, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    /// Register a new account.
    ///
    /// The password-mismatch check runs before anything else; the store's
    /// unique-email guard is the authoritative duplicate check and the
    /// `find_by_email` pre-check only exists to skip hashing work on the
    /// common duplicate case.
    pub fn register(
        &self,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<PublicUser, AccountError> {
        if password != confirm_password {
            return Err(AccountError::PasswordMismatch);
        }
        if email.trim().is_empty() || password.is_empty() {
            return Err(AccountError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        if self.users.find_by_email(email)?.is_some() {
            return Err(AccountError::DuplicateEmail);
        }

        let hash = hash_password(password)
            .map_err(|err| AccountError::Internal(format!("password hashing failed: {err}")))?;
        let created = self.users.create_user(User::new(email.to_string(), hash))?;
        Ok(PublicUser::from(&created))
    }

    /// Verify credentials and issue a session token.
    pub fn login(&self, email: &str, password: &str) -> Result<(String, PublicUser), AccountError> {
        let user = match self.users.find_by_email(email)? {
            Some(user) => user,
            None => {
                // Burn the same hashing work as the wrong-password path so
                // the two failures are not distinguishable by timing.
                let _ = verify_password(password, DUMMY_HASH);
                warn!(email, "login attempt for unknown email");
                return Err(AccountError::InvalidCredentials);
            }
        };

        if !verify_password(password, &user.password_hash) {
            warn!(email, "login attempt with wrong password");
            return Err(AccountError::InvalidCredentials);
        }

        let token = self.tokens.issue(user.id);
        Ok((token, PublicUser::from(&user)))
    }
}
