//! # Session Tokens
//!
//! Stateless, signed, time-bounded session tokens.
//!
//! A token is `base64url(claims-json) "." base64url(hmac-sha256-tag)` where
//! the tag is computed over the encoded claims with a process-wide secret.
//! Nothing is stored server-side; expiry is the only invalidation mechanism.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use uuid::Uuid;

use super::errors::{AuthError, AuthResult};
use crate::config::AppConfig;

type HmacSha256 = Hmac<Sha256>;

/// Token lifetime in seconds (1 hour)
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Claims embedded in a session token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject: the authenticated user id
    pub sub: Uuid,
    /// Issued-at, unix seconds
    pub iat: i64,
    /// Expiry, unix seconds
    pub exp: i64,
}

/// Issues and verifies session tokens
#[derive(Clone)]
pub struct TokenService {
    secret: Vec<u8>,
}

impl TokenService {
    /// Create a token service keyed by the configured secret.
    ///
    /// The secret is validated as non-empty by `AppConfig`; an empty key
    /// here would make every issued token unverifiable.
    pub fn new(config: &AppConfig) -> Self {
        Self {
            secret: config.secret.as_bytes().to_vec(),
        }
    }

    /// Issue a token for `user_id`, valid for one hour.
    pub fn issue(&self, user_id: Uuid) -> String {
        self.issue_at(user_id, Utc::now())
    }

    /// Issue a token with an explicit issue time.
    pub fn issue_at(&self, user_id: Uuid, now: DateTime<Utc>) -> String {
        let claims = TokenClaims {
            sub: user_id,
            iat: now.timestamp(),
            exp: now.timestamp() + TOKEN_TTL_SECS,
        };
        // Claims are a plain struct with serializable fields; this cannot fail.
        let payload = serde_json::to_vec(&claims).unwrap();
        let payload_b64 = URL_SAFE_NO_PAD.encode(payload);
        let tag = self.sign(payload_b64.as_bytes());
        format!("{}.{}", payload_b64, URL_SAFE_NO_PAD.encode(tag))
    }

    /// Verify a token and return its subject.
    pub fn verify(&self, token: &str) -> AuthResult<Uuid> {
        self.verify_at(token, Utc::now())
    }

    /// Verify a token against an explicit current time.
    ///
    /// Failure order: structure, then signature, then claims, then expiry.
    /// The signature is checked before the claims are parsed so that
    /// attacker-controlled bytes never reach the JSON parser.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<Uuid> {
        let (payload_b64, tag_b64) = token.split_once('.').ok_or(AuthError::Malformed)?;
        if payload_b64.is_empty() || tag_b64.contains('.') {
            return Err(AuthError::Malformed);
        }

        let claimed_tag = URL_SAFE_NO_PAD
            .decode(tag_b64)
            .map_err(|_| AuthError::Malformed)?;
        let expected_tag = self.sign(payload_b64.as_bytes());
        // Constant-time comparison; the tag derived from the secret must not
        // leak through early-exit timing.
        if !bool::from(expected_tag.ct_eq(&claimed_tag)) {
            return Err(AuthError::BadSignature);
        }

        let payload = URL_SAFE_NO_PAD
            .decode(payload_b64)
            .map_err(|_| AuthError::Malformed)?;
        let claims: TokenClaims =
            serde_json::from_slice(&payload).map_err(|_| AuthError::Malformed)?;

        if now.timestamp() >= claims.exp {
            return Err(AuthError::Expired);
        }
        Ok(claims.sub)
    }

    fn sign(&self, payload: &[u8]) -> Vec<u8> {
        // HMAC accepts keys of any length.
        let mut mac = HmacSha256::new_from_slice(&self.secret).unwrap();
        mac.update(payload);
        mac.finalize().into_bytes().to_vec()
    }
}

impl std::fmt::Debug for TokenService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose the secret through debug output
        f.debug_struct("TokenService").finish_non_exhaustive()
    }
}
