//! # Password Hashing
//!
//! Argon2id with per-password random salts, stored as PHC strings.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

/// A stored hash that no real password will ever match. Used to keep the
/// unknown-email login path doing the same amount of work as the
/// wrong-password path.
pub const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$YXV0aG9ybHlkdW1teQ$kJgBzPYDNKBxdDV8HCfmMRM5AFyM6ddjCSBCFB0Yin4";

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Verify a password against a stored PHC hash string.
pub fn verify_password(password: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        // An unparseable stored hash can only mean store corruption;
        // treat it as a non-match.
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("pw123").unwrap();
        assert!(verify_password("pw123", &hash));
        assert!(!verify_password("pw124", &hash));
    }

    #[test]
    fn test_hashes_are_salted() {
        let a = hash_password("pw123").unwrap();
        let b = hash_password("pw123").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_plaintext_never_stored() {
        let hash = hash_password("pw123").unwrap();
        assert!(!hash.contains("pw123"));
        assert!(hash.starts_with("$argon2"));
    }

    #[test]
    fn test_dummy_hash_parses_and_matches_nothing() {
        assert!(PasswordHash::new(DUMMY_HASH).is_ok());
        assert!(!verify_password("pw123", DUMMY_HASH));
        assert!(!verify_password("", DUMMY_HASH));
    }

    #[test]
    fn test_garbage_stored_hash_is_non_match() {
        assert!(!verify_password("pw123", "not-a-phc-string"));
    }
}
