//! Password hashing with bcrypt.
//!
//! Hashes are salted per call, so hashing the same password twice yields two
//! different strings that both verify. `bcrypt::verify` compares digests in
//! constant time.

use std::sync::OnceLock;

use bcrypt::{DEFAULT_COST, hash, verify};

use crate::errors::AppError;

static DUMMY_HASH: OnceLock<Option<String>> = OnceLock::new();

pub fn hash_password(password: &str) -> Result<String, AppError> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::internal_error(format!("Failed to hash password: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    verify(password, hash)
        .map_err(|e| AppError::internal_error(format!("Failed to verify password: {}", e)))
}

/// Runs a full bcrypt verification against a throwaway hash and discards the
/// result.
///
/// Login calls this when the username does not exist so that an unknown user
/// costs the same wall-clock time as a wrong password.
pub fn verify_against_dummy(password: &str) {
    if let Some(dummy) = dummy_hash() {
        let _ = verify(password, dummy);
    }
}

/// Computes the throwaway hash ahead of the first login. Call once at
/// startup; otherwise the first unknown-user login also pays for hashing.
pub fn warm_dummy_hash() {
    dummy_hash();
}

fn dummy_hash() -> Option<&'static str> {
    DUMMY_HASH
        .get_or_init(|| hash("schoolhub-dummy-password", DEFAULT_COST).ok())
        .as_deref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hash = hash_password("testpassword123").unwrap();
        assert_ne!(hash, "testpassword123");
        assert!(verify_password("testpassword123", &hash).unwrap());
        assert!(!verify_password("wrongpassword", &hash).unwrap());
    }

    #[test]
    fn test_hashes_are_salted() {
        let hash1 = hash_password("samepassword").unwrap();
        let hash2 = hash_password("samepassword").unwrap();
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_verify_invalid_hash_is_error() {
        assert!(verify_password("anything", "not_a_bcrypt_hash").is_err());
    }

    #[test]
    fn test_warm_dummy_hash_is_valid_bcrypt() {
        warm_dummy_hash();
        let dummy = dummy_hash().unwrap();
        assert!(dummy.starts_with("$2"));
        assert!(verify_password("schoolhub-dummy-password", dummy).unwrap());
    }

    #[test]
    fn test_verify_against_dummy_does_not_panic() {
        verify_against_dummy("whatever");
        verify_against_dummy("");
    }
}
