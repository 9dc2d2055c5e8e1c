//! Password Hashing
//! Mission: One-way salted hashing with an adaptive cost factor

use anyhow::{Context, Result};
use bcrypt::DEFAULT_COST;

/// Hash a password with bcrypt at the default cost.
pub fn hash_password(password: &str) -> Result<String> {
    bcrypt::hash(password, DEFAULT_COST).context("Failed to hash password")
}

/// Verify a password against a stored hash. A malformed hash string is
/// treated as a mismatch, never an error.
pub fn verify_password(password: &str, hash: &str) -> bool {
    bcrypt::verify(password, hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    // MIN_COST keeps these tests fast; verify is cost-agnostic.
    fn fast_hash(password: &str) -> String {
        bcrypt::hash(password, 4).unwrap()
    }

    #[test]
    fn test_hash_and_verify_roundtrip() {
        let hash = fast_hash("correct horse battery staple");
        assert!(verify_password("correct horse battery staple", &hash));
    }

    #[test]
    fn test_wrong_password_rejected() {
        let hash = fast_hash("secret1");
        assert!(!verify_password("secret2", &hash));
    }

    #[test]
    fn test_malformed_hash_is_mismatch_not_panic() {
        assert!(!verify_password("anything", "not-a-bcrypt-hash"));
        assert!(!verify_password("anything", ""));
    }

    #[test]
    fn test_hashes_are_salted() {
        let h1 = fast_hash("same");
        let h2 = fast_hash("same");
        assert_ne!(h1, h2);
        assert!(verify_password("same", &h1));
        assert!(verify_password("same", &h2));
    }
}
