//! Password hashing using Argon2

use argon2::{
    password_hash::{
        rand_core::OsRng, PasswordHash, PasswordHasher as Argon2PasswordHasher, PasswordVerifier,
        SaltString,
    },
    Argon2,
};
use std::fmt::Debug;

use crate::domain::user::PasswordDigest;
use crate::domain::DomainError;

/// One-way salted hashing with constant-time verification
pub trait PasswordHasher: Send + Sync + Debug {
    /// Hash a raw password into a storable digest
    fn hash(&self, password: &str) -> Result<PasswordDigest, DomainError>;

    /// Verify a raw password against a stored digest
    fn verify(&self, password: &str, digest: &PasswordDigest) -> bool;
}

/// Argon2id hasher with a fresh random salt per digest
#[derive(Debug, Clone, Default)]
pub struct Argon2Hasher;

impl Argon2Hasher {
    pub fn new() -> Self {
        Self
    }
}

impl PasswordHasher for Argon2Hasher {
    fn hash(&self, password: &str) -> Result<PasswordDigest, DomainError> {
        let salt = SaltString::generate(&mut OsRng);

        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| PasswordDigest::new(hash.to_string()))
            .map_err(|e| DomainError::internal(format!("Failed to hash password: {}", e)))
    }

    fn verify(&self, password: &str, digest: &PasswordDigest) -> bool {
        // A digest we cannot parse never verifies
        let Ok(parsed) = PasswordHash::new(digest.as_str()) else {
            return false;
        };

        Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = Argon2Hasher::new();

        let digest = hasher.hash("secure123").unwrap();

        assert!(hasher.verify("secure123", &digest));
        assert!(!hasher.verify("secure1234", &digest));
    }

    #[test]
    fn test_digest_never_contains_password() {
        let hasher = Argon2Hasher::new();

        let digest = hasher.hash("secure123").unwrap();
        assert!(!digest.as_str().contains("secure123"));
        assert!(digest.as_str().starts_with("$argon2"));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = Argon2Hasher::new();

        let first = hasher.hash("secure123").unwrap();
        let second = hasher.hash("secure123").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("secure123", &first));
        assert!(hasher.verify("secure123", &second));
    }

    #[test]
    fn test_verify_unparseable_digest() {
        let hasher = Argon2Hasher::new();

        assert!(!hasher.verify("password", &PasswordDigest::new("not-a-phc-string")));
        assert!(!hasher.verify("password", &PasswordDigest::new("")));
    }
}
