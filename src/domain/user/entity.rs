//! User entity and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::validation::{validate_email, UserValidationError};

/// User identifier - random v4 UUID assigned at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Email address acting as the natural key of a user
///
/// Compared byte-for-byte. `A@x.com` and `a@x.com` are different accounts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Create a new Email after validation
    pub fn new(email: impl Into<String>) -> Result<Self, UserValidationError> {
        let email = email.into();
        validate_email(&email)?;
        Ok(Self(email))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Email {
    type Error = UserValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One-way hashed password, safe to persist
///
/// Only the password hasher and the stores inside this crate can build one,
/// so a raw password can never end up in a [`User`].
#[derive(Clone, PartialEq, Eq)]
pub struct PasswordDigest(String);

impl PasswordDigest {
    pub(crate) fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for PasswordDigest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("PasswordDigest([hidden])")
    }
}

/// Registered account
#[derive(Debug, Clone, Serialize)]
pub struct User {
    id: UserId,
    email: Email,
    /// Never exposed in serialization
    #[serde(skip_serializing)]
    password_digest: PasswordDigest,
    created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(email: Email, password_digest: PasswordDigest) -> Self {
        Self {
            id: UserId::generate(),
            email,
            password_digest,
            created_at: Utc::now(),
        }
    }

    /// Rebuild a user loaded from persistent storage
    pub(crate) fn restore(
        id: UserId,
        email: Email,
        password_digest: PasswordDigest,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password_digest,
            created_at,
        }
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_digest(&self) -> &PasswordDigest {
        &self.password_digest
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}
