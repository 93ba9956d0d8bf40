//! User store trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::entity::{Email, User};
use crate::domain::DomainError;

/// Persistence abstraction over users, keyed by email
///
/// Implementations must make `insert` atomic with respect to the email key:
/// when two inserts race for the same email exactly one succeeds and the
/// other returns [`DomainError::Conflict`].
#[async_trait]
pub trait UserStore: Send + Sync + Debug {
    /// Exact lookup by email
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError>;

    /// Persist a new user, failing with a conflict if the email is taken
    async fn insert(&self, user: User) -> Result<User, DomainError>;

    /// Number of stored users
    async fn count(&self) -> Result<usize, DomainError>;

    /// Check if an email is already registered
    async fn email_exists(&self, email: &Email) -> Result<bool, DomainError> {
        Ok(self.find_by_email(email).await?.is_some())
    }
}
