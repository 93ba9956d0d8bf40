//! Caller identity extraction

use thiserror::Error;

use super::context::{ClaimKind, RequestContext};
use crate::domain::user::Email;

/// The caller's asserted email, not yet confirmed against the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    email: Email,
}

impl Identity {
    pub fn new(email: Email) -> Self {
        Self { email }
    }

    pub fn email(&self) -> &Email {
        &self.email
    }
}

/// The request context carries no usable email claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Request context carries no email claim")]
pub struct MissingIdentity;

/// Reads the caller identity out of a request context
///
/// Pure extraction: the store is never consulted, so a resolved identity may
/// still have no account behind it.
#[derive(Debug, Clone, Default)]
pub struct IdentityResolver;

impl IdentityResolver {
    pub fn new() -> Self {
        Self
    }

    pub fn resolve(&self, context: &RequestContext) -> Result<Identity, MissingIdentity> {
        let value = context
            .find_first(&ClaimKind::Email)
            .ok_or(MissingIdentity)?;

        // Email::new rejects the empty claim
        let email = Email::new(value).map_err(|_| MissingIdentity)?;

        Ok(Identity::new(email))
    }
}
