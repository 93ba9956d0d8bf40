//! Domain layer - Core identity logic and entities

pub mod auth;
pub mod error;
pub mod identity;
pub mod user;

pub use auth::{LoginOutcome, OutcomeKind, ProfileOutcome, RegisterOutcome};
pub use error::DomainError;
pub use identity::{Claim, ClaimKind, Identity, IdentityResolver, MissingIdentity, RequestContext};
pub use user::{Email, PasswordDigest, User, UserId, UserStore, UserValidationError};
