//! User domain
//!
//! This module provides the user entity, input validation and the store
//! trait that every persistence backend implements.

mod entity;
mod repository;
mod validation;

pub use entity::{Email, PasswordDigest, User, UserId};
pub use repository::UserStore;
pub use validation::{validate_email, validate_password, UserValidationError};

#[cfg(test)]
pub use repository::mock::MockUserStore;
