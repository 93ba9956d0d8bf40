//! Authentication infrastructure module
//!
//! Verification of bearer tokens issued by the upstream authenticator.

mod jwt;

pub use jwt::{JwtVerifier, TokenClaims};
