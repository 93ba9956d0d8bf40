//! Identity domain
//!
//! Request contexts, claims, and resolution of the caller's email.

mod context;
mod resolver;

pub use context::{Claim, ClaimKind, RequestContext};
pub use resolver::{Identity, IdentityResolver, MissingIdentity};
