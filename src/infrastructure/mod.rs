//! Infrastructure layer - Storage, hashing, token verification and telemetry

pub mod auth;
pub mod logging;
pub mod observability;
pub mod user;
