//! Tagged results of the identity operations

use serde::Serialize;

use crate::domain::user::User;

/// Outcome class shared by every operation
///
/// The transport layer maps each kind to one response status; the kinds
/// must stay distinguishable from each other and from infrastructure errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Ok,
    Conflict,
    Unauthorized,
    NotFound,
}

impl OutcomeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Conflict => "conflict",
            Self::Unauthorized => "unauthorized",
            Self::NotFound => "not_found",
        }
    }
}

impl std::fmt::Display for OutcomeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of a registration attempt
#[derive(Debug, Clone)]
pub enum RegisterOutcome {
    Registered(User),
    /// The email already belongs to an account
    Conflict,
}

impl RegisterOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Registered(_) => OutcomeKind::Ok,
            Self::Conflict => OutcomeKind::Conflict,
        }
    }
}

/// Result of a login attempt
///
/// Unknown email and wrong password both land in `Unauthorized`.
#[derive(Debug, Clone)]
pub enum LoginOutcome {
    Authenticated(User),
    Unauthorized,
}

impl LoginOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Authenticated(_) => OutcomeKind::Ok,
            Self::Unauthorized => OutcomeKind::Unauthorized,
        }
    }
}

/// Result of a profile lookup
#[derive(Debug, Clone)]
pub enum ProfileOutcome {
    Found(User),
    /// The request carried no email claim
    Unauthorized,
    /// The claimed email has no account
    NotFound,
}

impl ProfileOutcome {
    pub fn kind(&self) -> OutcomeKind {
        match self {
            Self::Found(_) => OutcomeKind::Ok,
            Self::Unauthorized => OutcomeKind::Unauthorized,
            Self::NotFound => OutcomeKind::NotFound,
        }
    }
}
