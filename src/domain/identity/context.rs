//! Authenticated request context and its claims

use serde::{Deserialize, Serialize};

/// Kind of an attributed fact about the caller
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimKind {
    Email,
    Name,
    Subject,
    Custom(String),
}

/// A single claim attached to a request by an upstream authenticator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub kind: ClaimKind,
    pub value: String,
}

impl Claim {
    pub fn new(kind: ClaimKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn email(value: impl Into<String>) -> Self {
        Self::new(ClaimKind::Email, value)
    }
}

/// Claims carried by one inbound request
///
/// Built by the transport layer and handed explicitly to the services that
/// need it. An empty context means the caller presented no identity.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    claims: Vec<Claim>,
}

impl RequestContext {
    /// Context with no claims at all
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_claims(claims: Vec<Claim>) -> Self {
        Self { claims }
    }

    /// Add a claim, builder style
    pub fn with_claim(mut self, claim: Claim) -> Self {
        self.claims.push(claim);
        self
    }

    pub fn claims(&self) -> &[Claim] {
        &self.claims
    }

    /// Value of the first claim of the given kind
    pub fn find_first(&self, kind: &ClaimKind) -> Option<&str> {
        self.claims
            .iter()
            .find(|c| &c.kind == kind)
            .map(|c| c.value.as_str())
    }

    pub fn is_anonymous(&self) -> bool {
        self.claims.is_empty()
    }
}
