//! Bearer token verification
//!
//! Tokens are minted by the upstream authenticator; this service only checks
//! the signature and expiry and turns the payload into a [`RequestContext`].

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::domain::identity::{Claim, ClaimKind, RequestContext};
use crate::domain::DomainError;

/// JWT payload accepted from the upstream authenticator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
    /// Expiration timestamp (Unix epoch)
    pub exp: i64,
}

impl TokenClaims {
    /// Convert the payload into request claims, skipping absent fields
    pub fn into_context(self) -> RequestContext {
        let claims = [
            (ClaimKind::Email, self.email),
            (ClaimKind::Name, self.name),
            (ClaimKind::Subject, self.sub),
        ]
        .into_iter()
        .filter_map(|(kind, value)| value.map(|v| Claim::new(kind, v)))
        .collect();

        RequestContext::from_claims(claims)
    }
}

/// HS256 verifier for upstream bearer tokens
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Debug for JwtVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtVerifier")
            .field("decoding_key", &"[hidden]")
            .field("issuer", &self.validation.iss)
            .finish()
    }
}

impl JwtVerifier {
    /// Verifier for HS256 tokens signed with `secret`, optionally pinned to `issuer`
    pub fn new(secret: &str, issuer: Option<&str>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);

        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify a token and return the request context it asserts
    pub fn verify(&self, token: &str) -> Result<RequestContext, DomainError> {
        let data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| DomainError::unauthorized(format!("Invalid token: {}", e)))?;

        Ok(data.claims.into_context())
    }
}
