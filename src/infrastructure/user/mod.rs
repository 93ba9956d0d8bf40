//! User infrastructure module
//!
//! Argon2 password hashing, in-memory and PostgreSQL stores, and the
//! registration/login and profile services built on top of them.

mod auth_service;
mod password;
mod postgres_repository;
mod profile_service;
mod repository;

pub use auth_service::AuthService;
pub use password::{Argon2Hasher, PasswordHasher};
pub use postgres_repository::PostgresUserStore;
pub use profile_service::ProfileService;
pub use repository::InMemoryUserStore;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::auth::{OutcomeKind, ProfileOutcome};
    use crate::domain::identity::{Claim, RequestContext};

    #[tokio::test]
    async fn test_register_login_profile_scenario() {
        let store = Arc::new(InMemoryUserStore::new());
        let auth = AuthService::new(store.clone(), Arc::new(Argon2Hasher::new()));
        let profiles = ProfileService::new(store);

        let first = auth.register("a@x.com", "secure123").await.unwrap();
        assert_eq!(first.kind(), OutcomeKind::Ok);

        let second = auth.register("a@x.com", "other").await.unwrap();
        assert_eq!(second.kind(), OutcomeKind::Conflict);

        let good = auth.login("a@x.com", "secure123").await.unwrap();
        assert_eq!(good.kind(), OutcomeKind::Ok);

        let bad = auth.login("a@x.com", "secure1234").await.unwrap();
        assert_eq!(bad.kind(), OutcomeKind::Unauthorized);

        let ctx = RequestContext::anonymous().with_claim(Claim::email("a@x.com"));
        match profiles.get_profile(&ctx).await.unwrap() {
            ProfileOutcome::Found(user) => assert_eq!(user.email().as_str(), "a@x.com"),
            other => panic!("expected Found, got {:?}", other),
        }

        let ctx = RequestContext::anonymous().with_claim(Claim::email("missing@x.com"));
        let missing = profiles.get_profile(&ctx).await.unwrap();
        assert_eq!(missing.kind(), OutcomeKind::NotFound);

        let anonymous = profiles.get_profile(&RequestContext::anonymous()).await.unwrap();
        assert_eq!(anonymous.kind(), OutcomeKind::Unauthorized);
    }
}
