//! Registration and credential login

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::auth::{LoginOutcome, RegisterOutcome};
use crate::domain::user::{validate_password, Email, User, UserStore};
use crate::domain::DomainError;
use crate::infrastructure::observability::record_outcome;

use super::password::PasswordHasher;

/// Registers accounts and checks credentials
///
/// Store and hasher failures are returned as `Err` and never folded into an
/// outcome.
#[derive(Debug)]
pub struct AuthService<R: UserStore + ?Sized, H: PasswordHasher + ?Sized> {
    store: Arc<R>,
    hasher: Arc<H>,
}

impl<R: UserStore + ?Sized, H: PasswordHasher + ?Sized> AuthService<R, H> {
    pub fn new(store: Arc<R>, hasher: Arc<H>) -> Self {
        Self { store, hasher }
    }

    /// Register a new account
    pub async fn register(
        &self,
        email: &str,
        password: &str,
    ) -> Result<RegisterOutcome, DomainError> {
        let email = Email::new(email).map_err(|e| DomainError::validation(e.to_string()))?;
        validate_password(password).map_err(|e| DomainError::validation(e.to_string()))?;

        if self.store.email_exists(&email).await? {
            debug!(email = %email, "Registration rejected, email already registered");
            record_outcome("register", RegisterOutcome::Conflict.kind());
            return Ok(RegisterOutcome::Conflict);
        }

        let digest = self.hasher.hash(password)?;
        let user = User::new(email, digest);

        let outcome = match self.store.insert(user).await {
            Ok(user) => {
                info!(user_id = %user.id(), "User registered");
                RegisterOutcome::Registered(user)
            }
            // Lost a race against a concurrent registration of the same email
            Err(e) if e.is_conflict() => {
                warn!("Concurrent registration detected, keeping the first account");
                debug!("Late insert conflict: {}", e);
                RegisterOutcome::Conflict
            }
            Err(e) => return Err(e),
        };

        record_outcome("register", outcome.kind());
        Ok(outcome)
    }

    /// Check an email/password pair
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginOutcome, DomainError> {
        let outcome = match self.find(email).await? {
            Some(user) if self.hasher.verify(password, user.password_digest()) => {
                debug!(user_id = %user.id(), "Credentials verified");
                LoginOutcome::Authenticated(user)
            }
            _ => LoginOutcome::Unauthorized,
        };

        record_outcome("login", outcome.kind());
        Ok(outcome)
    }

    async fn find(&self, email: &str) -> Result<Option<User>, DomainError> {
        // An empty email cannot belong to anyone
        match Email::new(email) {
            Ok(email) => self.store.find_by_email(&email).await,
            Err(_) => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::auth::OutcomeKind;
    use crate::domain::user::MockUserStore;
    use crate::infrastructure::user::password::Argon2Hasher;
    use crate::infrastructure::user::repository::InMemoryUserStore;

    fn create_service() -> AuthService<InMemoryUserStore, Argon2Hasher> {
        AuthService::new(
            Arc::new(InMemoryUserStore::new()),
            Arc::new(Argon2Hasher::new()),
        )
    }

    #[tokio::test]
    async fn test_register_new_user() {
        let service = create_service();

        let outcome = service.register("test1@example.com", "secure123").await.unwrap();

        match outcome {
            RegisterOutcome::Registered(user) => {
                assert_eq!(user.email().as_str(), "test1@example.com");
                assert_ne!(user.password_digest().as_str(), "secure123");
            }
            other => panic!("expected Registered, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_register_existing_email_conflicts() {
        let store = Arc::new(InMemoryUserStore::new());
        let service = AuthService::new(store.clone(), Arc::new(Argon2Hasher::new()));

        service.register("duplicate@example.com", "pass123").await.unwrap();
        let outcome = service.register("duplicate@example.com", "newpass").await.unwrap();

        assert_eq!(outcome.kind(), OutcomeKind::Conflict);
        assert_eq!(store.count().await.unwrap(), 1);

        // The original password still works, nothing was overwritten
        let login = service.login("duplicate@example.com", "pass123").await.unwrap();
        assert_eq!(login.kind(), OutcomeKind::Ok);
    }

    #[tokio::test]
    async fn test_register_rejects_empty_input() {
        let service = create_service();

        let result = service.register("", "secure123").await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));

        let result = service.register("a@x.com", "").await;
        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_login_correct_password() {
        let service = create_service();
        service.register("duplicate@example.com", "newpassword").await.unwrap();

        let outcome = service.login("duplicate@example.com", "newpassword").await.unwrap();

        match outcome {
            LoginOutcome::Authenticated(user) => {
                assert_eq!(user.email().as_str(), "duplicate@example.com")
            }
            other => panic!("expected Authenticated, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let service = create_service();
        service.register("duplicate@example.com", "newpassword").await.unwrap();

        let outcome = service.login("duplicate@example.com", "newpassword1").await.unwrap();
        assert_eq!(outcome.kind(), OutcomeKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_login_unknown_email_matches_wrong_password() {
        let service = create_service();
        service.register("known@example.com", "secret").await.unwrap();

        let unknown = service.login("unknown@example.com", "secret").await.unwrap();
        let wrong = service.login("known@example.com", "nope").await.unwrap();

        assert_eq!(unknown.kind(), OutcomeKind::Unauthorized);
        assert_eq!(unknown.kind(), wrong.kind());
    }

    #[tokio::test]
    async fn test_login_empty_input_is_unauthorized() {
        let service = create_service();
        service.register("a@x.com", "secure123").await.unwrap();

        let outcome = service.login("", "secure123").await.unwrap();
        assert_eq!(outcome.kind(), OutcomeKind::Unauthorized);

        let outcome = service.login("a@x.com", "").await.unwrap();
        assert_eq!(outcome.kind(), OutcomeKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_login_is_case_sensitive() {
        let service = create_service();
        service.register("a@x.com", "secure123").await.unwrap();

        let outcome = service.login("A@X.COM", "secure123").await.unwrap();
        assert_eq!(outcome.kind(), OutcomeKind::Unauthorized);
    }

    #[tokio::test]
    async fn test_repeated_login_does_not_mutate_store() {
        let store = Arc::new(MockUserStore::new());
        let service = AuthService::new(store.clone(), Arc::new(Argon2Hasher::new()));

        service.register("a@x.com", "secure123").await.unwrap();
        assert_eq!(store.insert_calls(), 1);

        for _ in 0..3 {
            let outcome = service.login("a@x.com", "secure123").await.unwrap();
            assert_eq!(outcome.kind(), OutcomeKind::Ok);
        }

        assert_eq!(store.insert_calls(), 1);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let store = Arc::new(MockUserStore::new());
        let service = AuthService::new(store.clone(), Arc::new(Argon2Hasher::new()));
        store.set_should_fail(true);

        let register = service.register("a@x.com", "secure123").await;
        assert!(matches!(register, Err(DomainError::Storage { .. })));

        let login = service.login("a@x.com", "secure123").await;
        assert!(matches!(login, Err(DomainError::Storage { .. })));
    }

    #[derive(Debug)]
    struct FailingHasher;

    impl PasswordHasher for FailingHasher {
        fn hash(&self, _password: &str) -> Result<crate::domain::user::PasswordDigest, DomainError> {
            Err(DomainError::internal("hasher unavailable"))
        }

        fn verify(&self, _password: &str, _digest: &crate::domain::user::PasswordDigest) -> bool {
            false
        }
    }

    #[tokio::test]
    async fn test_hasher_failure_propagates_without_insert() {
        let store = Arc::new(MockUserStore::new());
        let service = AuthService::new(store.clone(), Arc::new(FailingHasher));

        let result = service.register("a@x.com", "secure123").await;

        assert!(matches!(result, Err(DomainError::Internal { .. })));
        assert_eq!(store.insert_calls(), 0);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registration_single_winner() {
        let store = Arc::new(InMemoryUserStore::new());
        let service = Arc::new(AuthService::new(store.clone(), Arc::new(Argon2Hasher::new())));
        let mut tasks = tokio::task::JoinSet::new();

        for i in 0..4 {
            let service = service.clone();
            tasks.spawn(async move {
                service
                    .register("race@example.com", &format!("password-{}", i))
                    .await
            });
        }

        let mut kinds = Vec::new();
        while let Some(result) = tasks.join_next().await {
            kinds.push(result.unwrap().unwrap().kind());
        }

        assert_eq!(kinds.iter().filter(|k| **k == OutcomeKind::Ok).count(), 1);
        assert_eq!(kinds.iter().filter(|k| **k == OutcomeKind::Conflict).count(), 3);
        assert_eq!(store.count().await.unwrap(), 1);
    }

    /// Store whose lookup never sees the concurrent winner's record
    #[derive(Debug)]
    struct StaleLookupStore {
        inner: InMemoryUserStore,
    }

    #[async_trait::async_trait]
    impl UserStore for StaleLookupStore {
        async fn find_by_email(&self, _email: &Email) -> Result<Option<User>, DomainError> {
            Ok(None)
        }

        async fn insert(&self, user: User) -> Result<User, DomainError> {
            self.inner.insert(user).await
        }

        async fn count(&self) -> Result<usize, DomainError> {
            self.inner.count().await
        }
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_late_conflict_warning_omits_email() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let inner = InMemoryUserStore::new();
        let winner = User::new(
            Email::new("raced@example.com").unwrap(),
            Argon2Hasher::new().hash("first").unwrap(),
        );
        inner.insert(winner).await.unwrap();

        let service = AuthService::new(
            Arc::new(StaleLookupStore { inner }),
            Arc::new(Argon2Hasher::new()),
        );

        let outcome = service.register("raced@example.com", "second").await.unwrap();
        assert_eq!(outcome.kind(), OutcomeKind::Conflict);

        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("Concurrent registration detected"));
        assert!(!output.contains("raced@example.com"));
    }

    #[tokio::test]
    async fn test_works_through_trait_objects() {
        let store: Arc<dyn UserStore> = Arc::new(InMemoryUserStore::new());
        let hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2Hasher::new());
        let service = AuthService::new(store, hasher);

        let outcome = service.register("dyn@x.com", "secure123").await.unwrap();
        assert_eq!(outcome.kind(), OutcomeKind::Ok);
    }
}
