//! In-memory user store implementation

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::user::{Email, User, UserStore};
use crate::domain::DomainError;

/// In-memory implementation of UserStore
///
/// The existence check and the insert happen under the same write guard, so
/// concurrent registrations of one email cannot both succeed.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUserStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store with initial users; later duplicates are dropped
    pub fn with_users(users: Vec<User>) -> Self {
        let mut map = HashMap::new();

        for user in users {
            map.entry(user.email().as_str().to_string()).or_insert(user);
        }

        Self {
            users: Arc::new(RwLock::new(map)),
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(email.as_str()).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, DomainError> {
        let mut users = self.users.write().await;
        let key = user.email().as_str().to_string();

        if users.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Email '{}' already registered",
                key
            )));
        }

        users.insert(key, user.clone());

        Ok(user)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        Ok(self.users.read().await.len())
    }
}
