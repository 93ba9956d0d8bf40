//! Application state for shared services

use std::sync::Arc;

use crate::domain::user::UserStore;
use crate::infrastructure::auth::JwtVerifier;
use crate::infrastructure::user::{AuthService, PasswordHasher, ProfileService};

/// Registration/login service over dynamically chosen backends
pub type DynAuthService = AuthService<dyn UserStore, dyn PasswordHasher>;

/// Profile service over a dynamically chosen store
pub type DynProfileService = ProfileService<dyn UserStore>;

/// Application state containing shared services
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<DynAuthService>,
    pub profile_service: Arc<DynProfileService>,
    pub user_store: Arc<dyn UserStore>,
    pub jwt_verifier: Arc<JwtVerifier>,
}

impl AppState {
    /// Wire services around one store and hasher
    pub fn new(
        user_store: Arc<dyn UserStore>,
        hasher: Arc<dyn PasswordHasher>,
        jwt_verifier: JwtVerifier,
    ) -> Self {
        Self {
            auth_service: Arc::new(AuthService::new(user_store.clone(), hasher)),
            profile_service: Arc::new(ProfileService::new(user_store.clone())),
            user_store,
            jwt_verifier: Arc::new(jwt_verifier),
        }
    }
}
