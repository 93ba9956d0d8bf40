//! Identity service
//!
//! Account registration, credential login and profile lookup for the caller
//! named by the request's email claim. Users live in memory or in PostgreSQL.

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use crate::config::AppConfig;

use std::sync::Arc;

use api::state::AppState;
use crate::config::{AuthConfig, StorageBackend};
use domain::user::UserStore;
use infrastructure::{
    auth::JwtVerifier,
    user::{Argon2Hasher, InMemoryUserStore, PostgresUserStore},
};
use rand::Rng;
use tracing::{info, warn};

/// Create the application state with default configuration
pub async fn create_app_state() -> anyhow::Result<AppState> {
    create_app_state_with_config(&AppConfig::default()).await
}

/// Create the application state with custom configuration
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    info!("Storage backend: {:?}", config.storage.backend);

    let user_store: Arc<dyn UserStore> = match config.storage.backend {
        StorageBackend::Memory => {
            info!("Using in-memory user store");
            Arc::new(InMemoryUserStore::new())
        }
        StorageBackend::Postgres => {
            let database_url = config.storage.resolve_database_url().ok_or_else(|| {
                anyhow::anyhow!(
                    "PostgreSQL backend requires storage.database_url or DATABASE_URL"
                )
            })?;

            info!("Connecting to PostgreSQL...");
            let store =
                PostgresUserStore::connect(&database_url, config.storage.max_connections).await?;
            store.migrate().await?;
            info!("PostgreSQL connection established");

            Arc::new(store)
        }
    };

    Ok(AppState::new(
        user_store,
        Arc::new(Argon2Hasher::new()),
        create_jwt_verifier(&config.auth),
    ))
}

/// Create the token verifier from the configured secret (config, env var, or random)
fn create_jwt_verifier(auth: &AuthConfig) -> JwtVerifier {
    let jwt_secret = auth.resolve_jwt_secret().unwrap_or_else(|| {
        warn!(
            "No auth.jwt_secret or JWT_SECRET configured. Generating random secret. \
            No bearer token will verify until a shared secret is set."
        );
        generate_random_secret()
    });

    JwtVerifier::new(&jwt_secret, auth.jwt_issuer.as_deref())
}

fn generate_random_secret() -> String {
    use rand::distributions::Alphanumeric;

    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}
