//! Migrate command - creates the users table in PostgreSQL

use clap::Args;
use tracing::info;

use crate::config::AppConfig;
use crate::infrastructure::logging::init_logging;
use crate::infrastructure::user::PostgresUserStore;

#[derive(Args, Debug)]
pub struct MigrateArgs {
    /// Database URL; defaults to `storage.database_url` or `DATABASE_URL`
    #[arg(long)]
    pub database_url: Option<String>,
}

/// Run the schema migration
pub async fn run(args: MigrateArgs) -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    init_logging(&config.logging);

    let database_url = args
        .database_url
        .or_else(|| config.storage.resolve_database_url())
        .ok_or_else(|| {
            anyhow::anyhow!("No database URL given; pass --database-url or set DATABASE_URL")
        })?;

    info!("Connecting to PostgreSQL...");
    let store = PostgresUserStore::connect(&database_url, config.storage.max_connections).await?;

    store.migrate().await?;
    info!("Migration complete");

    Ok(())
}
