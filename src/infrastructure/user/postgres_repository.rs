//! PostgreSQL user store implementation

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::info;
use uuid::Uuid;

use crate::domain::user::{Email, PasswordDigest, User, UserId, UserStore};
use crate::domain::DomainError;

const CREATE_USERS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS users (
        id              UUID PRIMARY KEY,
        email           TEXT NOT NULL UNIQUE,
        password_digest TEXT NOT NULL,
        created_at      TIMESTAMPTZ NOT NULL
    )
"#;

/// PostgreSQL implementation of UserStore
///
/// Email uniqueness is enforced by the `UNIQUE` constraint on `users.email`,
/// which makes concurrent inserts of the same email safe without locking.
#[derive(Debug, Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    /// Create a new store with the given connection pool
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a connection pool against `database_url`
    pub async fn connect(database_url: &str, max_connections: u32) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

        Ok(Self::new(pool))
    }

    /// Create the users table if it does not exist yet
    pub async fn migrate(&self) -> Result<(), DomainError> {
        sqlx::query(CREATE_USERS_TABLE)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create users table: {}", e)))?;

        info!("User schema is up to date");
        Ok(())
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, DomainError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_digest, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::storage(format!("Failed to get user by email: {}", e)))?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn insert(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, password_digest, created_at)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(*user.id().as_uuid())
        .bind(user.email().as_str())
        .bind(user.password_digest().as_str())
        .bind(user.created_at())
        .execute(&self.pool)
        .await
        .map_err(|e| match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                DomainError::conflict(format!("Email '{}' already registered", user.email()))
            }
            _ => DomainError::storage(format!("Failed to create user: {}", e)),
        })?;

        Ok(user)
    }

    async fn count(&self) -> Result<usize, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to count users: {}", e)))?;

        Ok(count as usize)
    }
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let id: Uuid = get_column(row, "id")?;
    let email: String = get_column(row, "email")?;
    let password_digest: String = get_column(row, "password_digest")?;
    let created_at: DateTime<Utc> = get_column(row, "created_at")?;

    let email = Email::new(email)
        .map_err(|e| DomainError::storage(format!("Invalid email in database: {}", e)))?;

    Ok(User::restore(
        UserId::from_uuid(id),
        email,
        PasswordDigest::new(password_digest),
        created_at,
    ))
}

fn get_column<'r, T>(row: &'r PgRow, column: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(column)
        .map_err(|e| DomainError::storage(format!("Failed to read column '{}': {}", column, e)))
}
