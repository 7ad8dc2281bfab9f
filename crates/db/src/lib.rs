//! Persistence layer for the customer registry.
//!
//! - [`models`]: the row shapes written to and read from `customers`, plus
//!   the domain <-> row mappers.
//! - [`store`]: the narrow storage collaborator interface and its PostgreSQL
//!   and in-memory implementations.
//! - [`repositories`]: the repository that sequences validation, mapping,
//!   and storage calls, and translates storage failures into domain errors.

use sqlx::postgres::PgPoolOptions;

pub mod config;
pub mod models;
pub mod repositories;
pub mod store;

pub use config::{ConfigError, DatabaseConfig};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from the database configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .max_lifetime(config.max_lifetime)
        .idle_timeout(config.idle_timeout)
        .acquire_timeout(config.acquire_timeout)
        .connect_with(config.connect_options.clone())
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply pending migrations from `db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("../../db/migrations").run(pool).await
}
