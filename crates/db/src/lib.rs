//! MySQL/MariaDB client wrapper.
//!
//! [`DatabaseClient`] validates `DATABASE_URL` before any connection handle
//! exists, then opens and closes its pool at explicit lifecycle hooks.

mod client;
mod config;
mod error;

use sqlx::mysql::MySqlPoolOptions;

pub use client::DatabaseClient;
pub use config::{DatabaseConfig, DEFAULT_ACQUIRE_TIMEOUT, DEFAULT_MAX_CONNECTIONS};
pub use error::DbError;

pub type DbPool = sqlx::MySqlPool;

/// Create a connection pool from a validated configuration.
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    MySqlPoolOptions::new()
        .max_connections(config.max_connections())
        .acquire_timeout(config.acquire_timeout())
        .connect_with(config.connect_options().clone())
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
