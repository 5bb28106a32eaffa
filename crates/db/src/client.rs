use std::sync::{PoisonError, RwLock};

use crate::config::DatabaseConfig;
use crate::error::DbError;
use crate::{create_pool, health_check, DbPool};

/// Database client bound to a MySQL/MariaDB server.
///
/// Holds a validated [`DatabaseConfig`] and, between [`connect`] and
/// [`disconnect`], a connection pool. Construction never performs I/O.
///
/// [`connect`]: DatabaseClient::connect
/// [`disconnect`]: DatabaseClient::disconnect
#[derive(Debug)]
pub struct DatabaseClient {
    config: DatabaseConfig,
    pool: RwLock<Option<DbPool>>,
}

impl DatabaseClient {
    /// Build a client from `DATABASE_URL` and friends.
    ///
    /// Fails with the guard errors of [`DatabaseConfig::parse`] before any
    /// connection handle is created.
    pub fn new() -> Result<Self, DbError> {
        Ok(Self::from_config(DatabaseConfig::from_env()?))
    }

    pub fn from_config(config: DatabaseConfig) -> Self {
        Self {
            config,
            pool: RwLock::new(None),
        }
    }

    pub fn config(&self) -> &DatabaseConfig {
        &self.config
    }

    /// Open the pool and check the server with `SELECT 1`. No-op while already connected.
    pub async fn connect(&self) -> Result<(), DbError> {
        if self.is_connected() {
            return Ok(());
        }

        let pool = create_pool(&self.config).await?;
        health_check(&pool).await?;

        let previous = self
            .pool
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(pool);
        if let Some(previous) = previous {
            previous.close().await;
        }

        tracing::info!(
            scheme = self.config.scheme(),
            max_connections = self.config.max_connections(),
            "Database connection pool created"
        );
        Ok(())
    }

    /// Close the pool, waiting for checked-out connections to return.
    /// No-op when not connected.
    pub async fn disconnect(&self) {
        let pool = self
            .pool
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .take();

        if let Some(pool) = pool {
            pool.close().await;
            tracing::info!("Database connection pool closed");
        }
    }

    pub fn is_connected(&self) -> bool {
        self.pool
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|pool| !pool.is_closed())
    }

    /// Handle for running queries. Cheap to clone.
    pub fn pool(&self) -> Result<DbPool, DbError> {
        self.pool
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .filter(|pool| !pool.is_closed())
            .cloned()
            .ok_or(DbError::NotConnected)
    }
}
