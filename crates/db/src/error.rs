/// Errors raised by the database client and its configuration guard.
///
/// The three URL variants carry fixed messages that callers and operators
/// match on verbatim.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("DATABASE_URL is required to initialize PrismaClient.")]
    MissingUrl,

    #[error("DATABASE_URL must be a valid URL.")]
    InvalidUrl,

    #[error("DATABASE_URL must be a MySQL/MariaDB connection string for MariaDB adapter.")]
    UnsupportedScheme,

    #[error("DATABASE_MAX_CONNECTIONS must be a positive integer, got '{0}'")]
    InvalidMaxConnections(String),

    #[error("DATABASE_ACQUIRE_TIMEOUT_SECS must be a positive integer, got '{0}'")]
    InvalidAcquireTimeout(String),

    #[error("Database client is not connected")]
    NotConnected,

    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}
