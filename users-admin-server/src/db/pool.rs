//! Database session: the one pool every handler shares
//!
//! Uses sqlx PgPool with the driver's default pool settings.

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;

use crate::config::{ConfigError, DbConfig};

/// Failure to open the database session at startup
#[derive(Debug, thiserror::Error)]
pub enum ConnectionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to connect to {host}:{port}/{database}: {source}")]
    Connect {
        host: String,
        port: u16,
        database: String,
        source: sqlx::Error,
    },
}

/// Open a PostgreSQL pool and establish the first connection.
///
/// # Errors
///
/// Returns an error if the parameters are invalid or the store is unreachable.
/// Callers treat either as fatal.
///
/// # Example
///
/// ```ignore
/// let config = AppConfig::load(None)?;
/// let pool = open(&config.database).await?;
/// ```
pub async fn open(config: &DbConfig) -> Result<PgPool, ConnectionError> {
    let options = config.connect_options()?;

    tracing::info!(
        username = %config.username,
        database = %config.name,
        host = %config.host,
        port = config.port,
        dialect = %config.dialect,
        "Opening database session"
    );

    open_with(options).await
}

/// Open a pool from already-built connect options (e.g. parsed from `DATABASE_URL`).
pub async fn open_with(options: PgConnectOptions) -> Result<PgPool, ConnectionError> {
    let host = options.get_host().to_owned();
    let port = options.get_port();
    let database = options.get_database().unwrap_or_default().to_owned();

    PgPoolOptions::new()
        .connect_with(options)
        .await
        .map_err(|source| ConnectionError::Connect {
            host,
            port,
            database,
            source,
        })
}

/// Build a pool that connects on first use instead of at startup.
///
/// Nothing touches the network until a handler issues a statement.
pub fn open_lazy(config: &DbConfig) -> Result<PgPool, ConfigError> {
    Ok(PgPoolOptions::new().connect_lazy_with(config.connect_options()?))
}
