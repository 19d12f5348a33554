//! Service configuration: server bind address and database connection parameters
//!
//! Loaded once at startup from an optional TOML file, then overridden by
//! `USERS_ADMIN_*` environment variables. Never revisited afterwards.

use std::fmt;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Config file looked up in the working directory when none is named
pub const DEFAULT_CONFIG_FILE: &str = "users-admin.toml";

const REDACTED: &str = "********";

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0:?}")]
    NotFound(PathBuf),

    #[error("failed to read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML in config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),

    #[error("invalid {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl ConfigError {
    fn invalid(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            reason: reason.into(),
        }
    }
}

/// SQL dialect of the store. Only PostgreSQL is wired up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
}

impl FromStr for Dialect {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            other => Err(ConfigError::invalid(
                "database.dialect",
                format!("unsupported dialect '{}' (expected postgres)", other),
            )),
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub database: DbConfig,
}

/// `[server]` table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerSettings {
    /// Address to bind to (default: 127.0.0.1:3000)
    pub bind: SocketAddr,

    /// Allow any CORS origin instead of localhost only
    pub cors_permissive: bool,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([127, 0, 0, 1], 3000)),
            cors_permissive: false,
        }
    }
}

/// `[database]` table: connection parameters for the store
#[derive(Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DbConfig {
    pub username: String,
    pub password: String,
    /// Database name
    pub name: String,
    pub host: String,
    pub port: u16,
    pub dialect: String,
    /// libpq-style sslmode (disable, allow, prefer, require, verify-ca, verify-full)
    pub ssl_mode: String,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            username: "postgres".to_string(),
            password: String::new(),
            name: "users".to_string(),
            host: "localhost".to_string(),
            port: 5432,
            dialect: "postgres".to_string(),
            ssl_mode: "disable".to_string(),
        }
    }
}

// Hand-written so the password never reaches a log line.
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("name", &self.name)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("dialect", &self.dialect)
            .field("ssl_mode", &self.ssl_mode)
            .finish()
    }
}

impl DbConfig {
    pub fn dialect(&self) -> Result<Dialect, ConfigError> {
        self.dialect.parse()
    }

    pub fn ssl_mode(&self) -> Result<PgSslMode, ConfigError> {
        self.ssl_mode.parse::<PgSslMode>().map_err(|_| {
            ConfigError::invalid(
                "database.ssl_mode",
                format!("unknown mode '{}'", self.ssl_mode),
            )
        })
    }

    /// Check every field that can be checked without touching the network.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.username.trim().is_empty() {
            return Err(ConfigError::invalid("database.username", "cannot be empty"));
        }
        if self.name.trim().is_empty() {
            return Err(ConfigError::invalid("database.name", "cannot be empty"));
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::invalid("database.host", "cannot be empty"));
        }
        if self.port == 0 {
            return Err(ConfigError::invalid("database.port", "cannot be 0"));
        }
        self.dialect()?;
        self.ssl_mode()?;
        Ok(())
    }

    /// Build discrete connect options; the password never passes through a URL string.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        self.validate()?;

        let mut options = PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.username)
            .database(&self.name)
            .ssl_mode(self.ssl_mode()?)
            .application_name("users-admin");
        if !self.password.is_empty() {
            options = options.password(&self.password);
        }
        Ok(options)
    }
}

impl AppConfig {
    /// Load configuration from file and process environment.
    ///
    /// With `path == None` the default file is optional; a named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load_with(path, |key| std::env::var(key).ok())
    }

    /// Like [`AppConfig::load`] with an explicit environment lookup.
    pub fn load_with<F>(path: Option<&Path>, env: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        config.apply_env(env)?;
        config.database.validate()?;
        Ok(config)
    }

    /// Parse a TOML config file without env overrides or validation.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(toml::from_str(&content)?)
    }

    fn apply_env<F>(&mut self, env: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db = &mut self.database;
        if let Some(v) = env("USERS_ADMIN_DB_USERNAME") {
            db.username = v;
        }
        if let Some(v) = env("USERS_ADMIN_DB_PASSWORD") {
            db.password = v;
        }
        if let Some(v) = env("USERS_ADMIN_DB_NAME") {
            db.name = v;
        }
        if let Some(v) = env("USERS_ADMIN_DB_HOST") {
            db.host = v;
        }
        if let Some(v) = env("USERS_ADMIN_DB_PORT") {
            db.port = v.parse().map_err(|_| {
                ConfigError::invalid("USERS_ADMIN_DB_PORT", format!("not a port: '{}'", v))
            })?;
        }
        if let Some(v) = env("USERS_ADMIN_DB_DIALECT") {
            db.dialect = v;
        }
        if let Some(v) = env("USERS_ADMIN_DB_SSL_MODE") {
            db.ssl_mode = v;
        }
        if let Some(v) = env("USERS_ADMIN_BIND") {
            self.server.bind = v.parse().map_err(|_| {
                ConfigError::invalid("USERS_ADMIN_BIND", format!("not a socket address: '{}'", v))
            })?;
        }
        Ok(())
    }

    /// Copy with the password masked, safe to print.
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if !copy.database.password.is_empty() {
            copy.database.password = REDACTED.to_string();
        }
        copy
    }

    /// Render as TOML with the password masked.
    pub fn to_redacted_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(&self.redacted())?)
    }
}
