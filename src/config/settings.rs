//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;

use super::constants::{
    DEFAULT_CORS_ORIGIN, DEFAULT_DATABASE_URL, DEFAULT_DB_PORT, DEFAULT_MAX_CONNECTIONS,
    DEFAULT_SERVER_HOST, DEFAULT_SERVER_PORT,
};

/// How a single Service record is removed by `DELETE /delete/service`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeleteMode {
    /// Set `deleted_at`; the row stays recoverable and keeps its constraints
    #[default]
    Soft,
    /// Physically remove the row
    Hard,
}

impl FromStr for DeleteMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "soft" => Ok(DeleteMode::Soft),
            "hard" => Ok(DeleteMode::Hard),
            other => Err(format!("unknown delete mode '{}'", other)),
        }
    }
}

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub max_connections: u32,
    pub server_host: String,
    pub server_port: u16,
    /// Delete strategy for individual Service records
    pub service_delete_mode: DeleteMode,
    /// Run each cascade walk inside one store transaction
    pub cascade_in_transaction: bool,
    pub cors_allowed_origin: String,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .field("service_delete_mode", &self.service_delete_mode)
            .field("cascade_in_transaction", &self.cascade_in_transaction)
            .field("cors_allowed_origin", &self.cors_allowed_origin)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
            service_delete_mode: DeleteMode::default(),
            cascade_in_transaction: true,
            cors_allowed_origin: DEFAULT_CORS_ORIGIN.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// `DATABASE_URL` wins; otherwise a Postgres URL is assembled from
    /// `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD` and `DB_NAME` when
    /// `DB_HOST` is set.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let service_delete_mode = match env::var("SERVICE_DELETE_MODE") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                tracing::warn!("{}, falling back to soft delete", e);
                DeleteMode::Soft
            }),
            Err(_) => DeleteMode::default(),
        };

        Self {
            database_url: env::var("DATABASE_URL")
                .ok()
                .or_else(database_url_from_parts)
                .unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            max_connections: env::var("DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_CONNECTIONS),
            server_host: env::var("SERVER_HOST")
                .unwrap_or_else(|_| DEFAULT_SERVER_HOST.to_string()),
            server_port: env::var("SERVER_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_SERVER_PORT),
            service_delete_mode,
            cascade_in_transaction: env::var("CASCADE_IN_TRANSACTION")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(true),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string()),
        }
    }

    /// Configuration pointing at an explicit database URL, everything else default.
    pub fn with_database_url(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            ..Self::default()
        }
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Build a Postgres URL from the discrete `DB_*` variables.
fn database_url_from_parts() -> Option<String> {
    let host = env::var("DB_HOST").ok()?;
    let port = env::var("DB_PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(DEFAULT_DB_PORT);
    let user = env::var("DB_USER").unwrap_or_else(|_| "postgres".to_string());
    let password = env::var("DB_PASSWORD").unwrap_or_default();
    let name = env::var("DB_NAME").unwrap_or_else(|_| "auto_shop".to_string());

    Some(format!(
        "postgres://{}:{}@{}:{}/{}",
        user, password, host, port, name
    ))
}
