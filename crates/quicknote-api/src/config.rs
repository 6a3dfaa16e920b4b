//! Server configuration loaded from the environment.
//!
//! Environment variables (all optional):
//!   HOST             - bind address (default: 0.0.0.0)
//!   PORT             - bind port (default: 3000)
//!   STORAGE_BACKEND  - "postgres" or "memory" (default: "postgres")
//!   DATABASE_URL     - PostgreSQL URL for the postgres backend
//!   DB_MAX_CONNECTIONS, DB_CONNECT_TIMEOUT_SECS - pool tuning
//!   ALLOWED_ORIGINS  - comma-separated CORS origin whitelist
//!   MAX_BODY_BYTES   - request body limit in bytes (default: 65536)

use std::net::SocketAddr;
use std::str::FromStr;

use axum::http::HeaderValue;
use tracing::warn;

use quicknote_core::defaults;
use quicknote_db::PoolConfig;

/// Which persistence backend the server wires into its handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL through a connection pool.
    Postgres,
    /// Process-local store; contents are lost on restart.
    Memory,
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(StorageBackend::Postgres),
            "memory" | "mem" => Ok(StorageBackend::Memory),
            other => Err(format!("unknown storage backend '{}'", other)),
        }
    }
}

/// Fully resolved server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub storage: StorageBackend,
    pub database_url: String,
    pub pool: PoolConfig,
    pub allowed_origins: Vec<HeaderValue>,
    pub max_body_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: defaults::SERVER_HOST.to_string(),
            port: defaults::SERVER_PORT,
            storage: StorageBackend::Postgres,
            database_url: defaults::DATABASE_URL.to_string(),
            pool: PoolConfig::default(),
            allowed_origins: parse_allowed_origins(defaults::ALLOWED_ORIGINS),
            max_body_bytes: defaults::MAX_BODY_BYTES,
        }
    }
}

impl ServerConfig {
    /// Read the configuration from process environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    ///
    /// Unparsable values fall back to their defaults with a warning.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let base = Self::default();
        Self {
            host: lookup("HOST").unwrap_or(base.host),
            port: parse_or(&lookup, "PORT", base.port),
            storage: parse_or(&lookup, "STORAGE_BACKEND", base.storage),
            database_url: lookup("DATABASE_URL").unwrap_or(base.database_url),
            pool: PoolConfig::from_lookup(&lookup),
            allowed_origins: lookup("ALLOWED_ORIGINS")
                .map(|s| parse_allowed_origins(&s))
                .unwrap_or(base.allowed_origins),
            max_body_bytes: parse_or(&lookup, "MAX_BODY_BYTES", base.max_body_bytes),
        }
    }

    /// Socket address the listener binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr, std::net::AddrParseError> {
        format!("{}:{}", self.host, self.port).parse()
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Debug,
{
    match lookup(key) {
        None => default,
        Some(raw) => match raw.trim().parse::<T>() {
            Ok(v) => v,
            Err(_) => {
                warn!(key, value = %raw, fallback = ?default, "Invalid configuration value, using default");
                default
            }
        },
    }
}

/// Parse a comma-separated origin whitelist.
///
/// Invalid entries are skipped with a warning. An empty string yields the
/// default local origins.
pub fn parse_allowed_origins(origins_str: &str) -> Vec<HeaderValue> {
    if origins_str.trim().is_empty() {
        return parse_allowed_origins(defaults::ALLOWED_ORIGINS);
    }

    origins_str
        .split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return None;
            }
            match trimmed.parse::<HeaderValue>() {
                Ok(v) => Some(v),
                Err(e) => {
                    warn!("Invalid CORS origin '{}': {}", trimmed, e);
                    None
                }
            }
        })
        .collect()
}
