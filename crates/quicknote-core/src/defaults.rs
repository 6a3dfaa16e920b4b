//! Centralized default constants for quicknote.
//!
//! The server configuration, pool configuration, and client all read their
//! fallbacks from here instead of defining their own magic numbers.

// =============================================================================
// SERVER
// =============================================================================

/// Default bind address.
pub const SERVER_HOST: &str = "0.0.0.0";

/// Default HTTP server port.
pub const SERVER_PORT: u16 = 3000;

/// Maximum accepted request body. Notes are short; 64 KiB is generous.
pub const MAX_BODY_BYTES: usize = 64 * 1024;

/// CORS origins allowed when `ALLOWED_ORIGINS` is unset.
pub const ALLOWED_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

// =============================================================================
// DATABASE
// =============================================================================

/// Default database URL when `DATABASE_URL` is unset.
pub const DATABASE_URL: &str = "postgres://localhost/quicknote";

/// Default maximum number of pooled connections.
pub const DB_MAX_CONNECTIONS: u32 = 10;

/// Default connection acquire timeout in seconds.
pub const DB_CONNECT_TIMEOUT_SECS: u64 = 30;

/// Default idle timeout in seconds.
pub const DB_IDLE_TIMEOUT_SECS: u64 = 600;

// =============================================================================
// CLIENT
// =============================================================================

/// Base URL the client talks to when none is configured.
pub const CLIENT_BASE_URL: &str = "http://localhost:3000";

/// Per-request timeout for the HTTP client, in seconds.
pub const CLIENT_TIMEOUT_SECS: u64 = 10;

/// Path of the notes collection endpoint.
pub const NOTES_PATH: &str = "/api/notes";
