//! Application-wide constants
//!
//! Centralized location for magic values to improve maintainability.

// =============================================================================
// Server Configuration
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// Database
// =============================================================================

/// Default database URL, a single SQLite file created on first use
pub const DEFAULT_DATABASE_URL: &str = "sqlite://codetrack.db?mode=rwc";

/// Default size of the connection pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

// =============================================================================
// Sessions
// =============================================================================

/// Default session cookie name
pub const DEFAULT_SESSION_COOKIE_NAME: &str = "codetrack";

/// Session key holding the authenticated email claim
pub const SESSION_EMAIL_KEY: &str = "email";

/// Sessions expire after this many days without a request
pub const DEFAULT_SESSION_INACTIVITY_DAYS: i64 = 14;

/// How often expired session rows are swept from the store
pub const DEFAULT_SESSION_SWEEP_INTERVAL_SECONDS: u64 = 3600;

/// Minimum session secret length; the cookie signing key needs 64 bytes
pub const MIN_SESSION_SECRET_LENGTH: usize = 64;

/// Development-only signing secret, refused in release builds
pub(crate) const DEV_SESSION_SECRET: &str =
    "codetrack-dev-session-secret-do-not-use-in-production-0123456789abcdef";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length requirement
pub const MIN_PASSWORD_LENGTH: u64 = 1;

// =============================================================================
// Response messages
// =============================================================================

pub const MSG_OK: &str = "OK";
pub const MSG_USER_REGISTERED: &str = "User registered";
pub const MSG_LOGGED_IN: &str = "Logged in";
pub const MSG_LOGGED_OUT: &str = "Logged out";
pub const MSG_USER_DELETED: &str = "User deleted";
