//! Application settings loaded from environment variables.

use std::env;
use std::str::FromStr;

use super::constants::{
    DEFAULT_DATABASE_MAX_CONNECTIONS, DEFAULT_DATABASE_URL, DEFAULT_SERVER_HOST,
    DEFAULT_SERVER_PORT, DEFAULT_SESSION_COOKIE_NAME, DEFAULT_SESSION_INACTIVITY_DAYS,
    DEFAULT_SESSION_SWEEP_INTERVAL_SECONDS, DEV_SESSION_SECRET, MIN_SESSION_SECRET_LENGTH,
};
use crate::errors::{AppError, AppResult};

/// Application configuration
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    session_secret: String,
    pub session_cookie_name: String,
    pub session_inactivity_days: i64,
    pub session_secure_cookie: bool,
    pub session_sweep_interval_seconds: u64,
    pub server_host: String,
    pub server_port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &"[REDACTED]")
            .field("database_max_connections", &self.database_max_connections)
            .field("session_secret", &"[REDACTED]")
            .field("session_cookie_name", &self.session_cookie_name)
            .field("session_inactivity_days", &self.session_inactivity_days)
            .field("session_secure_cookie", &self.session_secure_cookie)
            .field(
                "session_sweep_interval_seconds",
                &self.session_sweep_interval_seconds,
            )
            .field("server_host", &self.server_host)
            .field("server_port", &self.server_port)
            .finish()
    }
}

impl Config {
    /// Built-in defaults with the insecure development session secret.
    ///
    /// Useful for local runs and tests; `from_env` starts from these values.
    pub fn development() -> Self {
        Self {
            database_url: DEFAULT_DATABASE_URL.to_string(),
            database_max_connections: DEFAULT_DATABASE_MAX_CONNECTIONS,
            session_secret: DEV_SESSION_SECRET.to_string(),
            session_cookie_name: DEFAULT_SESSION_COOKIE_NAME.to_string(),
            session_inactivity_days: DEFAULT_SESSION_INACTIVITY_DAYS,
            session_secure_cookie: false,
            session_sweep_interval_seconds: DEFAULT_SESSION_SWEEP_INTERVAL_SECONDS,
            server_host: DEFAULT_SERVER_HOST.to_string(),
            server_port: DEFAULT_SERVER_PORT,
        }
    }

    /// Load configuration from environment variables (and `.env` if present).
    ///
    /// # Errors
    /// Fails when `SESSION_SECRET` is missing in a release build, when it is
    /// shorter than [`MIN_SESSION_SECRET_LENGTH`], or when a numeric variable
    /// cannot be parsed.
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let defaults = Self::development();

        let session_secret = match env::var("SESSION_SECRET") {
            Ok(secret) => secret,
            Err(_) if cfg!(debug_assertions) => {
                tracing::warn!("SESSION_SECRET not set, using insecure default for development");
                defaults.session_secret.clone()
            }
            Err(_) => {
                return Err(AppError::internal(
                    "SESSION_SECRET environment variable must be set in production",
                ))
            }
        };

        let config = Self {
            database_url: env::var("DATABASE_URL").unwrap_or(defaults.database_url),
            database_max_connections: parse_var(
                "DATABASE_MAX_CONNECTIONS",
                defaults.database_max_connections,
            )?,
            session_secret,
            session_cookie_name: env::var("SESSION_COOKIE_NAME")
                .unwrap_or(defaults.session_cookie_name),
            session_inactivity_days: parse_var(
                "SESSION_INACTIVITY_DAYS",
                defaults.session_inactivity_days,
            )?,
            session_secure_cookie: parse_var(
                "SESSION_SECURE_COOKIE",
                defaults.session_secure_cookie,
            )?,
            session_sweep_interval_seconds: parse_var(
                "SESSION_SWEEP_INTERVAL_SECONDS",
                defaults.session_sweep_interval_seconds,
            )?,
            server_host: env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_var("SERVER_PORT", defaults.server_port)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Replace the session signing secret.
    pub fn with_session_secret(mut self, secret: impl Into<String>) -> Self {
        self.session_secret = secret.into();
        self
    }

    /// Check invariants that cannot be expressed in the field types.
    pub fn validate(&self) -> AppResult<()> {
        if self.session_secret.len() < MIN_SESSION_SECRET_LENGTH {
            return Err(AppError::internal(format!(
                "SESSION_SECRET must be at least {} characters long",
                MIN_SESSION_SECRET_LENGTH
            )));
        }
        if self.session_inactivity_days <= 0 {
            return Err(AppError::internal(
                "SESSION_INACTIVITY_DAYS must be a positive number of days",
            ));
        }
        if self.database_max_connections == 0 {
            return Err(AppError::internal(
                "DATABASE_MAX_CONNECTIONS must be greater than 0",
            ));
        }
        Ok(())
    }

    /// Get session secret bytes for cookie signing.
    pub fn session_secret_bytes(&self) -> &[u8] {
        self.session_secret.as_bytes()
    }

    /// Get the full server address.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

/// Read and parse an optional environment variable, falling back to `default`.
fn parse_var<T: FromStr>(name: &str, default: T) -> AppResult<T> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|_| AppError::internal(format!("{} has an invalid value: {:?}", name, raw))),
        Err(_) => Ok(default),
    }
}
