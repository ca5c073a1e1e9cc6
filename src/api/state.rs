//! Application state - wiring of services and infrastructure.
//!
//! Every collaborator is passed in explicitly; there is no global registry.

use std::sync::Arc;

use tower_sessions::cookie::Key;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::infra::{Database, DbSessionStore, UserStore};
use crate::services::{AccountManager, AccountService};

/// Application state shared by all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Account service
    pub account_service: Arc<dyn AccountService>,
    /// Server-side session storage
    pub session_store: DbSessionStore,
    /// Cookie signing key
    pub session_key: Key,
    /// Database connection
    pub database: Arc<Database>,
    /// Loaded configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Build the full object graph on top of an open database.
    pub fn from_config(database: Arc<Database>, config: Config) -> AppResult<Self> {
        let users = Arc::new(UserStore::new(database.get_connection()));
        let account_service = Arc::new(AccountManager::new(users));
        let session_store = DbSessionStore::new(database.get_connection());

        Self::new(account_service, session_store, database, config)
    }

    /// Create application state with a manually injected account service.
    pub fn new(
        account_service: Arc<dyn AccountService>,
        session_store: DbSessionStore,
        database: Arc<Database>,
        config: Config,
    ) -> AppResult<Self> {
        let session_key = Key::try_from(config.session_secret_bytes())
            .map_err(|e| AppError::internal(format!("Invalid session secret: {}", e)))?;

        Ok(Self {
            account_service,
            session_store,
            session_key,
            database,
            config: Arc::new(config),
        })
    }
}
