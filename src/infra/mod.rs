//! Infrastructure layer - External systems integration
//!
//! This module handles all external system concerns:
//! - Database connection and migrations
//! - Repositories (the query layer over the users table)
//! - Server-side session storage

pub mod db;
pub mod repositories;
pub mod session_store;

pub use db::{Database, Migrator};
pub use repositories::{UserRepository, UserStore};
pub use session_store::DbSessionStore;

#[cfg(any(test, feature = "test-utils"))]
pub use repositories::MockUserRepository;
