//! Codetrack - account and session subsystem
//!
//! Registration, credential checks and cookie-backed sessions for a
//! self-hosted code analytics service, served over HTTP with Axum.
//!
//! # Architecture Layers
//!
//! - **cli**: Command-line interface
//! - **commands**: CLI command implementations
//! - **config**: Application configuration and constants
//! - **domain**: Core business entities (email, password, user)
//! - **services**: Account use cases
//! - **infra**: Database, migrations, repositories and session storage
//! - **api**: HTTP handlers, session gate, and routes
//! - **types**: Shared response envelope
//! - **errors**: Centralized error handling
//!
//! # CLI Usage
//!
//! ```bash
//! # Start the server
//! cargo run -- serve
//!
//! # Run migrations
//! cargo run -- migrate up
//! ```

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod domain;
pub mod errors;
pub mod infra;
pub mod services;
pub mod types;

// Re-export commonly used types at crate root
pub use api::AppState;
pub use config::Config;
pub use domain::{CurrentAccount, Email, Password, User};
pub use errors::{AppError, AppResult};
