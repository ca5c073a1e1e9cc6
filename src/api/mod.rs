//! API layer - HTTP handlers and middleware
//!
//! This module contains all HTTP-related concerns:
//! - Request handlers
//! - Middleware (session gate, access logging)
//! - Typed session access
//! - Custom extractors
//! - Route definitions

pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod session;
pub mod state;

pub use openapi::{api_doc, ApiDoc};
pub use routes::create_router;
pub use session::SessionContext;
pub use state::AppState;
