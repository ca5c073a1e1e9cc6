//! Application services layer - Use cases and business logic.
//!
//! Services enforce account invariants on top of the repositories. They
//! depend on the repository trait, never on a concrete store.

mod account_service;

pub use account_service::{AccountManager, AccountService};
