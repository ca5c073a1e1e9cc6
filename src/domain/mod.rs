//! Domain layer - Core business entities and logic
//!
//! Value objects and entities for accounts, independent of storage
//! and transport concerns.

pub mod email;
pub mod password;
pub mod user;

pub use email::Email;
pub use password::Password;
pub use user::{CurrentAccount, User};
