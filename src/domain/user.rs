//! User domain entity and related types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::Email;

/// User domain entity
#[derive(Debug, Clone, Serialize)]
pub struct User {
    pub id: i32,
    pub email: Email,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Identity of the caller on a request that passed the session gate.
///
/// Inserted into request extensions by the gate; protected handlers take it
/// with `Extension<CurrentAccount>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentAccount {
    pub email: Email,
}
