//! Email value object - the natural key of an account.

use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::errors::{AppError, AppResult};

/// Normalized, syntactically valid email address.
///
/// Surrounding whitespace is trimmed and the address is lowercased before
/// validation, so every comparison and every stored value uses the same
/// canonical form. Deserialization goes through the same check, which keeps
/// a tampered session claim from ever becoming an `Email`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Email(String);

impl Email {
    /// Normalize and validate a raw address.
    pub fn parse(raw: &str) -> AppResult<Self> {
        let normalized = raw.trim().to_lowercase();
        if normalized.validate_email() {
            Ok(Self(normalized))
        } else {
            Err(AppError::validation("Invalid email format"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl TryFrom<String> for Email {
    type Error = AppError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Email> for String {
    fn from(email: Email) -> Self {
        email.0
    }
}
