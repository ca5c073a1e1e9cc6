//! Password value object - Domain layer password handling.
//!
//! Credentials are only ever stored as Argon2 PHC strings; plain text
//! never leaves this module.

use std::sync::OnceLock;

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};

use crate::config::MIN_PASSWORD_LENGTH;
use crate::errors::{AppError, AppResult};

/// Password value object that handles hashing and verification.
#[derive(Clone)]
pub struct Password {
    hash: String,
}

// Don't expose hash in debug output
impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("hash", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Create a new password by hashing the plain text.
    ///
    /// # Errors
    /// Returns validation error if password is shorter than
    /// [`MIN_PASSWORD_LENGTH`], or an internal error if hashing fails.
    pub fn new(plain_text: &str) -> AppResult<Self> {
        if plain_text.chars().count() < MIN_PASSWORD_LENGTH as usize {
            return Err(AppError::validation("Password must not be empty"));
        }

        let hash = Self::hash(plain_text)?;
        Ok(Self { hash })
    }

    /// Create a Password from an existing hash (from database).
    pub fn from_hash(hash: String) -> Self {
        Self { hash }
    }

    /// Get the hash string for storage.
    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Consume and return the hash string.
    pub fn into_string(self) -> String {
        self.hash
    }

    /// Verify a plain text password against this hash.
    ///
    /// A malformed stored hash never verifies.
    pub fn verify(&self, plain_text: &str) -> bool {
        Self::verify_hash(plain_text, &self.hash).unwrap_or(false)
    }

    /// Burn one verification against a throwaway hash.
    ///
    /// Called when the account does not exist so that a failed login takes
    /// about as long whether or not the email is registered.
    pub fn verify_dummy(plain_text: &str) -> bool {
        static DUMMY: OnceLock<Option<Password>> = OnceLock::new();
        if let Some(dummy) = DUMMY.get_or_init(|| Password::new("codetrack-dummy-password").ok()) {
            let _ = dummy.verify(plain_text);
        }
        false
    }

    /// Hash a password using Argon2.
    fn hash(plain_text: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Self::argon2()
            .hash_password(plain_text.as_bytes(), &salt)
            .map_err(|e| AppError::internal(format!("Password hash failed: {}", e)))?;
        Ok(hash.to_string())
    }

    /// Verify password against hash.
    fn verify_hash(plain_text: &str, hash: &str) -> AppResult<bool> {
        let parsed = PasswordHash::new(hash)
            .map_err(|e| AppError::internal(format!("Invalid hash format: {}", e)))?;
        Ok(Self::argon2()
            .verify_password(plain_text.as_bytes(), &parsed)
            .is_ok())
    }

    #[inline]
    fn argon2() -> Argon2<'static> {
        Argon2::default()
    }
}
