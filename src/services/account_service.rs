//! Account service - registration, credential checks and account removal.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Email, Password, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// Account service trait for dependency injection.
#[async_trait]
pub trait AccountService: Send + Sync {
    /// Create an account; fails with `Conflict` if the email is taken
    async fn register(&self, email: &Email, password: &str) -> AppResult<User>;

    /// Whether an account exists for this email
    async fn user_exists(&self, email: &Email) -> AppResult<bool>;

    /// Check a password; `false` for both unknown email and wrong password
    async fn login(&self, email: &Email, password: &str) -> AppResult<bool>;

    /// Revalidate a session claim against the store
    async fn email_login(&self, email: &Email) -> AppResult<bool>;

    /// Remove an account; fails with `NotFound` if there is none
    async fn delete_user(&self, email: &Email) -> AppResult<()>;
}

/// Concrete implementation of AccountService over a user repository.
pub struct AccountManager {
    users: Arc<dyn UserRepository>,
}

impl AccountManager {
    /// Create new account service instance
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl AccountService for AccountManager {
    async fn register(&self, email: &Email, password: &str) -> AppResult<User> {
        // Fast path only; the unique key on users.email settles races and
        // comes back from the repository as Conflict as well.
        if self.users.exists(email).await? {
            return Err(AppError::conflict("User"));
        }

        let password_hash = Password::new(password)?.into_string();
        let user = self.users.create(email, password_hash).await?;

        tracing::info!(user_id = user.id, "User registered");
        Ok(user)
    }

    async fn user_exists(&self, email: &Email) -> AppResult<bool> {
        self.users.exists(email).await
    }

    async fn login(&self, email: &Email, password: &str) -> AppResult<bool> {
        match self.users.find_by_email(email).await? {
            Some(user) => Ok(Password::from_hash(user.password_hash).verify(password)),
            None => Ok(Password::verify_dummy(password)),
        }
    }

    async fn email_login(&self, email: &Email) -> AppResult<bool> {
        self.users.exists(email).await
    }

    async fn delete_user(&self, email: &Email) -> AppResult<()> {
        if !self.users.exists(email).await? {
            return Err(AppError::NotFound);
        }

        // The row can still vanish between the two calls
        if !self.users.delete(email).await? {
            return Err(AppError::NotFound);
        }

        tracing::info!("User deleted");
        Ok(())
    }
}
