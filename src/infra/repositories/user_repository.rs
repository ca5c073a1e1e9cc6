//! User repository - typed read/write operations over the users table.
//!
//! This is mechanism only: it never decides whether an operation is allowed.
//! Absence is reported as `None`/`false`, storage failures as errors. The one
//! exception is a unique-key violation on insert, which is reported as
//! `AppError::Conflict` because the database constraint is the authority on
//! email uniqueness.

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    SqlErr,
};

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use crate::domain::{Email, User};
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Exact-match lookup by email
    async fn find_by_email(&self, email: &Email) -> AppResult<Option<User>>;

    /// Whether a user with this email exists
    async fn exists(&self, email: &Email) -> AppResult<bool>;

    /// Insert a new user with an already hashed password
    async fn create(&self, email: &Email, password_hash: String) -> AppResult<User>;

    /// Delete the user with this email; returns whether a row was removed
    async fn delete(&self, email: &Email) -> AppResult<bool>;
}

/// Concrete implementation of UserRepository
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for UserStore {
    async fn find_by_email(&self, email: &Email) -> AppResult<Option<User>> {
        let result = UserEntity::find()
            .filter(user::Column::Email.eq(email.as_str()))
            .one(&self.db)
            .await
            .map_err(AppError::from)?;

        result.map(User::try_from).transpose()
    }

    async fn exists(&self, email: &Email) -> AppResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn create(&self, email: &Email, password_hash: String) -> AppResult<User> {
        let active_model = ActiveModel {
            email: Set(email.as_str().to_string()),
            password_hash: Set(password_hash),
            created_at: Set(Utc::now()),
            ..Default::default()
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(map_insert_error)?;

        User::try_from(model)
    }

    async fn delete(&self, email: &Email) -> AppResult<bool> {
        let result = UserEntity::delete_many()
            .filter(user::Column::Email.eq(email.as_str()))
            .exec(&self.db)
            .await
            .map_err(AppError::from)?;

        Ok(result.rows_affected > 0)
    }
}

/// Translate a unique-key violation into a conflict, keep everything else raw.
fn map_insert_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::debug!(%detail, "Insert rejected by unique constraint");
            AppError::conflict("User")
        }
        _ => AppError::from(err),
    }
}
