//! Typed access to the session claim.
//!
//! Handlers and the session gate never touch raw session keys; they go
//! through `SessionContext`, which stores and reads the claim as an `Email`.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::config::SESSION_EMAIL_KEY;
use crate::domain::Email;
use crate::errors::{AppError, AppResult};

/// Newtype wrapper exposing the session lifecycle operations.
#[derive(Clone)]
pub struct SessionContext(Session);

impl SessionContext {
    pub fn new(session: Session) -> Self {
        Self(session)
    }

    /// The email claim, if this session carries a valid one.
    ///
    /// A claim that does not deserialize into an `Email` is treated as
    /// absent.
    pub async fn email(&self) -> AppResult<Option<Email>> {
        match self.0.get::<Email>(SESSION_EMAIL_KEY).await {
            Ok(email) => Ok(email),
            Err(tower_sessions::session::Error::SerdeJson(error)) => {
                tracing::warn!("invalid email claim in session: {error}");
                Ok(None)
            }
            Err(error) => Err(AppError::from(error)),
        }
    }

    /// Require a claim or fail with `Unauthorized`.
    pub async fn require_email(&self) -> AppResult<Email> {
        self.email().await?.ok_or(AppError::Unauthorized)
    }

    /// Issue the claim after a successful login.
    ///
    /// The session id is rotated first so an id planted before login cannot
    /// be reused afterwards.
    pub async fn issue(&self, email: &Email) -> AppResult<()> {
        self.0.cycle_id().await?;
        self.0.insert(SESSION_EMAIL_KEY, email).await?;
        Ok(())
    }

    /// Erase the claim and remove the server-side record.
    pub async fn clear(&self) -> AppResult<()> {
        self.0.flush().await?;
        Ok(())
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, message)| AppError::internal(message))?;
        Ok(Self::new(session))
    }
}
