//! Session gate middleware.
//!
//! Runs in front of every account-scoped route. A request either leaves
//! this gate authorized, carrying a [`CurrentAccount`] extension, or is
//! answered here and never reaches the handler.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::session::SessionContext;
use crate::api::AppState;
use crate::domain::CurrentAccount;
use crate::errors::AppError;

/// Reject requests without a live session claim.
///
/// The claim is revalidated against the store on every request, so a
/// session outlives neither logout nor account deletion.
pub async fn session_gate(
    State(state): State<AppState>,
    session: SessionContext,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let email = session.require_email().await?;

    if !state.account_service.email_login(&email).await? {
        tracing::warn!("Session claim refers to a deleted account");
        return Err(AppError::Unauthorized);
    }

    request.extensions_mut().insert(CurrentAccount { email });

    Ok(next.run(request).await)
}
