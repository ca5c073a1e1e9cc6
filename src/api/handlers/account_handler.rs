//! Account handlers: registration, login, logout, deletion and identity.

use axum::{
    extract::State,
    middleware,
    routing::{delete, get, post},
    Extension, Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::extractors::ValidatedJson;
use crate::api::middleware::session_gate;
use crate::api::session::SessionContext;
use crate::api::AppState;
use crate::config::{MSG_LOGGED_IN, MSG_LOGGED_OUT, MSG_OK, MSG_USER_DELETED, MSG_USER_REGISTERED};
use crate::domain::{CurrentAccount, Email};
use crate::errors::{AppError, AppResult};
use crate::types::{ApiResponse, EmailData};

/// Credentials payload shared by register and login
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct AccountRequest {
    /// Account email address (normalized to lowercase)
    #[validate(length(min = 1, message = "Email is required"))]
    #[schema(example = "alice@example.com")]
    pub email: String,
    /// Account password
    #[validate(length(min = 1, message = "Password is required"))]
    #[schema(example = "secret1")]
    pub password: String,
}

/// Echo of a successful registration
#[derive(Debug, Serialize, ToSchema)]
pub struct RegisteredAccount {
    #[schema(example = "alice@example.com")]
    pub email: String,
    #[schema(example = "secret1")]
    pub password: String,
}

/// Create account routes.
///
/// `logout`, `delete` and `me` sit behind the session gate.
pub fn account_routes(state: AppState) -> Router<AppState> {
    let protected = Router::new()
        .route("/logout", post(logout))
        .route("/delete", delete(delete_account))
        .route("/me", get(me))
        .route_layer(middleware::from_fn_with_state(state, session_gate));

    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .merge(protected)
}

/// Register a new account
#[utoipa::path(
    post,
    path = "/api/accounts/register",
    tag = "Accounts",
    request_body = AccountRequest,
    responses(
        (status = 200, description = "User registered", body = RegisteredAccount),
        (status = 400, description = "Malformed body or user already exists"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<AccountRequest>,
) -> AppResult<ApiResponse<RegisteredAccount>> {
    let email = Email::parse(&payload.email)?;

    state
        .account_service
        .register(&email, &payload.password)
        .await?;

    Ok(ApiResponse::success(
        MSG_USER_REGISTERED,
        RegisteredAccount {
            email: email.into_string(),
            password: payload.password,
        },
    ))
}

/// Log in and start a session
#[utoipa::path(
    post,
    path = "/api/accounts/login",
    tag = "Accounts",
    request_body = AccountRequest,
    responses(
        (status = 200, description = "Logged in, session cookie set"),
        (status = 400, description = "Malformed body, invalid credentials or already logged in"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    session: SessionContext,
    ValidatedJson(payload): ValidatedJson<AccountRequest>,
) -> AppResult<ApiResponse<()>> {
    let email = Email::parse(&payload.email)?;

    if session.email().await?.as_ref() == Some(&email) {
        return Err(AppError::AlreadyLoggedIn);
    }

    if !state.account_service.login(&email, &payload.password).await? {
        return Err(AppError::InvalidCredentials);
    }

    session.issue(&email).await?;
    tracing::info!("User logged in");

    Ok(ApiResponse::message(MSG_LOGGED_IN))
}

/// End the current session
#[utoipa::path(
    post,
    path = "/api/accounts/logout",
    tag = "Accounts",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Logged out"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn logout(session: SessionContext) -> AppResult<ApiResponse<()>> {
    session.clear().await?;
    Ok(ApiResponse::message(MSG_LOGGED_OUT))
}

/// Delete the logged-in account and end its session
#[utoipa::path(
    delete,
    path = "/api/accounts/delete",
    tag = "Accounts",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "User deleted"),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn delete_account(
    State(state): State<AppState>,
    Extension(account): Extension<CurrentAccount>,
    session: SessionContext,
) -> AppResult<ApiResponse<()>> {
    state.account_service.delete_user(&account.email).await?;
    session.clear().await?;

    Ok(ApiResponse::message(MSG_USER_DELETED))
}

/// Email of the logged-in account
#[utoipa::path(
    get,
    path = "/api/accounts/me",
    tag = "Accounts",
    security(("session_cookie" = [])),
    responses(
        (status = 200, description = "Current account", body = EmailData),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn me(Extension(account): Extension<CurrentAccount>) -> ApiResponse<EmailData> {
    ApiResponse::success(
        MSG_OK,
        EmailData {
            email: account.email.into_string(),
        },
    )
}
