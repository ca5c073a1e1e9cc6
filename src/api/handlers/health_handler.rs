//! Health check handler.

use axum::extract::State;

use crate::api::AppState;
use crate::config::MSG_OK;
use crate::errors::AppResult;
use crate::types::ApiResponse;

/// Readiness check
///
/// Answers 200 once the database accepts a trivial query.
#[utoipa::path(
    get,
    path = "/api/healthcheck",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up"),
        (status = 500, description = "Database unreachable")
    )
)]
pub async fn healthcheck(State(state): State<AppState>) -> AppResult<ApiResponse<()>> {
    state.database.ping().await?;
    Ok(ApiResponse::message(MSG_OK))
}
