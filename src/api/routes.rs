//! Application route configuration.

use axum::{routing::get, Router};
use time::Duration;
use tower_http::trace::TraceLayer;
use tower_sessions::{cookie::SameSite, Expiry, SessionManagerLayer};
use utoipa_swagger_ui::SwaggerUi;

use super::handlers::{account_routes, healthcheck};
use super::middleware::{log_response, make_request_span};
use super::openapi::api_doc;
use super::AppState;

/// Create the application router with all routes configured
pub fn create_router(state: AppState) -> Router {
    let session_layer = SessionManagerLayer::new(state.session_store.clone())
        .with_name(state.config.session_cookie_name.clone())
        .with_secure(state.config.session_secure_cookie)
        .with_same_site(SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(Duration::days(
            state.config.session_inactivity_days,
        )))
        .with_signed(state.session_key.clone());

    Router::new()
        .route("/api/healthcheck", get(healthcheck))
        .nest("/api/accounts", account_routes(state.clone()))
        // OpenAPI Swagger UI documentation
        .merge(SwaggerUi::new("/swagger-ui").url(
            "/api-docs/openapi.json",
            api_doc(&state.config.session_cookie_name),
        ))
        .layer(session_layer)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(make_request_span)
                .on_response(log_response),
        )
        .with_state(state)
}
