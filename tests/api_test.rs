//! End-to-end tests for the account endpoints.
//!
//! Every test builds the full router on a private in-memory SQLite database
//! and drives it with `oneshot`, carrying the session cookie by hand.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    middleware,
    response::Response,
    routing::get,
    Router,
};
use async_trait::async_trait;
use sea_orm::DbErr;
use serde_json::{json, Value};
use tower::ServiceExt;
use tower_sessions::SessionManagerLayer;

use codetrack::api::middleware::session_gate;
use codetrack::api::{create_router, AppState};
use codetrack::config::Config;
use codetrack::domain::{Email, User};
use codetrack::errors::{AppError, AppResult};
use codetrack::infra::Database;
use codetrack::services::AccountService;

// =============================================================================
// Mock Services for Testing
// =============================================================================

/// Account service whose claim revalidation always hits a storage failure.
///
/// Everything else is forwarded to the real service.
struct LockedAccountService {
    inner: Arc<dyn AccountService>,
}

#[async_trait]
impl AccountService for LockedAccountService {
    async fn register(&self, email: &Email, password: &str) -> AppResult<User> {
        self.inner.register(email, password).await
    }

    async fn user_exists(&self, email: &Email) -> AppResult<bool> {
        self.inner.user_exists(email).await
    }

    async fn login(&self, email: &Email, password: &str) -> AppResult<bool> {
        self.inner.login(email, password).await
    }

    async fn email_login(&self, _email: &Email) -> AppResult<bool> {
        Err(AppError::Database(DbErr::Custom("database is locked".into())))
    }

    async fn delete_user(&self, email: &Email) -> AppResult<()> {
        self.inner.delete_user(email).await
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

fn test_config() -> Config {
    let mut config = Config::development();
    config.database_url = "sqlite::memory:".to_string();
    // A single connection keeps every query on the same in-memory database
    config.database_max_connections = 1;
    config
}

async fn test_state() -> AppState {
    let config = test_config();
    let database = Database::connect(&config)
        .await
        .expect("in-memory database should open");
    AppState::from_config(Arc::new(database), config).expect("state should build")
}

async fn test_app() -> (Router, AppState) {
    let state = test_state().await;
    (create_router(state.clone()), state)
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    cookie: Option<&str>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    app.clone().oneshot(request).await.unwrap()
}

async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// `name=value` part of the session cookie set by a response.
fn session_cookie(response: &Response) -> String {
    let set_cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("response should set the session cookie")
        .to_str()
        .unwrap();
    set_cookie.split(';').next().unwrap().trim().to_string()
}

fn credentials(email: &str, password: &str) -> Value {
    json!({ "email": email, "password": password })
}

async fn register(app: &Router, email: &str, password: &str) -> Response {
    send(
        app,
        Method::POST,
        "/api/accounts/register",
        Some(credentials(email, password)),
        None,
    )
    .await
}

async fn login(app: &Router, email: &str, password: &str) -> String {
    let response = send(
        app,
        Method::POST,
        "/api/accounts/login",
        Some(credentials(email, password)),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    session_cookie(&response)
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_healthcheck() {
    let (app, _) = test_app().await;

    let response = send(&app, Method::GET, "/api/healthcheck", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], 200);
    assert_eq!(body["message"], "OK");
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (app, _) = test_app().await;

    let response = send(&app, Method::GET, "/api-docs/openapi.json", None, None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["paths"]["/api/accounts/login"].is_object());
    assert!(body["components"]["securitySchemes"]["session_cookie"].is_object());
}

// =============================================================================
// Full account lifecycle
// =============================================================================

#[tokio::test]
async fn test_account_lifecycle() {
    let (app, _) = test_app().await;

    // Register
    let response = register(&app, "alice@example.com", "secret1").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["message"], "User registered");
    assert_eq!(body["data"]["email"], "alice@example.com");
    assert_eq!(body["data"]["password"], "secret1");

    // Register again
    let response = register(&app, "alice@example.com", "secret1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "User already exists");

    // Login
    let cookie = login(&app, "alice@example.com", "secret1").await;

    // Me
    let response = send(&app, Method::GET, "/api/accounts/me", None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["email"], "alice@example.com");

    // Delete
    let response = send(
        &app,
        Method::DELETE,
        "/api/accounts/delete",
        None,
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "User deleted");

    // The old cookie no longer opens anything
    let response = send(&app, Method::GET, "/api/accounts/me", None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["message"], "Unauthorized");
}

#[tokio::test]
async fn test_reregistering_keeps_original_password() {
    let (app, _) = test_app().await;

    let response = register(&app, "a@example.com", "one").await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = register(&app, "A@example.com", "two").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "User already exists");

    let response = send(
        &app,
        Method::POST,
        "/api/accounts/login",
        Some(credentials("a@example.com", "two")),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Invalid credentials");

    login(&app, "a@example.com", "one").await;
}

#[tokio::test]
async fn test_logout_ends_session() {
    let (app, _) = test_app().await;
    register(&app, "bob@example.com", "hunter2").await;
    let cookie = login(&app, "bob@example.com", "hunter2").await;

    let response = send(
        &app,
        Method::POST,
        "/api/accounts/logout",
        None,
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["message"], "Logged out");

    let response = send(&app, Method::GET, "/api/accounts/me", None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Error paths
// =============================================================================

#[tokio::test]
async fn test_protected_routes_require_session() {
    let (app, _) = test_app().await;

    for (method, uri) in [
        (Method::POST, "/api/accounts/logout"),
        (Method::DELETE, "/api/accounts/delete"),
        (Method::GET, "/api/accounts/me"),
    ] {
        let response = send(&app, method, uri, None, None).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
    }
}

#[tokio::test]
async fn test_malformed_body_is_bad_request() {
    let (app, _) = test_app().await;

    let response = send(
        &app,
        Method::POST,
        "/api/accounts/register",
        Some(json!({ "email": "alice@example.com" })),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = register(&app, "not-an-email", "secret1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = register(&app, "alice@example.com", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_wrong_password_and_unknown_user_are_indistinguishable() {
    let (app, _) = test_app().await;
    register(&app, "carol@example.com", "secret1").await;

    let wrong_password = send(
        &app,
        Method::POST,
        "/api/accounts/login",
        Some(credentials("carol@example.com", "secret2")),
        None,
    )
    .await;
    let unknown_user = send(
        &app,
        Method::POST,
        "/api/accounts/login",
        Some(credentials("nobody@example.com", "secret1")),
        None,
    )
    .await;

    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);
    assert_eq!(unknown_user.status(), StatusCode::BAD_REQUEST);
    assert!(wrong_password.headers().get(header::SET_COOKIE).is_none());

    let wrong_password = body_json(wrong_password).await;
    let unknown_user = body_json(unknown_user).await;
    assert_eq!(wrong_password, unknown_user);
    assert_eq!(wrong_password["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_second_login_on_same_session_is_rejected() {
    let (app, _) = test_app().await;
    register(&app, "dave@example.com", "secret1").await;
    let cookie = login(&app, "dave@example.com", "secret1").await;

    let response = send(
        &app,
        Method::POST,
        "/api/accounts/login",
        Some(credentials("dave@example.com", "secret1")),
        Some(&cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["message"], "Already logged in");
}

#[tokio::test]
async fn test_email_is_case_insensitive() {
    let (app, _) = test_app().await;

    let response = register(&app, "  Erin@Example.COM ", "secret1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["data"]["email"], "erin@example.com");

    let response = register(&app, "erin@example.com", "secret1").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let cookie = login(&app, "ERIN@example.com", "secret1").await;
    let response = send(&app, Method::GET, "/api/accounts/me", None, Some(&cookie)).await;
    assert_eq!(body_json(response).await["data"]["email"], "erin@example.com");
}

#[tokio::test]
async fn test_session_is_revalidated_after_account_removal() {
    let (app, state) = test_app().await;
    register(&app, "frank@example.com", "secret1").await;
    let cookie = login(&app, "frank@example.com", "secret1").await;

    // Remove the account behind the session's back
    let email = Email::parse("frank@example.com").unwrap();
    state.account_service.delete_user(&email).await.unwrap();

    let response = send(&app, Method::GET, "/api/accounts/me", None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_gate_short_circuits_before_handler() {
    let state = test_state().await;
    let reached = Arc::new(AtomicBool::new(false));
    let flag = reached.clone();

    let app = Router::new()
        .route(
            "/guarded",
            get(move || {
                let flag = flag.clone();
                async move {
                    flag.store(true, Ordering::SeqCst);
                    "reached"
                }
            }),
        )
        .route_layer(middleware::from_fn_with_state(state.clone(), session_gate))
        .layer(SessionManagerLayer::new(state.session_store.clone()))
        .with_state(state);

    let response = send(&app, Method::GET, "/guarded", None, None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(!reached.load(Ordering::SeqCst));
}

#[tokio::test]
async fn test_gate_storage_failure_is_internal_error() {
    let (app, state) = test_app().await;
    register(&app, "gina@example.com", "secret1").await;
    let cookie = login(&app, "gina@example.com", "secret1").await;

    let locked = AppState::new(
        Arc::new(LockedAccountService {
            inner: state.account_service.clone(),
        }),
        state.session_store.clone(),
        state.database.clone(),
        test_config(),
    )
    .unwrap();

    let reached = Arc::new(AtomicBool::new(false));
    let flag = reached.clone();
    let guarded = Router::new()
        .route(
            "/guarded",
            get(move || {
                let flag = flag.clone();
                async move {
                    flag.store(true, Ordering::SeqCst);
                    "reached"
                }
            }),
        )
        .route_layer(middleware::from_fn_with_state(locked.clone(), session_gate))
        .layer(
            SessionManagerLayer::new(locked.session_store.clone())
                .with_name(locked.config.session_cookie_name.clone())
                .with_signed(locked.session_key.clone()),
        )
        .with_state(locked);

    let response = send(&guarded, Method::GET, "/guarded", None, Some(&cookie)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body_json(response).await,
        json!({ "status": 500, "message": "Internal server error" })
    );
    assert!(!reached.load(Ordering::SeqCst));
}
