//! HTTP access logging on top of `tower_http::trace`.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::{ConnectInfo, Request},
    response::Response,
};
use tracing::Span;

/// Best-effort client address.
/// Uses X-Forwarded-For header if behind proxy, otherwise uses connection IP.
fn client_address(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
    {
        // Take the first IP in the chain (original client)
        if let Some(ip) = forwarded.split(',').next() {
            return ip.trim().to_string();
        }
    }

    if let Some(real_ip) = request
        .headers()
        .get("X-Real-IP")
        .and_then(|h| h.to_str().ok())
    {
        return real_ip.to_string();
    }

    if let Some(connect_info) = request.extensions().get::<ConnectInfo<SocketAddr>>() {
        return connect_info.0.ip().to_string();
    }

    "unknown".to_string()
}

/// One span per request carrying method, path and client address.
pub fn make_request_span(request: &Request) -> Span {
    tracing::info_span!(
        "request",
        method = %request.method(),
        path = %request.uri().path(),
        address = %client_address(request),
    )
}

/// One event per response, leveled by status class.
pub fn log_response(response: &Response, latency: Duration, _span: &Span) {
    let status = response.status().as_u16();
    let latency_ms = latency.as_millis() as u64;

    match status {
        200..=299 => tracing::info!(status, latency_ms, "Request"),
        300..=399 => tracing::warn!(status, latency_ms, "Request"),
        _ => tracing::error!(status, latency_ms, "Request"),
    }
}
