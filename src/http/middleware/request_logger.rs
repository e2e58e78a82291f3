//! Request logging middleware.
//! Logs method, path and body of every request before it is routed.
//! Bodies over `security.max_body_size` are refused here with a JSON 413.

use axum::{
    body::{Body, Bytes},
    extract::State,
    http::{header::CONTENT_LENGTH, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::http::error::AppError;
use crate::http::server::AppState;

/// Text form of a request body for the log line.
fn render_body(bytes: &Bytes) -> String {
    if bytes.is_empty() {
        "{}".to_string()
    } else {
        String::from_utf8_lossy(bytes).into_owned()
    }
}

pub async fn request_logger(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let (parts, body) = req.into_parts();
    let limit = state.config.security.max_body_size;

    let declared = parts
        .headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if declared.is_some_and(|len| len > limit) {
        tracing::warn!(
            method = %parts.method,
            path = %parts.uri.path(),
            content_length = declared,
            "Request body too large"
        );
        return AppError::PayloadTooLarge.into_response();
    }

    // Buffer the body so it can be logged and then handed on unchanged.
    let bytes = match axum::body::to_bytes(body, limit).await {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(
                method = %parts.method,
                path = %parts.uri.path(),
                error = %e,
                "Failed to read request body"
            );
            return AppError::PayloadTooLarge.into_response();
        }
    };

    tracing::info!(
        method = %parts.method,
        path = %parts.uri.path(),
        body = %render_body(&bytes),
        "Incoming request"
    );

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}
