//! Request ID middleware for tracing and debugging.
//!
//! Every request runs inside a tracing span carrying its request id, method,
//! and path, so all logs emitted while handling it correlate without
//! threading the id through handlers. The id is echoed on the response for
//! client-side correlation.

use axum::{
    extract::Request,
    http::{HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

use crate::metrics;

/// Header name for request ID
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Extract the caller-provided request ID, or generate a fresh one
fn request_id_from(headers: &HeaderMap) -> String {
    headers
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

/// Middleware wrapping every request in a correlation span.
///
/// This middleware:
/// 1. Extracts an existing request ID from the header or generates a new one
/// 2. Runs the request inside a span named by that ID
/// 3. Records request count and duration metrics
/// 4. Echoes the request ID on the response headers
///
/// # Example
///
/// ```no_run
/// use axum::{Router, routing::get, middleware};
/// use lb_server::api::request_id::request_id_middleware;
///
/// # async fn example() {
/// let app: Router = Router::new()
///     .route("/", get(|| async { "Hello" }))
///     .layer(middleware::from_fn(request_id_middleware));
/// # }
/// ```
pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request_id_from(request.headers());
    let method = request.method().as_str().to_string();
    let path = request.uri().path().to_string();
    let started = Instant::now();

    let span = tracing::info_span!(
        "request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    let mut response = next.run(request).instrument(span.clone()).await;

    let duration_ms = started.elapsed().as_secs_f64() * 1000.0;
    span.in_scope(|| {
        tracing::info!(status = %response.status(), duration_ms, "Request completed");
    });

    metrics::http_requests_total(&method, &path, response.status().as_u16());
    metrics::http_request_duration_ms(&method, &path, duration_ms);

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response
            .headers_mut()
            .insert(REQUEST_ID_HEADER, header_value);
    }

    response
}
