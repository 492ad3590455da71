//! HTTP API for the score service.
//!
//! This module provides the REST surface for score submission behind the
//! session-cookie auth gate.
//!
//! # Architecture
//!
//! The API is built with:
//! - **Axum**: Async web framework
//! - **Tower**: Middleware for CORS and request correlation
//! - **Session cookies**: HS256 JWT minted by the identity provider,
//!   validated here on every protected request
//!
//! # Modules
//!
//! - [`scores`]: Score submission endpoint
//! - [`session`]: Session status probe for clients
//! - [`middleware`]: Session-cookie authentication for protected endpoints
//! - [`request_id`]: Request correlation and per-request logging
//!
//! # Endpoints Overview
//!
//! ```text
//! GET  /health       - Health check (public)
//! POST /save-score   - Record a score submission (auth required)
//! GET  /session      - Session status probe (auth required)
//! ```
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use lb_server::api::{create_router, AppState};
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! # let state: AppState = unimplemented!();
//! let app = create_router(state);
//! let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
//! axum::serve(listener, app).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # CORS
//!
//! CORS is configured permissively for development. In production, configure
//! appropriate origins, methods, and headers.

pub mod middleware;
pub mod request_id;
pub mod scores;
pub mod session;

use axum::{
    Router,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use leaderboard::{auth::AuthGate, scores::ScoreManager};
use serde_json::json;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Application state shared across all HTTP handlers.
///
/// This state is cloned for each request (cheap due to Arc wrappers).
///
/// # Fields
///
/// - `auth_gate`: Validates session cookies against the user backend
/// - `score_manager`: Records submissions and reconciles highscores
#[derive(Clone)]
pub struct AppState {
    pub auth_gate: Arc<AuthGate>,
    pub score_manager: Arc<ScoreManager>,
}

/// Create the complete API router with all endpoints and middleware.
///
/// # Arguments
///
/// - `state`: Application state with the auth gate and score manager
///
/// # Returns
///
/// Configured Axum router ready to serve requests
///
/// # Endpoint Summary
///
/// ```text
/// GET  /health       - Health check (public)
/// POST /save-score   - Record a score submission (auth required)
/// GET  /session      - Session status probe (auth required)
/// ```
///
/// # Example
///
/// ```rust,no_run
/// # use lb_server::api::{create_router, AppState};
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let state: AppState = unimplemented!();
/// let app = create_router(state);
/// let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await?;
/// axum::serve(listener, app).await?;
/// # Ok(())
/// # }
/// ```
pub fn create_router(state: AppState) -> Router {
    // Protected routes (require a valid session cookie)
    let protected_routes = Router::new()
        .route("/save-score", post(scores::save_score))
        .route("/session", get(session::session_status))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth_middleware,
        ));

    // Public routes
    let public_routes = Router::new().route("/health", get(health_check));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Health check endpoint for monitoring and load balancers.
///
/// Liveness only: reports that the process is up and serving. Database
/// readiness is checked at startup and surfaces as 500s on the score
/// endpoints if the pool degrades later.
///
/// # Example
///
/// ```bash
/// curl http://localhost:3000/health
/// # {"status":"ok","version":"0.1.0","timestamp":"2026-08-24T10:30:00Z"}
/// ```
async fn health_check() -> impl IntoResponse {
    let response = json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(response))
}
