//! HTTP server setup and configuration.
//!
//! This module provides the router and application state used by both
//! the production server and integration tests.

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::api;
use crate::config::AppConfig;
use crate::security::{apply_security_headers, CsrfSigner};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub signer: Arc<CsrfSigner>,
    pub config: Arc<AppConfig>,
}

/// Create application state from a config and the signing secret.
///
/// The secret is passed in explicitly so tests can construct state without
/// touching process environment.
pub fn create_app_state(config: Arc<AppConfig>, secret: &str) -> AppState {
    let signer = Arc::new(CsrfSigner::with_ttl(secret, config.csrf_ttl_ms));
    AppState { signer, config }
}

/// Build the API router with all endpoints and middleware.
///
/// This is the core router used by both production and tests. The security
/// header layers sit outermost so every response carries them, including
/// error responses and 404s for unknown routes.
pub fn build_router(state: AppState) -> Router {
    let router = Router::new()
        .route("/api/csrf/token", get(handle_issue_token))
        .route("/api/csrf/verify", post(handle_verify_token))
        // Health check
        .route("/health", get(|| async { "OK" }))
        // Add state and tracing
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    apply_security_headers(router)
}

// Wrapper handlers to extract state components for the underlying API handlers

async fn handle_issue_token(
    axum::extract::State(state): axum::extract::State<AppState>,
) -> impl axum::response::IntoResponse {
    api::handle_issue_token(axum::extract::State(state.signer)).await
}

async fn handle_verify_token(
    axum::extract::State(state): axum::extract::State<AppState>,
    body: axum::Json<api::VerifyRequest>,
) -> impl axum::response::IntoResponse {
    api::handle_verify_token(axum::extract::State(state.signer), body).await
}
