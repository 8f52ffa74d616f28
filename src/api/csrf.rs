//! CSRF token endpoints.
//!
//! Issuance hands out an opaque token string; the client sends it back
//! unmodified (header or cookie, the server does not care) and verification
//! reports a bare boolean. An invalid token is a successful verification
//! request, not an error status.

use axum::{
    extract::State,
    response::{IntoResponse, Json},
    Json as JsonExtractor,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::security::CsrfSigner;

/// Response from token issuance
#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    /// Opaque token string; return it unmodified for verification
    pub token: String,
    /// Validity window in milliseconds from issuance
    pub expires_in_ms: i64,
}

/// Request body for token verification
#[derive(Debug, Deserialize, ToSchema)]
pub struct VerifyRequest {
    /// Token string of unknown origin
    pub token: String,
}

/// Response from token verification
#[derive(Debug, Serialize, ToSchema)]
pub struct VerifyResponse {
    /// Whether the token is authentic and unexpired
    pub valid: bool,
}

/// Issue a CSRF token
///
/// Stateless: nothing is stored server-side, the token carries its own
/// issuance time and signature.
#[utoipa::path(
    get,
    path = "/api/csrf/token",
    responses(
        (status = 200, description = "Freshly issued token", body = TokenResponse),
    ),
    tag = "Csrf"
)]
pub async fn handle_issue_token(State(signer): State<Arc<CsrfSigner>>) -> impl IntoResponse {
    let token = signer.issue();
    tracing::debug!("Issued CSRF token");

    Json(TokenResponse {
        token,
        expires_in_ms: signer.ttl_ms(),
    })
}

/// Verify a CSRF token
///
/// Malformed, tampered and expired tokens all report `valid: false` with no
/// further detail.
#[utoipa::path(
    post,
    path = "/api/csrf/verify",
    request_body = VerifyRequest,
    responses(
        (status = 200, description = "Verification result", body = VerifyResponse),
    ),
    tag = "Csrf"
)]
pub async fn handle_verify_token(
    State(signer): State<Arc<CsrfSigner>>,
    JsonExtractor(request): JsonExtractor<VerifyRequest>,
) -> impl IntoResponse {
    let valid = signer.verify(&request.token);
    tracing::debug!(valid, "Verified CSRF token");

    Json(VerifyResponse { valid })
}
