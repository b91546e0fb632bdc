//! Bearer credential verification shared by the authenticated extractors.

use std::sync::Arc;

use axum::http::HeaderMap;
use chrono::Utc;

use quill_auth::{Identity, TokenVerifier};
use quill_core::{CoreError, CoreResult};

/// Verifier handle injected into the router as an extension; the secret
/// behind it is fixed at startup.
#[derive(Clone)]
pub struct AuthState {
    pub verifier: Arc<dyn TokenVerifier>,
}

/// Run the base credential check: extract the bearer token, verify signature
/// and time window, and derive the caller's [`Identity`].
pub fn verify_request(state: &AuthState, headers: &HeaderMap) -> CoreResult<Identity> {
    let token = extract_bearer(headers)?;

    let claims = state
        .verifier
        .verify(token, Utc::now())
        .map_err(|e| CoreError::invalid_credential(e.to_string()))?;

    Ok(Identity::from(&claims))
}

fn extract_bearer(headers: &HeaderMap) -> CoreResult<&str> {
    let header = headers
        .get(axum::http::header::AUTHORIZATION)
        .ok_or_else(|| CoreError::unauthenticated("no token provided"))?;

    let header = header
        .to_str()
        .map_err(|_| CoreError::unauthenticated("malformed authorization header"))?;

    let token = header
        .strip_prefix("Bearer ")
        .ok_or_else(|| CoreError::unauthenticated("malformed authorization header"))?
        .trim();

    if token.is_empty() {
        return Err(CoreError::unauthenticated("no token provided"));
    }

    Ok(token)
}
