//! HTTP application wiring (axum router + service wiring).
//!
//! Layout:
//! - `services.rs`: collaborator wiring (stores, media, token codec)
//! - `routes/`: HTTP routes + handlers (one file per resource)
//! - `dto.rs`: response JSON mapping and query/multipart helpers
//! - `errors.rs`: consistent error responses
//! - `extract.rs`: body extraction with API-shaped rejections

use std::sync::Arc;

use axum::{Extension, Router};
use tower::ServiceBuilder;

use quill_auth::{Hs256TokenCodec, TokenVerifier};

use crate::config::AppConfig;
use crate::middleware::AuthState;

pub mod dto;
pub mod errors;
pub mod extract;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
pub async fn build_app(config: AppConfig) -> Router {
    let tokens = Arc::new(Hs256TokenCodec::new(config.jwt_secret.as_bytes()));
    let verifier: Arc<dyn TokenVerifier> = tokens.clone();

    let services = Arc::new(services::build_services(&config, tokens));

    routes::router()
        .layer(
            ServiceBuilder::new()
                .layer(Extension(services))
                .layer(Extension(AuthState { verifier })),
        )
}
