//! Process configuration, read from the environment once at startup.

use std::net::SocketAddr;

use quill_infra::MediaConfig;

/// Everything the server needs, assembled in `main` and passed down
/// explicitly — no ambient globals.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub media: MediaConfig,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let port: u16 = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(4001);

        let jwt_secret = std::env::var("JWT_SECRET").unwrap_or_else(|_| {
            tracing::warn!("JWT_SECRET not set; using insecure dev default");
            "dev-secret".to_string()
        });

        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], port)),
            jwt_secret,
            media: MediaConfig::from_env(),
        }
    }
}
