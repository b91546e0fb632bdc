//! Request identity contexts.
//!
//! The credential verifier comes in three variants; the first two are the
//! extractors below, the third (self-or-admin, which needs a path parameter)
//! is [`crate::authz::ensure_self_or_admin`] applied right after extraction.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use quill_auth::{Identity, policy};
use quill_core::{CoreError, UserId};

use crate::app::errors::ApiError;
use crate::middleware::{AuthState, verify_request};

/// Authenticated-only: any verified identity.
///
/// Explicit per-request value; handlers receive it as a parameter, never via
/// a global.
#[derive(Debug, Copy, Clone)]
pub struct IdentityContext {
    identity: Identity,
}

impl IdentityContext {
    pub fn identity(&self) -> Identity {
        self.identity
    }

    pub fn user_id(&self) -> UserId {
        self.identity.user_id
    }

    pub fn is_admin(&self) -> bool {
        self.identity.is_admin
    }
}

/// Authenticated-and-admin: verified identity with the moderator flag.
#[derive(Debug, Copy, Clone)]
pub struct AdminContext {
    identity: Identity,
}

impl AdminContext {
    pub fn identity(&self) -> Identity {
        self.identity
    }

    pub fn user_id(&self) -> UserId {
        self.identity.user_id
    }
}

fn auth_state(parts: &Parts) -> Result<&AuthState, ApiError> {
    parts
        .extensions
        .get::<AuthState>()
        .ok_or_else(|| ApiError::from(CoreError::unavailable("authentication layer not wired")))
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for IdentityContext {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = verify_request(auth_state(parts)?, &parts.headers)?;
        Ok(Self { identity })
    }
}

#[async_trait]
impl<S: Send + Sync> FromRequestParts<S> for AdminContext {
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = verify_request(auth_state(parts)?, &parts.headers)?;
        if !policy::can_moderate(&identity) {
            return Err(ApiError::from(CoreError::Forbidden));
        }
        Ok(Self { identity })
    }
}
