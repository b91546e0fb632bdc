use quill_core::UserId;

use crate::TokenClaims;

/// The authenticated caller, derived from a verified credential.
///
/// Built once per request and never persisted; immutable for the lifetime of
/// that request. Everything downstream (policy checks, handlers) receives it
/// as an explicit value.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: UserId,
    pub is_admin: bool,
}

impl Identity {
    pub fn new(user_id: UserId, is_admin: bool) -> Self {
        Self { user_id, is_admin }
    }
}

impl From<&TokenClaims> for Identity {
    fn from(claims: &TokenClaims) -> Self {
        Self {
            user_id: claims.sub,
            is_admin: claims.is_admin,
        }
    }
}
