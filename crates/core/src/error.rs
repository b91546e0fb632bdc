//! Request-level error model.

use thiserror::Error;

/// Result type used across the request-handling layers.
pub type CoreResult<T> = Result<T, CoreError>;

/// Error taxonomy surfaced to API callers.
///
/// Keep this focused on deterministic request failures; each variant maps to
/// exactly one HTTP status at the edge.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// No usable bearer credential on the request.
    #[error("{0}")]
    Unauthenticated(String),

    /// A credential was presented but failed verification (signature, shape,
    /// expiry).
    #[error("invalid credential: {0}")]
    InvalidCredential(String),

    /// The caller is authenticated but not allowed to perform the action.
    #[error("access denied, forbidden")]
    Forbidden,

    /// A payload failed validation; carries the first violation message.
    #[error("{0}")]
    InvalidInput(String),

    /// The target resource does not exist.
    #[error("{0} not found")]
    NotFound(&'static str),

    /// A collaborator (store, media service) could not complete the call.
    #[error("collaborator unavailable: {0}")]
    CollaboratorUnavailable(String),
}

impl CoreError {
    pub fn unauthenticated(msg: impl Into<String>) -> Self {
        Self::Unauthenticated(msg.into())
    }

    pub fn invalid_credential(msg: impl Into<String>) -> Self {
        Self::InvalidCredential(msg.into())
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn not_found(what: &'static str) -> Self {
        Self::NotFound(what)
    }

    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::CollaboratorUnavailable(msg.into())
    }
}
