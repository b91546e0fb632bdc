//! `quill-auth` — credential verification and authorization policy.
//!
//! This crate is intentionally decoupled from HTTP and storage: it verifies
//! bearer tokens into an [`Identity`] and answers pure policy questions about
//! what that identity may do. Attaching identities to requests and loading
//! resources is the API layer's job.

pub mod claims;
pub mod identity;
pub mod policy;
pub mod token;

pub use claims::{TokenClaims, TokenValidationError, validate_claims};
pub use identity::Identity;
pub use policy::{can_act_as, can_delete, can_edit, can_moderate, is_owner};
pub use token::{Hs256TokenCodec, TokenError, TokenSigner, TokenVerifier};
