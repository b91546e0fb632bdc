use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use quill_core::UserId;

use crate::MediaAsset;

/// A user account record.
///
/// # Invariants
/// - `password_hash` is an Argon2id PHC string; it never appears in API
///   responses (the API layer builds public projections explicitly).
/// - `is_admin` is only ever set out-of-band; no route can grant it.
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub bio: Option<String>,
    pub profile_photo: MediaAsset,
    pub is_admin: bool,
    pub is_account_verified: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// A fresh, unprivileged account.
    pub fn new(username: String, email: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: UserId::new(),
            username,
            email,
            password_hash,
            bio: None,
            profile_photo: MediaAsset::default_avatar(),
            is_admin: false,
            is_account_verified: false,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterUser {
    #[validate(length(min = 2, max = 30, message = "username must be 2-30 characters"))]
    pub username: String,

    #[validate(
        email(message = "email must be valid"),
        length(min = 5, max = 100, message = "email must be 5-100 characters")
    )]
    pub email: String,

    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginUser {
    #[validate(
        email(message = "email must be valid"),
        length(min = 5, max = 100, message = "email must be 5-100 characters")
    )]
    pub email: String,

    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
}

/// Profile update payload; every field optional, absent fields untouched.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfile {
    #[validate(length(min = 2, max = 30, message = "username must be 2-30 characters"))]
    pub username: Option<String>,

    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: Option<String>,

    #[validate(length(min = 20, max = 100, message = "bio must be 20-100 characters"))]
    pub bio: Option<String>,
}
