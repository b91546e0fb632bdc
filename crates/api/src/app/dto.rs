use serde::Deserialize;
use serde_json::{Value, json};

use quill_domain::{Category, Comment, Post, User};

// -------------------------
// Query DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct PostListQuery {
    #[serde(rename = "pageNumber")]
    pub page_number: Option<usize>,
    pub category: Option<String>,
}

// -------------------------
// JSON mapping helpers
// -------------------------

/// Public projection of an account. The password hash never leaves the
/// process.
pub fn user_to_json(user: &User) -> Value {
    json!({
        "id": user.id,
        "username": user.username,
        "email": user.email,
        "bio": user.bio,
        "profilePhoto": user.profile_photo,
        "isAdmin": user.is_admin,
        "isAccountVerified": user.is_account_verified,
        "createdAt": user.created_at,
        "updatedAt": user.updated_at,
    })
}

pub fn post_to_json(post: &Post) -> Value {
    json!({
        "id": post.id,
        "title": post.title,
        "description": post.description,
        "category": post.category,
        "user": post.author,
        "image": post.image,
        "likes": post.likes,
        "createdAt": post.created_at,
        "updatedAt": post.updated_at,
    })
}

pub fn comment_to_json(comment: &Comment) -> Value {
    json!({
        "id": comment.id,
        "postId": comment.post_id,
        "user": comment.author,
        "username": comment.username,
        "text": comment.text,
        "createdAt": comment.created_at,
        "updatedAt": comment.updated_at,
    })
}

pub fn category_to_json(category: &Category) -> Value {
    json!({
        "id": category.id,
        "user": category.author,
        "title": category.title,
        "createdAt": category.created_at,
    })
}
