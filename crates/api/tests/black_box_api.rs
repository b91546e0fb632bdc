use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use quill_auth::TokenClaims;
use quill_core::UserId;
use reqwest::StatusCode;
use serde_json::json;

use quill_api::config::AppConfig;
use quill_infra::MediaConfig;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(jwt_secret: &str) -> Self {
        // Same router as prod, but bound to an ephemeral port.
        let config = AppConfig {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            jwt_secret: jwt_secret.to_string(),
            media: MediaConfig {
                cloud_name: "test".into(),
                api_key: "test".into(),
                api_secret: "test".into(),
            },
        };
        let app = quill_api::app::build_app(config).await;

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_jwt(jwt_secret: &str, sub: UserId, is_admin: bool, ttl: ChronoDuration) -> String {
    let now = Utc::now();
    let claims = TokenClaims {
        sub,
        is_admin,
        issued_at: now - ChronoDuration::seconds(1),
        expires_at: now + ttl,
    };

    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_secret.as_bytes()),
    )
    .expect("failed to encode jwt")
}

/// Register an account and log in; returns (token, user id).
async fn register_and_login(
    client: &reqwest::Client,
    base_url: &str,
    username: &str,
    email: &str,
) -> (String, String) {
    let res = client
        .post(format!("{}/api/auth/register", base_url))
        .json(&json!({
            "username": username,
            "email": email,
            "password": "hunter2hunter2",
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = client
        .post(format!("{}/api/auth/login", base_url))
        .json(&json!({ "email": email, "password": "hunter2hunter2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let body: serde_json::Value = res.json().await.unwrap();
    let token = body["token"].as_str().unwrap().to_string();
    let user_id = body["user"]["id"].as_str().unwrap().to_string();
    (token, user_id)
}

fn post_form(title: &str, description: &str, category: &str) -> reqwest::multipart::Form {
    reqwest::multipart::Form::new()
        .text("title", title.to_string())
        .text("description", description.to_string())
        .text("category", category.to_string())
        .part(
            "image",
            reqwest::multipart::Part::bytes(vec![0xffu8, 0xd8, 0xff]).file_name("cover.jpg"),
        )
}

/// Publish a post and return its id.
async fn create_post(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    title: &str,
    category: &str,
) -> String {
    let res = client
        .post(format!("{}/api/posts", base_url))
        .bearer_auth(token)
        .multipart(post_form(title, "a long enough description", category))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: serde_json::Value = res.json().await.unwrap();
    body["post"]["id"].as_str().unwrap().to_string()
}

async fn create_comment(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    post_id: &str,
    text: &str,
) -> String {
    let res = client
        .post(format!("{}/api/comments", base_url))
        .bearer_auth(token)
        .json(&json!({ "postId": post_id, "text": text }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let body: serde_json::Value = res.json().await.unwrap();
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn anonymous_can_browse_but_not_publish() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/api/posts", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(format!("{}/api/posts", srv.base_url))
        .multipart(post_form("Hello", "a long enough description", "tech"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn register_login_publish_and_read_back() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let (token, user_id) = register_and_login(&client, &srv.base_url, "ada", "ada@example.com").await;
    let post_id = create_post(&client, &srv.base_url, &token, "First Post", "tech").await;

    let res = client
        .get(format!("{}/api/posts/{}", srv.base_url, post_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let post: serde_json::Value = res.json().await.unwrap();
    assert_eq!(post["title"], "First Post");
    assert_eq!(post["user"].as_str().unwrap(), user_id);
    assert!(post["image"]["url"].as_str().unwrap().contains("cover.jpg"));
    assert_eq!(post["comments"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn invalid_input_is_rejected_with_a_message() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth/register", srv.base_url))
        .json(&json!({
            "username": "ada",
            "email": "ada@example.com",
            "password": "short",
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["message"].as_str().unwrap().len() > 0);
}

#[tokio::test]
async fn missing_body_fields_are_rejected_as_invalid_input() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let (token, _) = register_and_login(&client, &srv.base_url, "ada", "ada@example.com").await;

    // A body that deserialization itself rejects must come back through the
    // same 400 JSON shape as a validation failure, not a bare 422.
    let res = client
        .post(format!("{}/api/comments", srv.base_url))
        .bearer_auth(&token)
        .json(&json!({}))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_input");
    assert!(body["message"].as_str().unwrap().contains("postId"));
}

#[tokio::test]
async fn login_does_not_reveal_which_credential_was_wrong() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    register_and_login(&client, &srv.base_url, "ada", "ada@example.com").await;

    let unknown_email = client
        .post(format!("{}/api/auth/login", srv.base_url))
        .json(&json!({ "email": "nobody@example.com", "password": "hunter2hunter2" }))
        .send()
        .await
        .unwrap();
    let wrong_password = client
        .post(format!("{}/api/auth/login", srv.base_url))
        .json(&json!({ "email": "ada@example.com", "password": "wrongwrongwrong" }))
        .send()
        .await
        .unwrap();

    assert_eq!(unknown_email.status(), StatusCode::BAD_REQUEST);
    assert_eq!(wrong_password.status(), StatusCode::BAD_REQUEST);

    let a: serde_json::Value = unknown_email.json().await.unwrap();
    let b: serde_json::Value = wrong_password.json().await.unwrap();
    assert_eq!(a["message"], b["message"]);
}

#[tokio::test]
async fn non_owner_cannot_edit_or_delete_a_post() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let (owner, _) = register_and_login(&client, &srv.base_url, "ada", "ada@example.com").await;
    let (other, _) = register_and_login(&client, &srv.base_url, "bob", "bob@example.com").await;

    let post_id = create_post(&client, &srv.base_url, &owner, "Original Title", "tech").await;

    let res = client
        .put(format!("{}/api/posts/{}", srv.base_url, post_id))
        .bearer_auth(&other)
        .json(&json!({ "title": "Hijacked" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .delete(format!("{}/api/posts/{}", srv.base_url, post_id))
        .bearer_auth(&other)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // The denied requests must not have mutated anything.
    let post: serde_json::Value = client
        .get(format!("{}/api/posts/{}", srv.base_url, post_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(post["title"], "Original Title");
}

#[tokio::test]
async fn deleting_a_post_cascades_only_its_own_comments() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let (owner, _) = register_and_login(&client, &srv.base_url, "ada", "ada@example.com").await;
    let (reader, _) = register_and_login(&client, &srv.base_url, "bob", "bob@example.com").await;

    let doomed = create_post(&client, &srv.base_url, &owner, "Doomed", "tech").await;
    let kept = create_post(&client, &srv.base_url, &owner, "Kept", "tech").await;

    create_comment(&client, &srv.base_url, &reader, &doomed, "gone with the post").await;
    create_comment(&client, &srv.base_url, &reader, &kept, "still here").await;

    let res = client
        .delete(format!("{}/api/posts/{}", srv.base_url, doomed))
        .bearer_auth(&owner)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/api/posts/{}", srv.base_url, doomed))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let kept_post: serde_json::Value = client
        .get(format!("{}/api/posts/{}", srv.base_url, kept))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let comments = kept_post["comments"].as_array().unwrap();
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0]["text"], "still here");
}

#[tokio::test]
async fn liking_twice_takes_the_like_back() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let (owner, _) = register_and_login(&client, &srv.base_url, "ada", "ada@example.com").await;
    let (fan, fan_id) = register_and_login(&client, &srv.base_url, "bob", "bob@example.com").await;

    let post_id = create_post(&client, &srv.base_url, &owner, "Likeable", "tech").await;

    let liked: serde_json::Value = client
        .put(format!("{}/api/posts/like/{}", srv.base_url, post_id))
        .bearer_auth(&fan)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let likes = liked["likes"].as_array().unwrap();
    assert_eq!(likes.len(), 1);
    assert_eq!(likes[0].as_str().unwrap(), fan_id);

    let unliked: serde_json::Value = client
        .put(format!("{}/api/posts/like/{}", srv.base_url, post_id))
        .bearer_auth(&fan)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(unliked["likes"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn posts_are_paginated_and_filterable_by_category() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let (token, _) = register_and_login(&client, &srv.base_url, "ada", "ada@example.com").await;
    for i in 0..4 {
        let category = if i == 0 { "cooking" } else { "tech" };
        create_post(&client, &srv.base_url, &token, &format!("Post {i}"), category).await;
    }

    let page1: serde_json::Value = client
        .get(format!("{}/api/posts?pageNumber=1", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page1.as_array().unwrap().len(), 3);
    // Newest first.
    assert_eq!(page1[0]["title"], "Post 3");

    let page2: serde_json::Value = client
        .get(format!("{}/api/posts?pageNumber=2", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(page2.as_array().unwrap().len(), 1);

    // A page number nobody could reach is an empty page, never an error.
    let res = client
        .get(format!(
            "{}/api/posts?pageNumber={}",
            srv.base_url,
            usize::MAX
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let far: serde_json::Value = res.json().await.unwrap();
    assert_eq!(far.as_array().unwrap().len(), 0);

    let cooking: serde_json::Value = client
        .get(format!("{}/api/posts?category=cooking", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cooking.as_array().unwrap().len(), 1);
    assert_eq!(cooking[0]["title"], "Post 0");

    let count: serde_json::Value = client
        .get(format!("{}/api/posts/count", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(count, json!(4));
}

#[tokio::test]
async fn admin_can_delete_any_post_and_comment_but_not_edit_them() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let (author, _) = register_and_login(&client, &srv.base_url, "ada", "ada@example.com").await;
    let post_id = create_post(&client, &srv.base_url, &author, "Editorial", "tech").await;
    let comment_id =
        create_comment(&client, &srv.base_url, &author, &post_id, "first comment").await;

    let admin = mint_jwt(jwt_secret, UserId::new(), true, ChronoDuration::minutes(10));

    // Deletion is moderation; editing someone else's words is not.
    let res = client
        .put(format!("{}/api/posts/{}", srv.base_url, post_id))
        .bearer_auth(&admin)
        .json(&json!({ "title": "Rewritten" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .delete(format!("{}/api/comments/{}", srv.base_url, comment_id))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .delete(format!("{}/api/posts/{}", srv.base_url, post_id))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/api/posts/{}", srv.base_url, post_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn profile_edits_have_no_moderator_bypass() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let (_, user_id) = register_and_login(&client, &srv.base_url, "ada", "ada@example.com").await;
    let admin = mint_jwt(jwt_secret, UserId::new(), true, ChronoDuration::minutes(10));

    let res = client
        .put(format!("{}/api/users/profile/{}", srv.base_url, user_id))
        .bearer_auth(&admin)
        .json(&json!({ "username": "renamed-by-admin" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn deleting_an_account_cascades_its_posts_and_comments() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let (token, user_id) = register_and_login(&client, &srv.base_url, "ada", "ada@example.com").await;
    let (other, _) = register_and_login(&client, &srv.base_url, "bob", "bob@example.com").await;

    let post_id = create_post(&client, &srv.base_url, &token, "Ephemeral", "tech").await;

    // The doomed account also commented on someone else's post; that comment
    // goes with the account.
    let other_post = create_post(&client, &srv.base_url, &other, "Survivor", "tech").await;
    create_comment(&client, &srv.base_url, &token, &other_post, "from ada").await;

    let res = client
        .delete(format!("{}/api/users/profile/{}", srv.base_url, user_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/api/users/profile/{}", srv.base_url, user_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/api/posts/{}", srv.base_url, post_id))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let survivor: serde_json::Value = client
        .get(format!("{}/api/posts/{}", srv.base_url, other_post))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(survivor["comments"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn user_listing_and_counts_are_admin_only() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let (user, _) = register_and_login(&client, &srv.base_url, "ada", "ada@example.com").await;
    register_and_login(&client, &srv.base_url, "bob", "bob@example.com").await;

    let res = client
        .get(format!("{}/api/users/profile", srv.base_url))
        .bearer_auth(&user)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let admin = mint_jwt(jwt_secret, UserId::new(), true, ChronoDuration::minutes(10));
    let users: serde_json::Value = client
        .get(format!("{}/api/users/profile", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(users.as_array().unwrap().len(), 2);

    let count: serde_json::Value = client
        .get(format!("{}/api/users/profile/count", srv.base_url))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(count, json!(2));
}

#[tokio::test]
async fn category_management_is_admin_only() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let (user, _) = register_and_login(&client, &srv.base_url, "ada", "ada@example.com").await;

    let res = client
        .post(format!("{}/api/categories", srv.base_url))
        .bearer_auth(&user)
        .json(&json!({ "title": "tech" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let admin = mint_jwt(jwt_secret, UserId::new(), true, ChronoDuration::minutes(10));
    let res = client
        .post(format!("{}/api/categories", srv.base_url))
        .bearer_auth(&admin)
        .json(&json!({ "title": "tech" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: serde_json::Value = res.json().await.unwrap();
    let category_id = created["id"].as_str().unwrap().to_string();

    // Anyone can browse the list.
    let listed: serde_json::Value = client
        .get(format!("{}/api/categories", srv.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let res = client
        .delete(format!("{}/api/categories/{}", srv.base_url, category_id))
        .bearer_auth(&admin)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn tampered_and_expired_tokens_are_rejected() {
    let jwt_secret = "test-secret";
    let srv = TestServer::spawn(jwt_secret).await;
    let client = reqwest::Client::new();

    let forged = mint_jwt("other-secret", UserId::new(), true, ChronoDuration::minutes(10));
    let res = client
        .get(format!("{}/api/users/profile", srv.base_url))
        .bearer_auth(&forged)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let expired = mint_jwt(jwt_secret, UserId::new(), true, -ChronoDuration::minutes(10));
    let res = client
        .get(format!("{}/api/users/profile", srv.base_url))
        .bearer_auth(&expired)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = client
        .get(format!("{}/api/users/profile", srv.base_url))
        .header("Authorization", "not-a-bearer-header")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn comment_update_is_author_only_and_hard_stops() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let (author, _) = register_and_login(&client, &srv.base_url, "ada", "ada@example.com").await;
    let (other, _) = register_and_login(&client, &srv.base_url, "bob", "bob@example.com").await;

    let post_id = create_post(&client, &srv.base_url, &author, "Discussed", "tech").await;
    let comment_id =
        create_comment(&client, &srv.base_url, &author, &post_id, "original text").await;

    let res = client
        .put(format!("{}/api/comments/{}", srv.base_url, comment_id))
        .bearer_auth(&other)
        .json(&json!({ "text": "defaced" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // The denied update must not have gone through.
    let post: serde_json::Value = client
        .get(format!("{}/api/posts/{}", srv.base_url, post_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(post["comments"][0]["text"], "original text");

    let res = client
        .put(format!("{}/api/comments/{}", srv.base_url, comment_id))
        .bearer_auth(&author)
        .json(&json!({ "text": "edited by author" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn profile_photo_upload_replaces_the_default() {
    let srv = TestServer::spawn("test-secret").await;
    let client = reqwest::Client::new();

    let (token, user_id) = register_and_login(&client, &srv.base_url, "ada", "ada@example.com").await;

    let form = reqwest::multipart::Form::new().part(
        "image",
        reqwest::multipart::Part::bytes(vec![1u8, 2, 3]).file_name("me.png"),
    );
    let res = client
        .post(format!(
            "{}/api/users/profile/profile-photo-upload",
            srv.base_url
        ))
        .bearer_auth(&token)
        .multipart(form)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);

    let profile: serde_json::Value = client
        .get(format!("{}/api/users/profile/{}", srv.base_url, user_id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let photo = &profile["user"]["profilePhoto"];
    assert!(photo["url"].as_str().unwrap().contains("me.png"));
    assert!(photo["publicId"].as_str().is_some());
}
