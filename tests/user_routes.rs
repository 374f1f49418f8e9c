use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use chrono::{FixedOffset, TimeZone};
use sea_orm::{DatabaseBackend, MockDatabase};
use serde_json::json;
use tower::ServiceExt; // for `oneshot`
use uuid::Uuid;

use clipstream::{
    auth::jwt::{JwtKeys, encode_token, make_access_claims},
    db::entities::{account, subscription, watch_entry},
    routes::API_PREFIX,
    test_helpers::{mock_router, test_auth_config, test_router},
};

fn api_path(path: &str) -> String {
    format!("{API_PREFIX}{path}")
}

fn ts() -> chrono::DateTime<chrono::FixedOffset> {
    FixedOffset::east_opt(0)
        .expect("offset should be valid")
        .with_ymd_and_hms(2026, 1, 1, 0, 0, 0)
        .single()
        .expect("timestamp should be valid")
}

fn account_model(id: Uuid, handle: &str, password_hash: &str) -> account::Model {
    let now = ts();
    account::Model {
        id,
        created_at: now,
        updated_at: now,
        handle: handle.to_string(),
        email: format!("{handle}@example.com"),
        full_name: "Alice Doe".to_string(),
        password_hash: password_hash.to_string(),
        avatar_url: "https://media.example.com/avatar.png".to_string(),
        cover_image_url: None,
        refresh_token: None,
    }
}

fn access_token(account: &account::Model) -> String {
    let keys = JwtKeys::from_secret(test_auth_config().access_token_secret.as_bytes());
    let claims = make_access_claims(account, 900);
    encode_token(&keys, &claims).expect("token should encode")
}

async fn response_json(res: axum::response::Response) -> serde_json::Value {
    let bytes = body::to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("body should read");
    serde_json::from_slice(&bytes).expect("body should be json")
}

fn multipart_body(boundary: &str, fields: &[(&str, &str)]) -> String {
    let mut body = String::new();
    for (name, value) in fields {
        body.push_str(&format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
        ));
    }
    body.push_str(&format!("--{boundary}--\r\n"));
    body
}

#[tokio::test]
async fn current_user_without_token_is_rejected() {
    let app = mock_router();

    let res = app
        .oneshot(
            Request::builder()
                .uri(api_path("/current-user"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let json = response_json(res).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["statusCode"], 401);
}

#[tokio::test]
async fn login_without_identifier_is_rejected() {
    let app = mock_router();

    let payload = json!({"password": "password123"});
    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(api_path("/login"))
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = response_json(res).await;
    assert_eq!(json["message"], "Email or handle is required");
}

#[tokio::test]
async fn login_sets_cookies_and_returns_sanitized_user() {
    let id = Uuid::new_v4();
    let hash =
        clipstream::auth::password::hash_password("password123").expect("hash should succeed");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[account_model(id, "alice", &hash)]])
        .append_query_results([[account_model(id, "alice", &hash)]])
        .append_query_results([[account_model(id, "alice", &hash)]])
        .into_connection();
    let app = test_router(db);

    let payload = json!({"handle": "alice", "password": "password123"});
    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(api_path("/login"))
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);

    let cookies: Vec<String> = res
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect();
    assert!(
        cookies
            .iter()
            .any(|c| c.starts_with("accessToken=") && c.contains("HttpOnly") && c.contains("Secure"))
    );
    assert!(cookies.iter().any(|c| c.starts_with("refreshToken=")));

    let json = response_json(res).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["user"]["handle"], "alice");
    assert!(json["data"]["accessToken"].as_str().is_some());
    let user = json["data"]["user"].as_object().unwrap();
    assert!(!user.keys().any(|key| key.to_lowercase().contains("password")));
    assert!(!user.keys().any(|key| key.to_lowercase().contains("refresh")));
}

#[tokio::test]
async fn login_with_wrong_password_is_unauthorized() {
    let hash =
        clipstream::auth::password::hash_password("correct-password").expect("hash should succeed");
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[account_model(Uuid::new_v4(), "alice", &hash)]])
        .into_connection();
    let app = test_router(db);

    let payload = json!({"email": "alice@example.com", "password": "wrong-password"});
    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(api_path("/login"))
                .header("content-type", "application/json")
                .body(Body::from(payload.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn refresh_without_token_is_rejected() {
    let app = mock_router();

    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(api_path("/refresh-token"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let json = response_json(res).await;
    assert_eq!(json["message"], "Refresh token missing");
}

#[tokio::test]
async fn refresh_with_garbage_cookie_is_rejected() {
    let app = mock_router();

    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(api_path("/refresh-token"))
                .header("cookie", "refreshToken=not-a-jwt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn current_user_with_bearer_token_succeeds() {
    let id = Uuid::new_v4();
    let account = account_model(id, "alice", "hash");
    let token = access_token(&account);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[account]])
        .into_connection();
    let app = test_router(db);

    let res = app
        .oneshot(
            Request::builder()
                .uri(api_path("/current-user"))
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let json = response_json(res).await;
    assert_eq!(json["data"]["handle"], "alice");
}

#[tokio::test]
async fn current_user_accepts_the_access_cookie() {
    let id = Uuid::new_v4();
    let account = account_model(id, "alice", "hash");
    let token = access_token(&account);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[account]])
        .into_connection();
    let app = test_router(db);

    let res = app
        .oneshot(
            Request::builder()
                .uri(api_path("/current-user"))
                .header("cookie", format!("accessToken={token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn logout_clears_session_cookies() {
    let id = Uuid::new_v4();
    let account = account_model(id, "alice", "hash");
    let token = access_token(&account);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[account_model(id, "alice", "hash")]])
        .append_query_results([[account_model(id, "alice", "hash")]])
        .into_connection();
    let app = test_router(db);

    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(api_path("/logout"))
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let cookies: Vec<String> = res
        .headers()
        .get_all("set-cookie")
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect();
    assert!(cookies.iter().any(|c| c.starts_with("accessToken=")));
    assert!(cookies.iter().any(|c| c.starts_with("refreshToken=")));
}

#[tokio::test]
async fn register_with_blank_fields_is_rejected() {
    let app = mock_router();

    let boundary = "test-boundary";
    let body = multipart_body(
        boundary,
        &[
            ("handle", "alice"),
            ("email", ""),
            ("fullName", "Alice Doe"),
            ("password", "password123"),
        ],
    );
    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(api_path("/register"))
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = response_json(res).await;
    assert_eq!(json["message"], "All fields are required");
}

#[tokio::test]
async fn register_without_avatar_is_rejected() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<account::Model>::new()])
        .into_connection();
    let app = test_router(db);

    let boundary = "test-boundary";
    let body = multipart_body(
        boundary,
        &[
            ("handle", "alice"),
            ("email", "alice@example.com"),
            ("fullName", "Alice Doe"),
            ("password", "password123"),
        ],
    );
    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(api_path("/register"))
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = response_json(res).await;
    assert_eq!(json["message"], "Avatar file is required");
}

#[tokio::test]
async fn register_with_taken_handle_conflicts() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[account_model(Uuid::new_v4(), "alice", "hash")]])
        .into_connection();
    let app = test_router(db);

    let boundary = "test-boundary";
    let body = multipart_body(
        boundary,
        &[
            ("handle", "alice"),
            ("email", "alice@example.com"),
            ("fullName", "Alice Doe"),
            ("password", "password123"),
        ],
    );
    let res = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(api_path("/register"))
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let json = response_json(res).await;
    assert_eq!(json["message"], "Account already exists");
}

#[tokio::test]
async fn channel_profile_reports_counts_and_membership() {
    let viewer_id = Uuid::new_v4();
    let channel_id = Uuid::new_v4();
    let viewer = account_model(viewer_id, "viewer", "hash");
    let token = access_token(&viewer);

    let now = ts();
    let edge = |subscriber_id: Uuid| subscription::Model {
        id: Uuid::new_v4(),
        created_at: now,
        updated_at: now,
        subscriber_id,
        channel_id,
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([[account_model(channel_id, "bob", "hash")]])
        .append_query_results([vec![edge(viewer_id), edge(Uuid::new_v4())]])
        .append_query_results([Vec::<subscription::Model>::new()])
        .into_connection();
    let app = test_router(db);

    let res = app
        .oneshot(
            Request::builder()
                .uri(api_path("/channel/bob"))
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let json = response_json(res).await;
    assert_eq!(json["data"]["subscriberCount"], 2);
    assert_eq!(json["data"]["subscribedToCount"], 0);
    assert_eq!(json["data"]["isSubscribed"], true);
    assert!(json["data"].get("passwordHash").is_none());
}

#[tokio::test]
async fn channel_profile_for_unknown_handle_is_not_found() {
    let viewer = account_model(Uuid::new_v4(), "viewer", "hash");
    let token = access_token(&viewer);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<account::Model>::new()])
        .into_connection();
    let app = test_router(db);

    let res = app
        .oneshot(
            Request::builder()
                .uri(api_path("/channel/ghost"))
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_watch_history_returns_empty_list() {
    let viewer = account_model(Uuid::new_v4(), "viewer", "hash");
    let token = access_token(&viewer);
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<watch_entry::Model>::new()])
        .into_connection();
    let app = test_router(db);

    let res = app
        .oneshot(
            Request::builder()
                .uri(api_path("/history"))
                .header("authorization", format!("Bearer {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
    let json = response_json(res).await;
    assert_eq!(json["data"], json!([]));
}

#[tokio::test]
async fn unknown_routes_render_the_json_envelope() {
    let app = mock_router();

    let res = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/users/definitely-not-a-route")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let json = response_json(res).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["statusCode"], 404);
}
