//! End-to-end tests for `POST /signin` over the in-process router.
//!
//! Uses the real Argon2 verifier and an in-memory SQLite user store.
//!
//! Run with:
//!   cargo test -p regauth-server --test signin_http

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use regauth_core::User;
use regauth_server::password::Argon2Verifier;
use regauth_server::store::{SqliteUserStore, UserStore};
use regauth_server::{AppState, TokenResponse, routes};
use regauth_token::{AccessList, SigningSecret, TokenAuthority, TokenCategory, TokenVerifier};
use serde_json::{Value, json};
use std::sync::{Arc, OnceLock};
use tower::ServiceExt;

const ENDPOINT: &str = "https://registry.example.com";
const SECRET: &str = "integration-test-secret";
const PASSWORD: &str = "hunter2-but-longer";
const FOURTEEN_DAYS: i64 = 14 * 24 * 3600;

// Argon2 is slow in debug builds; hash once for the whole file.
fn password_hash() -> &'static str {
    static HASH: OnceLock<String> = OnceLock::new();
    HASH.get_or_init(|| Argon2Verifier::hash(PASSWORD).unwrap())
}

async fn app() -> Router {
    let store = SqliteUserStore::in_memory().await.unwrap();
    let alice = User {
        id: "7d1c4a8e".to_string(),
        username: "alice".to_string(),
        email: "alice@example.com".to_string(),
        password: password_hash().to_string(),
    };
    let record = serde_json::to_vec(&alice).unwrap();
    for key in alice.store_keys() {
        store.put(key.as_bytes(), &record).await.unwrap();
    }

    let secret = SigningSecret::new(SECRET).unwrap();
    let state = AppState::new(
        Arc::new(TokenAuthority::new(ENDPOINT, &secret)),
        Arc::new(store),
        Arc::new(Argon2Verifier::new()),
    );
    routes::router(Arc::new(state))
}

async fn post_signin(app: Router, body: impl Into<Body>) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/signin")
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.into())
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

async fn post_json(value: Value) -> (StatusCode, Vec<u8>) {
    post_signin(app().await, value.to_string()).await
}

fn error_message(body: &[u8]) -> String {
    let value: Value = serde_json::from_slice(body).unwrap();
    value["error"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn empty_identifiers_are_bad_requests() {
    for password in ["", PASSWORD] {
        let (status, body) =
            post_json(json!({"email": "", "username": "", "password": password})).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(error_message(&body).contains("email and username cannot be empty"));
    }
}

#[tokio::test]
async fn empty_password_is_a_bad_request() {
    for creds in [
        json!({"email": "alice@example.com", "password": ""}),
        json!({"username": "alice"}),
    ] {
        let (status, body) = post_json(creds).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(error_message(&body), "password cannot be empty");
    }
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let (status, body) = post_signin(app().await, "{\"email\": ").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(!error_message(&body).is_empty());
}

#[tokio::test]
async fn malformed_email_is_a_bad_request() {
    let (status, body) = post_json(json!({"email": "alice.example.com", "password": PASSWORD})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error_message(&body), "invalid email format");
}

#[tokio::test]
async fn unknown_email_is_a_bad_request() {
    let (status, _) = post_json(json!({"email": "bob@example.com", "password": PASSWORD})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let (status, body) = post_json(json!({"username": "alice", "password": "nope"})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let message: String = serde_json::from_slice(&body).unwrap();
    assert_eq!(message, "invalid password");
}

#[tokio::test]
async fn correct_credentials_issue_a_fourteen_day_token() {
    let (status, body) = post_json(json!({"email": "alice@example.com", "password": PASSWORD})).await;
    assert_eq!(status, StatusCode::OK);

    let response: TokenResponse = serde_json::from_slice(&body).unwrap();
    assert!(!response.token.is_empty());
    assert!((response.expires_in - response.issued_at - FOURTEEN_DAYS).abs() <= 5);

    let secret = SigningSecret::new(SECRET).unwrap();
    let claims = TokenVerifier::new(ENDPOINT, &secret)
        .verify_access(&response.token)
        .unwrap();
    assert_eq!(claims.standard.subject, "7d1c4a8e");
    assert_eq!(claims.standard.issuer, ENDPOINT);
    assert_eq!(claims.standard.audience, ENDPOINT);
    assert_eq!(claims.standard.expires_at, response.expires_in);
    assert_eq!(claims.category, TokenCategory::Access);
    assert_eq!(claims.access, AccessList::namespace("alice"));
}

#[tokio::test]
async fn username_sign_in_works_too() {
    let (status, body) = post_json(json!({"username": "alice", "password": PASSWORD})).await;
    assert_eq!(status, StatusCode::OK);

    let response: TokenResponse = serde_json::from_slice(&body).unwrap();
    assert!(!response.token.is_empty());
}

#[tokio::test]
async fn null_email_falls_back_to_username() {
    let (status, body) =
        post_json(json!({"email": null, "username": "alice", "password": PASSWORD})).await;
    assert_eq!(status, StatusCode::OK);

    let response: TokenResponse = serde_json::from_slice(&body).unwrap();
    assert!(!response.token.is_empty());
}
