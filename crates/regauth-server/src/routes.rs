//! HTTP routes.

use crate::error::AuthError;
use crate::request_log::RequestLog;
use crate::signin::TokenResponse;
use crate::state::AppState;
use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    routing::{get, post},
};
use chrono::Utc;
use serde_json::json;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/signin", post(signin))
        .route("/token/public-pull", get(public_pull_token))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn signin(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<TokenResponse>, AuthError> {
    state.signin.sign_in(&body).await.map(Json)
}

/// Anonymous pull credential. No authentication.
async fn public_pull_token(
    State(state): State<Arc<AppState>>,
) -> Result<Json<TokenResponse>, AuthError> {
    let mut log = RequestLog::begin("public_pull_token");

    let issued = state
        .authority
        .public_pull_claims(Utc::now())
        .and_then(|claims| {
            let token = state.authority.sign_claims(&claims)?;
            Ok((claims, token))
        });
    let (claims, token) = issued.map_err(|e| {
        let err = AuthError::Internal(e.to_string());
        log.error(err.status_code().as_u16(), &err);
        err
    })?;
    log.status(200);

    Ok(Json(TokenResponse {
        token,
        expires_in: claims.standard.expires_at,
        issued_at: Utc::now().timestamp(),
    }))
}

async fn healthz() -> Json<serde_json::Value> {
    Json(json!({ "ok": true, "service": "regauth" }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::password::Argon2Verifier;
    use crate::store::MemoryUserStore;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use regauth_token::{AccessList, SigningSecret, TokenAuthority, TokenVerifier};
    use tower::ServiceExt;

    const ENDPOINT: &str = "https://registry.example.com";

    fn app() -> Router {
        let secret = SigningSecret::new("routes-test-secret").unwrap();
        let state = AppState::new(
            Arc::new(TokenAuthority::new(ENDPOINT, &secret)),
            Arc::new(MemoryUserStore::new()),
            Arc::new(Argon2Verifier::new()),
        );
        router(Arc::new(state))
    }

    #[tokio::test]
    async fn test_healthz() {
        let response = app()
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_public_pull_token_endpoint() {
        let response = app()
            .oneshot(
                Request::builder()
                    .uri("/token/public-pull")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: TokenResponse = serde_json::from_slice(&body).unwrap();

        let secret = SigningSecret::new("routes-test-secret").unwrap();
        let claims = TokenVerifier::new(ENDPOINT, &secret)
            .verify_access(&parsed.token)
            .unwrap();
        assert_eq!(claims.access, AccessList::public_pull());
        assert_eq!(claims.standard.expires_at, parsed.expires_in);
    }

    #[tokio::test]
    async fn test_signin_rejects_get() {
        let response = app()
            .oneshot(Request::builder().uri("/signin").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
    }
}
