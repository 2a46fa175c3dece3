//! Password sign-in.
//!
//! Checks an email or username plus password against the user store and,
//! on success, issues a namespace-wide token that lives for 14 days.

use crate::error::AuthError;
use crate::password::CredentialVerifier;
use crate::request_log::RequestLog;
use crate::store::{StoreError, UserStore};
use chrono::{Duration, Utc};
use regauth_core::{User, user_key};
use regauth_token::TokenAuthority;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::sync::{Arc, LazyLock};

/// Lifetime of tokens issued by a successful sign-in.
pub const SESSION_LIFETIME_DAYS: i64 = 14;

const MAX_EMAIL_LEN: usize = 254;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s.]+$").expect("email pattern is valid")
});

/// Submitted credentials. Missing and `null` fields decode as empty.
#[derive(Default, Deserialize)]
pub struct Credentials {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub email: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub username: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub password: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

/// Body of a successful token response.
///
/// `expires_in` is the absolute expiry (seconds since the epoch) and
/// `issued_at` is when the response was produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    pub expires_in: i64,
    pub issued_at: i64,
}

/// Reject addresses that are not shaped like `local@domain.tld`.
pub fn validate_email(email: &str) -> Result<(), AuthError> {
    if email.len() > MAX_EMAIL_LEN || !EMAIL_PATTERN.is_match(email) {
        return Err(AuthError::BadRequest("invalid email format".to_string()));
    }
    Ok(())
}

/// Verifies credentials and issues full-access tokens.
#[derive(Clone)]
pub struct SignInFlow {
    store: Arc<dyn UserStore>,
    verifier: Arc<dyn CredentialVerifier>,
    authority: Arc<TokenAuthority>,
}

impl SignInFlow {
    pub fn new(
        store: Arc<dyn UserStore>,
        verifier: Arc<dyn CredentialVerifier>,
        authority: Arc<TokenAuthority>,
    ) -> Self {
        Self {
            store,
            verifier,
            authority,
        }
    }

    /// Run a sign-in for a raw JSON request body.
    pub async fn sign_in(&self, body: &[u8]) -> Result<TokenResponse, AuthError> {
        let mut log = RequestLog::begin("signin");
        let outcome = self.run(body).await;
        match &outcome {
            Ok(_) => log.status(200),
            Err(e) => log.error(e.status_code().as_u16(), e),
        }
        outcome
    }

    async fn run(&self, body: &[u8]) -> Result<TokenResponse, AuthError> {
        let creds: Credentials =
            serde_json::from_slice(body).map_err(|e| AuthError::BadRequest(e.to_string()))?;

        let key = lookup_key(&creds)?;
        let user = self.load_user(&key).await?;

        // Password hashing is CPU-bound; keep it off the async workers.
        let verifier = Arc::clone(&self.verifier);
        let stored = user.password.clone();
        let submitted = creds.password;
        let matched = tokio::task::spawn_blocking(move || verifier.verify(&stored, &submitted))
            .await
            .map_err(|e| AuthError::Internal(format!("password check aborted: {e}")))?;
        if !matched {
            return Err(AuthError::Unauthorized);
        }

        let expires_at = Utc::now() + Duration::days(SESSION_LIFETIME_DAYS);
        let token = self
            .authority
            .issue_full_access_token(&user, expires_at)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.id, username = %user.username, "signed in");

        Ok(TokenResponse {
            token,
            expires_in: expires_at.timestamp(),
            issued_at: Utc::now().timestamp(),
        })
    }

    async fn load_user(&self, key: &str) -> Result<User, AuthError> {
        let record = self.store.get(key.as_bytes()).await.map_err(|e| match e {
            StoreError::NotFound => AuthError::BadRequest("user not found".to_string()),
            StoreError::Unavailable(reason) => {
                tracing::error!(error = %reason, "user store lookup failed");
                AuthError::StoreUnavailable("user store unavailable".to_string())
            }
        })?;

        serde_json::from_slice(&record).map_err(|e| {
            tracing::error!(key, error = %e, "stored user record is malformed");
            AuthError::Internal(e.to_string())
        })
    }
}

/// Validate the credentials and pick the store key to look up.
fn lookup_key(creds: &Credentials) -> Result<String, AuthError> {
    if creds.email.is_empty() && creds.username.is_empty() {
        return Err(AuthError::BadRequest(
            "email and username cannot be empty, please provide at least one of them".to_string(),
        ));
    }

    if creds.password.is_empty() {
        return Err(AuthError::BadRequest("password cannot be empty".to_string()));
    }

    if !creds.email.is_empty() {
        validate_email(&creds.email)?;
        return Ok(user_key(&creds.email));
    }

    Ok(user_key(&creds.username))
}
