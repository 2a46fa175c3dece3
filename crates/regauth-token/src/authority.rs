//! Token issuance.

use crate::acl::AccessList;
use crate::category::{LifetimePolicy, TokenCategory};
use crate::claims::{AccessClaims, OAuthPayload, PlatformClaims, RefreshClaims, StandardClaims};
use crate::error::TokenError;
use crate::signer::{Hs256Signer, SigningSecret, TokenSigner};
use chrono::{DateTime, Utc};
use regauth_core::{AuthorityConfig, User};
use serde::Serialize;
use std::sync::Arc;

/// Subject of anonymous pull tokens.
pub const PUBLIC_PULL_SUBJECT: &str = "public_pull_user";

/// Access and refresh token issued together after an OAuth exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Builds, times and signs registry tokens.
///
/// Every issued token is both issued by and intended for `endpoint`. The
/// authority holds no mutable state and can be shared freely.
pub struct TokenAuthority {
    endpoint: String,
    lifetimes: LifetimePolicy,
    signer: Arc<dyn TokenSigner>,
}

impl TokenAuthority {
    /// Create an authority signing with `secret` and default lifetimes.
    pub fn new(endpoint: impl Into<String>, secret: &SigningSecret) -> Self {
        Self::with_signer(
            endpoint,
            LifetimePolicy::default(),
            Arc::new(Hs256Signer::new(secret)),
        )
    }

    /// Create an authority with a custom signer.
    pub fn with_signer(
        endpoint: impl Into<String>,
        lifetimes: LifetimePolicy,
        signer: Arc<dyn TokenSigner>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            lifetimes,
            signer,
        }
    }

    /// Build an authority from configuration.
    pub fn from_config(cfg: &AuthorityConfig) -> Result<Self, TokenError> {
        let secret = SigningSecret::from_config(&cfg.signing)?;
        let lifetimes = LifetimePolicy::from_config(&cfg.lifetimes)?;
        Ok(Self::new(cfg.endpoint.clone(), &secret).with_lifetimes(lifetimes))
    }

    pub fn with_lifetimes(mut self, lifetimes: LifetimePolicy) -> Self {
        self.lifetimes = lifetimes;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn lifetimes(&self) -> &LifetimePolicy {
        &self.lifetimes
    }

    // -----------------------------
    // Claim construction
    // -----------------------------

    /// Expiry of a `category` token issued at `now`.
    pub fn expiry(
        &self,
        category: TokenCategory,
        now: DateTime<Utc>,
    ) -> Result<DateTime<Utc>, TokenError> {
        now.checked_add_signed(self.lifetimes.lifetime(category))
            .ok_or_else(|| TokenError::ExpiryOutOfRange {
                category: category.to_string(),
            })
    }

    /// Access-shaped claims for `subject`, expiring per `category`.
    pub fn access_claims(
        &self,
        subject: &str,
        category: TokenCategory,
        access: AccessList,
        now: DateTime<Utc>,
    ) -> Result<AccessClaims, TokenError> {
        let expires_at = self.expiry(category, now)?;
        Ok(AccessClaims {
            standard: StandardClaims::new(&self.endpoint, subject, now, expires_at),
            category,
            access,
        })
    }

    /// Anonymous `*/*` pull-only claims.
    pub fn public_pull_claims(&self, now: DateTime<Utc>) -> Result<AccessClaims, TokenError> {
        self.access_claims(
            PUBLIC_PULL_SUBJECT,
            TokenCategory::PublicPull,
            AccessList::public_pull(),
            now,
        )
    }

    pub fn refresh_claims(
        &self,
        user_id: &str,
        now: DateTime<Utc>,
    ) -> Result<RefreshClaims, TokenError> {
        let expires_at = self.expiry(TokenCategory::Refresh, now)?;
        Ok(RefreshClaims {
            user_id: user_id.to_string(),
            standard: StandardClaims::new(&self.endpoint, user_id, now, expires_at),
        })
    }

    pub fn platform_claims(
        &self,
        user_id: &str,
        payload: OAuthPayload,
        now: DateTime<Utc>,
    ) -> Result<PlatformClaims, TokenError> {
        let expires_at = self.expiry(TokenCategory::OAuthPlatform, now)?;
        Ok(PlatformClaims {
            oauth: Some(payload),
            standard: StandardClaims::new(&self.endpoint, user_id, now, expires_at),
            category: TokenCategory::OAuthPlatform,
        })
    }

    /// Namespace-wide claims expiring at an explicit instant.
    pub fn full_access_claims(
        &self,
        user: &User,
        expires_at: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<AccessClaims, TokenError> {
        if expires_at.timestamp() <= now.timestamp() {
            return Err(TokenError::InvalidExpiry {
                issued_at: now.timestamp(),
                expires_at: expires_at.timestamp(),
            });
        }

        Ok(AccessClaims {
            standard: StandardClaims::new(&self.endpoint, &user.id, now, expires_at),
            category: TokenCategory::Access,
            access: AccessList::namespace(&user.username),
        })
    }

    /// Encode and sign any claim set.
    pub fn sign_claims<C: Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        let value = serde_json::to_value(claims)?;
        self.signer.sign(&value)
    }

    // -----------------------------
    // Issuance
    // -----------------------------

    /// Issue a token granting `access` to `subject`.
    pub fn issue_access_token(
        &self,
        subject: &str,
        category: TokenCategory,
        access: AccessList,
    ) -> Result<String, TokenError> {
        if access.is_empty() {
            return Err(TokenError::EmptyAccessList);
        }
        let claims = self.access_claims(subject, category, access, Utc::now())?;
        self.sign_access(&claims)
    }

    /// Issue the registry's anonymous pull credential.
    pub fn issue_public_pull_token(&self) -> Result<String, TokenError> {
        let claims = self.public_pull_claims(Utc::now())?;
        self.sign_access(&claims)
    }

    /// Issue a service token for `user`'s namespace.
    pub fn issue_service_token(&self, user: &User) -> Result<String, TokenError> {
        self.issue_access_token(
            &user.id,
            TokenCategory::Service,
            AccessList::namespace(&user.username),
        )
    }

    /// Issue a namespace token of the caller's chosen category.
    pub fn issue_web_login_token(
        &self,
        user_id: &str,
        username: &str,
        category: TokenCategory,
    ) -> Result<String, TokenError> {
        self.issue_access_token(user_id, category, AccessList::namespace(username))
    }

    /// Issue an access/refresh pair after an upstream OAuth exchange.
    ///
    /// Either both tokens are returned or neither is.
    pub fn issue_platform_token_pair(
        &self,
        user_id: &str,
        payload: OAuthPayload,
    ) -> Result<TokenPair, TokenError> {
        let now = Utc::now();
        let access = self.platform_claims(user_id, payload, now)?;
        let refresh = self.refresh_claims(user_id, now)?;

        let pair = self
            .sign_claims(&access)
            .map_err(|e| TokenError::AccessTokenSign(Box::new(e)))
            .and_then(|access_token| {
                let refresh_token = self
                    .sign_claims(&refresh)
                    .map_err(|e| TokenError::RefreshTokenSign(Box::new(e)))?;
                Ok(TokenPair {
                    access_token,
                    refresh_token,
                })
            })
            .inspect_err(|e| {
                tracing::warn!(
                    subject = %user_id,
                    code = e.pair_code().unwrap_or_default(),
                    error = %e,
                    "Platform token pair not issued"
                );
            })?;

        tracing::debug!(
            subject = %user_id,
            expires_at = access.standard.expires_at,
            "Issued platform token pair"
        );

        Ok(pair)
    }

    /// Issue a namespace token that expires at `expires_at` rather than
    /// after a category lifetime.
    pub fn issue_full_access_token(
        &self,
        user: &User,
        expires_at: DateTime<Utc>,
    ) -> Result<String, TokenError> {
        let claims = self.full_access_claims(user, expires_at, Utc::now())?;
        self.sign_access(&claims)
    }

    fn sign_access(&self, claims: &AccessClaims) -> Result<String, TokenError> {
        let token = self.sign_claims(claims)?;
        tracing::debug!(
            subject = %claims.standard.subject,
            category = %claims.category,
            expires_at = claims.standard.expires_at,
            lifetime_secs = claims.standard.lifetime_secs(),
            "Issued token"
        );
        Ok(token)
    }
}
