//! Claim sets for each token category.
//!
//! Every token carries the registered JWT claims in [`StandardClaims`];
//! the category-specific claim types flatten them in next to their own
//! fields. Older tokens spelled `type`, `access` and `id` with a leading
//! capital, so those spellings are still accepted on decode.

use crate::acl::AccessList;
use crate::category::TokenCategory;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Registered claims shared by every token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardClaims {
    #[serde(rename = "iss")]
    pub issuer: String,

    #[serde(rename = "aud")]
    pub audience: String,

    #[serde(rename = "sub")]
    pub subject: String,

    #[serde(rename = "jti")]
    pub token_id: String,

    /// Seconds since the epoch.
    #[serde(rename = "iat")]
    pub issued_at: i64,

    /// Always equal to `issued_at`.
    #[serde(rename = "nbf")]
    pub not_before: i64,

    #[serde(rename = "exp")]
    pub expires_at: i64,
}

impl StandardClaims {
    /// Claims issued by and for `endpoint`, valid from `issued_at` until
    /// `expires_at`. The subject doubles as the token id.
    pub fn new(
        endpoint: &str,
        subject: &str,
        issued_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    ) -> Self {
        Self {
            issuer: endpoint.to_string(),
            audience: endpoint.to_string(),
            subject: subject.to_string(),
            token_id: subject.to_string(),
            issued_at: issued_at.timestamp(),
            not_before: issued_at.timestamp(),
            expires_at: expires_at.timestamp(),
        }
    }

    /// Seconds between issuance and expiry.
    pub fn lifetime_secs(&self) -> i64 {
        self.expires_at - self.issued_at
    }
}

/// Claims of every token that grants registry access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    #[serde(flatten)]
    pub standard: StandardClaims,

    #[serde(rename = "type", alias = "Type", default)]
    pub category: TokenCategory,

    /// Required on decode.
    #[serde(alias = "Access")]
    pub access: AccessList,
}

/// Claims of a refresh token: the subject id and nothing else.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RefreshClaims {
    #[serde(rename = "id", alias = "ID")]
    pub user_id: String,

    #[serde(flatten)]
    pub standard: StandardClaims,
}

/// Claims of a platform token minted after an upstream OAuth exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformClaims {
    /// Upstream payload, kept for later calls to the provider's API.
    #[serde(rename = "oauth2_token", default, skip_serializing_if = "Option::is_none")]
    pub oauth: Option<OAuthPayload>,

    #[serde(flatten)]
    pub standard: StandardClaims,

    #[serde(rename = "type", alias = "Type", default)]
    pub category: TokenCategory,
}

/// Token returned by an upstream OAuth provider.
///
/// The authority never interprets it. Fields it does not model are kept in
/// `extra` so the payload survives a round trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OAuthPayload {
    pub access_token: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiry: Option<DateTime<Utc>>,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl OAuthPayload {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type: String::new(),
            refresh_token: None,
            expiry: None,
            extra: serde_json::Map::new(),
        }
    }
}
