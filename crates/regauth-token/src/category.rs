//! Token categories and the lifetime assigned to each.

use crate::error::TokenError;
use chrono::Duration;
use regauth_core::LifetimeConfig;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The purpose of a token, which decides its lifetime.
///
/// Carried in the claim's `type` field. Strings that name no known
/// category decode to [`TokenCategory::Unspecified`], which gets the
/// shortest lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TokenCategory {
    Access,
    Refresh,
    Service,
    ShortLived,
    PublicPull,
    OAuthPlatform,
    #[default]
    Unspecified,
}

impl TokenCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenCategory::Access => "access",
            TokenCategory::Refresh => "refresh",
            TokenCategory::Service => "service",
            TokenCategory::ShortLived => "short-lived",
            TokenCategory::PublicPull => "public-pull",
            TokenCategory::OAuthPlatform => "oauth-platform",
            TokenCategory::Unspecified => "",
        }
    }

    /// Map a category name to its variant. Never fails.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "access" => TokenCategory::Access,
            "refresh" => TokenCategory::Refresh,
            "service" => TokenCategory::Service,
            "short-lived" => TokenCategory::ShortLived,
            "public-pull" => TokenCategory::PublicPull,
            "oauth-platform" => TokenCategory::OAuthPlatform,
            _ => TokenCategory::Unspecified,
        }
    }
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenCategory::Unspecified => f.write_str("unspecified"),
            other => f.write_str(other.as_str()),
        }
    }
}

impl From<String> for TokenCategory {
    fn from(raw: String) -> Self {
        TokenCategory::parse(&raw)
    }
}

impl From<TokenCategory> for String {
    fn from(category: TokenCategory) -> Self {
        category.as_str().to_string()
    }
}

/// Lifetimes per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LifetimePolicy {
    /// `access`, `refresh`, `service` and `oauth-platform`.
    pub long_lived: Duration,
    /// `short-lived`.
    pub short_lived: Duration,
    /// `public-pull`.
    pub public_pull: Duration,
    /// Everything else.
    pub fallback: Duration,
}

impl Default for LifetimePolicy {
    fn default() -> Self {
        Self {
            long_lived: Duration::hours(750),
            short_lived: Duration::minutes(30),
            public_pull: Duration::minutes(10),
            fallback: Duration::minutes(10),
        }
    }
}

impl LifetimePolicy {
    /// The lifetime for tokens of `category`.
    pub fn lifetime(&self, category: TokenCategory) -> Duration {
        match category {
            TokenCategory::Access
            | TokenCategory::Refresh
            | TokenCategory::Service
            | TokenCategory::OAuthPlatform => self.long_lived,
            TokenCategory::ShortLived => self.short_lived,
            TokenCategory::PublicPull => self.public_pull,
            TokenCategory::Unspecified => self.fallback,
        }
    }

    /// Apply configured overrides on top of the defaults.
    pub fn from_config(cfg: &LifetimeConfig) -> Result<Self, TokenError> {
        let defaults = Self::default();
        Ok(Self {
            long_lived: override_or("long_lived", &cfg.long_lived, defaults.long_lived)?,
            short_lived: override_or("short_lived", &cfg.short_lived, defaults.short_lived)?,
            public_pull: override_or("public_pull", &cfg.public_pull, defaults.public_pull)?,
            fallback: override_or("fallback", &cfg.fallback, defaults.fallback)?,
        })
    }
}

fn override_or(
    field: &'static str,
    raw: &Option<String>,
    default: Duration,
) -> Result<Duration, TokenError> {
    match raw {
        Some(raw) => parse_lifetime(field, raw),
        None => Ok(default),
    }
}

/// Longest lifetime a config override may set.
pub const MAX_LIFETIME_DAYS: i64 = 1000 * 365;

// Claims carry whole seconds, so sub-second parts are dropped.
fn parse_lifetime(field: &'static str, raw: &str) -> Result<Duration, TokenError> {
    let parsed = humantime::parse_duration(raw.trim()).map_err(|e| TokenError::InvalidLifetime {
        field,
        reason: e.to_string(),
    })?;

    let secs = i64::try_from(parsed.as_secs()).map_err(|_| TokenError::InvalidLifetime {
        field,
        reason: format!("{raw:?} is too long"),
    })?;
    if secs == 0 {
        return Err(TokenError::InvalidLifetime {
            field,
            reason: "must be at least one second".to_string(),
        });
    }

    let too_long = || TokenError::InvalidLifetime {
        field,
        reason: format!("{raw:?} exceeds {MAX_LIFETIME_DAYS} days"),
    };
    let lifetime = Duration::try_seconds(secs).ok_or_else(too_long)?;
    if lifetime > Duration::days(MAX_LIFETIME_DAYS) {
        return Err(too_long());
    }
    Ok(lifetime)
}
