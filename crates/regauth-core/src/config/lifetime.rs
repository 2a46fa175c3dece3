//! Token lifetime overrides.

use serde::{Deserialize, Serialize};

/// Optional overrides for the per-category token lifetimes.
///
/// Values are human-readable durations ("750h", "30m", "14days"). Unset
/// fields keep the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LifetimeConfig {
    /// Lifetime of `access`, `refresh`, `service` and `oauth-platform` tokens.
    #[serde(default)]
    pub long_lived: Option<String>,

    /// Lifetime of `short-lived` tokens.
    #[serde(default)]
    pub short_lived: Option<String>,

    /// Lifetime of anonymous pull tokens.
    #[serde(default)]
    pub public_pull: Option<String>,

    /// Lifetime applied to tokens with no recognized category.
    #[serde(default)]
    pub fallback: Option<String>,
}
