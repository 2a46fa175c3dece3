//! Configuration types for the token authority.
//!
//! The authority is configured from the `[authority]` table of the server
//! config file:
//!
//! ```toml
//! [authority]
//! endpoint = "https://registry.example.com"
//!
//! [authority.signing]
//! secret_env = "REGAUTH_SIGNING_SECRET"
//!
//! [authority.lifetimes]
//! short_lived = "30m"
//! ```

pub mod lifetime;
pub mod signing;

use serde::{Deserialize, Serialize};

pub use lifetime::LifetimeConfig;
pub use signing::SigningConfig;

/// Configuration for the token authority.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorityConfig {
    /// External endpoint of the registry. Used as both issuer and audience
    /// of every token.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Where the shared signing secret comes from.
    #[serde(default)]
    pub signing: SigningConfig,

    /// Per-category lifetime overrides.
    #[serde(default)]
    pub lifetimes: LifetimeConfig,
}

fn default_endpoint() -> String {
    "http://localhost:5000".to_string()
}

impl Default for AuthorityConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            signing: SigningConfig::default(),
            lifetimes: LifetimeConfig::default(),
        }
    }
}
