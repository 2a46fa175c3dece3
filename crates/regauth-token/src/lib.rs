//! # regauth-token
//!
//! Token authority for a container registry.
//!
//! This crate provides functionality for:
//! - Describing registry grants as access lists (`repository`, `alice/*`, `[push, pull]`)
//! - Picking a token lifetime from its category
//! - Building the claim set for each token category
//! - Signing claims with a shared HMAC secret (HS256 JWT)
//! - Verifying and decoding issued tokens
//!
//! ## Token Categories
//!
//! | Category | Carries | Default lifetime |
//! |----------|---------|------------------|
//! | `access` | Access list | 750 hours |
//! | `refresh` | Subject id only | 750 hours |
//! | `service` | Access list for one namespace | 750 hours |
//! | `short-lived` | Access list | 30 minutes |
//! | `public-pull` | `*/*` pull-only access list | 10 minutes |
//! | `oauth-platform` | Upstream OAuth payload | 750 hours |
//! | anything else | Access list | 10 minutes |
//!
//! Unknown categories fall back to the shortest lifetime instead of failing.

pub mod acl;
pub mod authority;
pub mod category;
pub mod claims;
pub mod error;
pub mod signer;
pub mod verifier;

pub use acl::{AccessEntry, AccessList, Action, REPOSITORY};
pub use authority::{PUBLIC_PULL_SUBJECT, TokenAuthority, TokenPair};
pub use category::{LifetimePolicy, TokenCategory};
pub use claims::{AccessClaims, OAuthPayload, PlatformClaims, RefreshClaims, StandardClaims};
pub use error::TokenError;
pub use signer::{Hs256Signer, SigningSecret, TokenSigner};
pub use verifier::{TokenVerifier, inspect_token_unverified};
