//! # regauth-core
//!
//! Types shared by every regauth crate: the authority configuration
//! (endpoint identity, signing secret sources, token lifetimes) and the
//! user record read from the user store.

pub mod config;
pub mod user;

pub use config::{AuthorityConfig, LifetimeConfig, SigningConfig};
pub use user::{USER_NAMESPACE, User, user_key};
