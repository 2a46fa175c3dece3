//! # regauth-server
//!
//! HTTP front end for the registry token authority:
//!
//! - `POST /signin` checks an email or username plus password against the
//!   user store and returns a 14-day namespace token
//! - `GET /token/public-pull` returns the anonymous pull credential
//! - `GET /healthz`

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod password;
pub mod request_log;
pub mod routes;
pub mod signin;
pub mod state;
pub mod store;

pub use config::{AppConfig, load_config};
pub use error::AuthError;
pub use signin::{SignInFlow, TokenResponse};
pub use state::AppState;
