//! Error types for the token crate.

use thiserror::Error;

/// Errors that can occur while issuing or verifying tokens.
#[derive(Debug, Error)]
pub enum TokenError {
    /// The signing secret is missing or unusable.
    #[error("invalid signing secret: {0}")]
    InvalidSecret(String),

    /// A configured lifetime could not be parsed.
    #[error("invalid {field} lifetime: {reason}")]
    InvalidLifetime { field: &'static str, reason: String },

    /// An access-granting token was requested with no access entries.
    #[error("access list must not be empty")]
    EmptyAccessList,

    /// An explicit expiry does not lie after the issuance time.
    #[error("expiry {expires_at} is not after issuance time {issued_at}")]
    InvalidExpiry { issued_at: i64, expires_at: i64 },

    /// Issuance time plus the category lifetime is not a representable
    /// timestamp.
    #[error("expiry for {category} token is out of range")]
    ExpiryOutOfRange { category: String },

    /// The signer could not produce a signature.
    #[error("failed to sign token: {0}")]
    SigningFailed(String),

    /// The access half of a token pair could not be signed.
    #[error("ERR_ACCESS_TOKEN_SIGN: {0}")]
    AccessTokenSign(#[source] Box<TokenError>),

    /// The refresh half of a token pair could not be signed.
    #[error("ERR_REFRESH_TOKEN_SIGN: {0}")]
    RefreshTokenSign(#[source] Box<TokenError>),

    /// Token has expired.
    #[error("token has expired")]
    TokenExpired,

    /// Token verification failed.
    #[error("token verification failed: {0}")]
    VerificationFailed(String),

    /// Failed to encode claims.
    #[error("token serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// IO error (reading the signing secret).
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl TokenError {
    /// Stable code for the failed half of a token pair, if any.
    pub fn pair_code(&self) -> Option<&'static str> {
        match self {
            TokenError::AccessTokenSign(_) => Some("ERR_ACCESS_TOKEN_SIGN"),
            TokenError::RefreshTokenSign(_) => Some("ERR_REFRESH_TOKEN_SIGN"),
            _ => None,
        }
    }
}
