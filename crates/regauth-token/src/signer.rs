//! Shared-secret signing.

use crate::error::TokenError;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use regauth_core::SigningConfig;

/// The process-wide HMAC secret.
#[derive(Clone)]
pub struct SigningSecret {
    bytes: Vec<u8>,
}

impl SigningSecret {
    /// Wrap a secret. Empty or whitespace-only secrets are rejected.
    pub fn new(secret: impl Into<Vec<u8>>) -> Result<Self, TokenError> {
        let bytes = secret.into();
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(TokenError::InvalidSecret("secret is empty".to_string()));
        }
        Ok(Self { bytes })
    }

    /// Resolve the secret from its configured source.
    pub fn from_config(cfg: &SigningConfig) -> Result<Self, TokenError> {
        let secret = cfg.resolve_secret()?.ok_or_else(|| {
            TokenError::InvalidSecret(
                "no signing secret configured (set the secret env var, secret_file or secret)"
                    .to_string(),
            )
        })?;
        Self::new(secret)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl std::fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("SigningSecret(<redacted>)")
    }
}

/// Turns an encoded claim object into a signed token string.
pub trait TokenSigner: Send + Sync {
    fn sign(&self, claims: &serde_json::Value) -> Result<String, TokenError>;
}

/// HS256 JWT signer.
pub struct Hs256Signer {
    header: Header,
    key: EncodingKey,
}

impl Hs256Signer {
    pub fn new(secret: &SigningSecret) -> Self {
        Self {
            header: Header::new(Algorithm::HS256),
            key: EncodingKey::from_secret(secret.as_bytes()),
        }
    }
}

impl TokenSigner for Hs256Signer {
    fn sign(&self, claims: &serde_json::Value) -> Result<String, TokenError> {
        jsonwebtoken::encode(&self.header, claims, &self.key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_secret_rejected() {
        assert!(matches!(
            SigningSecret::new(""),
            Err(TokenError::InvalidSecret(_))
        ));
        assert!(SigningSecret::new("  \n").is_err());
        assert!(SigningSecret::new("s3cret").is_ok());
    }

    #[test]
    fn test_missing_config_secret() {
        let cfg = SigningConfig {
            secret_env: None,
            secret_file: None,
            secret: None,
        };
        assert!(matches!(
            SigningSecret::from_config(&cfg),
            Err(TokenError::InvalidSecret(_))
        ));
    }

    #[test]
    fn test_signed_token_is_compact_jws() {
        let secret = SigningSecret::new("s3cret").unwrap();
        let token = Hs256Signer::new(&secret)
            .sign(&json!({"sub": "u-1"}))
            .unwrap();

        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_debug_redacts() {
        let secret = SigningSecret::new("s3cret").unwrap();
        assert!(!format!("{secret:?}").contains("s3cret"));
    }
}
