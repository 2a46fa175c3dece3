//! Token verification and inspection.

use crate::claims::AccessClaims;
use crate::error::TokenError;
use crate::signer::SigningSecret;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::de::DeserializeOwned;

/// Verifies tokens issued by a [`crate::TokenAuthority`] sharing the same
/// endpoint and secret.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(endpoint: &str, secret: &SigningSecret) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[endpoint]);
        validation.set_audience(&[endpoint]);
        validation.set_required_spec_claims(&["exp", "nbf", "iss", "aud", "sub"]);
        validation.validate_nbf = true;

        Self {
            key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    /// Verify signature, time window, issuer and audience, then decode the
    /// claims as `C`.
    pub fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, TokenError> {
        jsonwebtoken::decode::<C>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::TokenExpired,
                _ => TokenError::VerificationFailed(e.to_string()),
            })
    }

    /// Verify a token that grants registry access. Tokens without a
    /// non-empty access list are rejected.
    pub fn verify_access(&self, token: &str) -> Result<AccessClaims, TokenError> {
        let claims: AccessClaims = self.verify(token)?;
        if claims.access.is_empty() {
            return Err(TokenError::VerificationFailed(
                "token grants no access".to_string(),
            ));
        }
        Ok(claims)
    }
}

/// Decode a token's claims without checking the signature or expiry (for
/// debugging).
pub fn inspect_token_unverified(token: &str) -> Result<serde_json::Value, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    jsonwebtoken::decode::<serde_json::Value>(token, &DecodingKey::from_secret(&[]), &validation)
        .map(|data| data.claims)
        .map_err(|e| TokenError::VerificationFailed(e.to_string()))
}
