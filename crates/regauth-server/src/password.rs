//! Password verification against stored Argon2 PHC strings.

use argon2::{
    Argon2, PasswordHash,
    password_hash::{PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Checks a submitted password against a stored password secret.
pub trait CredentialVerifier: Send + Sync {
    fn verify(&self, stored_secret: &str, submitted: &str) -> bool;
}

/// Argon2 verifier. Stored secrets that are not valid PHC strings never
/// match.
#[derive(Default)]
pub struct Argon2Verifier;

impl Argon2Verifier {
    pub fn new() -> Self {
        Self
    }

    /// Hash `password` into a PHC string with a fresh salt.
    pub fn hash(password: &str) -> anyhow::Result<String> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| anyhow::anyhow!(e.to_string()))?
            .to_string();
        Ok(hash)
    }
}

impl CredentialVerifier for Argon2Verifier {
    fn verify(&self, stored_secret: &str, submitted: &str) -> bool {
        let parsed = match PasswordHash::new(stored_secret) {
            Ok(parsed) => parsed,
            Err(e) => {
                tracing::warn!(error = %e, "stored password secret is not a valid PHC string");
                return false;
            }
        };

        Argon2::default()
            .verify_password(submitted.as_bytes(), &parsed)
            .is_ok()
    }
}
