//! Signing secret configuration.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where the shared HMAC signing secret is read from.
///
/// Sources are tried in order: environment variable, file, inline value.
#[derive(Clone, Serialize, Deserialize)]
pub struct SigningConfig {
    /// Environment variable holding the secret.
    #[serde(default = "default_secret_env")]
    pub secret_env: Option<String>,

    /// File holding the secret. Surrounding whitespace is trimmed.
    #[serde(default)]
    pub secret_file: Option<PathBuf>,

    /// Inline secret. Meant for local development only.
    #[serde(default)]
    pub secret: Option<String>,
}

fn default_secret_env() -> Option<String> {
    Some("REGAUTH_SIGNING_SECRET".to_string())
}

impl Default for SigningConfig {
    fn default() -> Self {
        Self {
            secret_env: default_secret_env(),
            secret_file: None,
            secret: None,
        }
    }
}

impl std::fmt::Debug for SigningConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningConfig")
            .field("secret_env", &self.secret_env)
            .field("secret_file", &self.secret_file)
            .field("secret", &self.secret.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl SigningConfig {
    /// Resolve the secret from environment, file or inline value.
    ///
    /// Returns `Ok(None)` when no source yields a value.
    pub fn resolve_secret(&self) -> Result<Option<String>, std::io::Error> {
        if let Some(env_var) = &self.secret_env {
            if let Ok(secret) = std::env::var(env_var) {
                if !secret.trim().is_empty() {
                    return Ok(Some(secret));
                }
            }
        }

        if let Some(path) = &self.secret_file {
            let secret = std::fs::read_to_string(path)?;
            return Ok(Some(secret.trim().to_string()));
        }

        Ok(self.secret.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn without_env() -> SigningConfig {
        SigningConfig {
            secret_env: None,
            ..Default::default()
        }
    }

    #[test]
    fn test_file_secret_is_trimmed() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "  file-secret  ").unwrap();

        let cfg = SigningConfig {
            secret_file: Some(file.path().to_path_buf()),
            secret: Some("inline".to_string()),
            ..without_env()
        };

        assert_eq!(cfg.resolve_secret().unwrap().as_deref(), Some("file-secret"));
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let cfg = SigningConfig {
            secret_file: Some(PathBuf::from("/nonexistent/regauth/secret")),
            ..without_env()
        };
        assert!(cfg.resolve_secret().is_err());
    }

    #[test]
    fn test_inline_secret() {
        let cfg = SigningConfig {
            secret: Some("inline".to_string()),
            ..without_env()
        };
        assert_eq!(cfg.resolve_secret().unwrap().as_deref(), Some("inline"));
    }

    #[test]
    fn test_unset_env_var_falls_through() {
        let cfg = SigningConfig {
            secret_env: Some("REGAUTH_TEST_SECRET_THAT_IS_NEVER_SET".to_string()),
            secret: None,
            secret_file: None,
        };
        assert_eq!(cfg.resolve_secret().unwrap(), None);
    }

    #[test]
    fn test_debug_redacts_inline_secret() {
        let cfg = SigningConfig {
            secret: Some("hunter2".to_string()),
            ..without_env()
        };
        let rendered = format!("{cfg:?}");
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
