use crate::config::BootstrapConfig;
use crate::password::Argon2Verifier;
use crate::store::{StoreError, UserStore};
use regauth_core::{User, user_key};
use uuid::Uuid;

/// On startup, create the configured seed user if it is not in the store.
///
/// Password source (highest precedence first):
/// - env `REGAUTH_BOOTSTRAP_PASSWORD`
/// - `config.toml` `[bootstrap].password`
pub async fn bootstrap_user(store: &dyn UserStore, cfg: &BootstrapConfig) -> anyhow::Result<()> {
    if !cfg.enabled {
        return Ok(());
    }

    match store.get(user_key(&cfg.username).as_bytes()).await {
        Ok(_) => return Ok(()),
        Err(StoreError::NotFound) => {}
        Err(e) => return Err(e.into()),
    }

    let password = std::env::var("REGAUTH_BOOTSTRAP_PASSWORD")
        .unwrap_or_else(|_| cfg.password.clone());

    if password.trim().is_empty() {
        anyhow::bail!(
            "bootstrap password is empty (set REGAUTH_BOOTSTRAP_PASSWORD or config.toml [bootstrap].password)"
        );
    }

    let user = User {
        id: Uuid::new_v4().to_string(),
        username: cfg.username.clone(),
        email: cfg.email.clone(),
        password: Argon2Verifier::hash(&password)?,
    };
    let record = serde_json::to_vec(&user)?;
    for key in user.store_keys() {
        store.put(key.as_bytes(), &record).await?;
    }

    tracing::warn!(
        username = %user.username,
        "bootstrapped seed user (password taken from env/config)"
    );
    Ok(())
}
