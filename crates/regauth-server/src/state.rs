use crate::{
    bootstrap::bootstrap_user,
    config::{AppConfig, StoreBackend},
    password::{Argon2Verifier, CredentialVerifier},
    signin::SignInFlow,
    store::{MemoryUserStore, SqliteUserStore, UserStore},
};
use anyhow::Context;
use regauth_token::TokenAuthority;
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub authority: Arc<TokenAuthority>,
    pub signin: SignInFlow,
}

impl AppState {
    pub async fn init(cfg: &AppConfig) -> anyhow::Result<Self> {
        let authority = TokenAuthority::from_config(&cfg.authority)
            .context("failed to initialize token authority")?;

        let store: Arc<dyn UserStore> = match cfg.store.backend {
            StoreBackend::Memory => Arc::new(MemoryUserStore::new()),
            StoreBackend::Sqlite => Arc::new(
                SqliteUserStore::open(&cfg.store.sqlite_path)
                    .await
                    .with_context(|| {
                        format!("failed to open user store at {}", cfg.store.sqlite_path)
                    })?,
            ),
        };

        bootstrap_user(store.as_ref(), &cfg.bootstrap).await?;

        tracing::info!(
            endpoint = %authority.endpoint(),
            store = ?cfg.store.backend,
            "token authority ready"
        );

        Ok(Self::new(
            Arc::new(authority),
            store,
            Arc::new(Argon2Verifier::new()),
        ))
    }

    pub fn new(
        authority: Arc<TokenAuthority>,
        store: Arc<dyn UserStore>,
        verifier: Arc<dyn CredentialVerifier>,
    ) -> Self {
        Self {
            signin: SignInFlow::new(store, verifier, authority.clone()),
            authority,
        }
    }
}
