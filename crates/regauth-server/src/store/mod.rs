//! User store: an opaque byte-keyed lookup of serialized user records.

pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use thiserror::Error;

pub use memory::MemoryUserStore;
pub use sqlite::SqliteUserStore;

/// Errors returned by a user store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No record under the key.
    #[error("key not found")]
    NotFound,

    /// The backing store failed.
    #[error("user store unavailable: {0}")]
    Unavailable(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Unavailable(e.to_string())
    }
}

/// Byte-keyed user record store.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch the serialized record stored under `key`.
    async fn get(&self, key: &[u8]) -> Result<Vec<u8>, StoreError>;

    /// Store `value` under `key`, replacing any previous record.
    async fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError>;
}
