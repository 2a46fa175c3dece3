use super::{StoreError, UserStore};
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

/// In-process user store. Contents are lost on restart.
#[derive(Default)]
pub struct MemoryUserStore {
    records: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
}

impl MemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn get(&self, key: &[u8]) -> Result<Vec<u8>, StoreError> {
        self.records
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or(StoreError::NotFound)
    }

    async fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StoreError> {
        self.records
            .write()
            .await
            .insert(key.to_vec(), value.to_vec());
        Ok(())
    }
}
