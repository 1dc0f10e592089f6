use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{PersistenceError, Slot};

/// Process-local slot. Nothing survives a restart.
#[derive(Debug, Default)]
pub struct MemorySlot {
    values: RwLock<HashMap<String, String>>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot pre-filled with `value` under `key`, handy for seeding tests.
    pub fn with_value(key: &str, value: impl Into<String>) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value.into());
        Self {
            values: RwLock::new(values),
        }
    }
}

#[async_trait]
impl Slot for MemorySlot {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}
