use async_trait::async_trait;
use sqlx::SqlitePool;
use std::sync::Arc;

use super::{PersistenceError, Slot};

/// Slot backed by the `kv_store` table.
#[derive(Clone)]
pub struct SqliteSlot {
    pool: Arc<SqlitePool>,
}

impl SqliteSlot {
    pub fn new(pool: Arc<SqlitePool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Slot for SqliteSlot {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let value = sqlx::query_scalar::<_, String>("SELECT value FROM kv_store WHERE key = $1")
            .bind(key)
            .fetch_optional(self.pool.as_ref())
            .await?;

        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        sqlx::query(
            r#"
            INSERT INTO kv_store (key, value, updated_at)
            VALUES ($1, $2, datetime('now'))
            ON CONFLICT(key) DO UPDATE
            SET value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .execute(self.pool.as_ref())
        .await?;

        Ok(())
    }
}
