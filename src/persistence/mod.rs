pub mod memory;
pub mod sqlite;

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;

use crate::models::Card;
use crate::store::Snapshot;

pub use memory::MemorySlot;
pub use sqlite::SqliteSlot;

/// Fixed key the board is stored under.
pub const STORAGE_KEY: &str = "kanban-board-data";

/// Durable key-value storage holding serialized values as text.
#[async_trait]
pub trait Slot: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Overwrites any previous value under `key`.
    async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum PersistenceError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid stored board: {0}")]
    InvalidData(String),
}

/// Mirrors the current snapshot into a [`Slot`] and seeds the store from it at startup.
///
/// Durability is best effort: neither direction ever returns an error to the caller.
#[derive(Clone)]
pub struct PersistenceBridge {
    slot: Arc<dyn Slot>,
}

impl PersistenceBridge {
    pub fn new(slot: Arc<dyn Slot>) -> Self {
        Self { slot }
    }

    /// Reads the stored collection. Missing, unreadable and corrupt values all yield an
    /// empty snapshot.
    pub async fn load(&self) -> Snapshot {
        match self.try_load().await {
            Ok(Some(snapshot)) => {
                tracing::info!(cards = snapshot.len(), key = STORAGE_KEY, "Loaded board");
                snapshot
            }
            Ok(None) => {
                tracing::info!(key = STORAGE_KEY, "No stored board, starting empty");
                Snapshot::default()
            }
            Err(e) => {
                tracing::warn!(key = STORAGE_KEY, "Discarding stored board: {}", e);
                Snapshot::default()
            }
        }
    }

    pub async fn try_load(&self) -> Result<Option<Snapshot>, PersistenceError> {
        let Some(raw) = self.slot.get(STORAGE_KEY).await? else {
            return Ok(None);
        };
        let cards: Vec<Card> = serde_json::from_str(&raw)?;
        check_invariants(&cards)?;
        Ok(Some(Snapshot::new(cards)))
    }

    /// Writes the full collection, replacing whatever was stored. Failures are logged and
    /// dropped; the in-memory store stays authoritative.
    pub async fn save(&self, snapshot: &Snapshot) {
        if let Err(e) = self.try_save(snapshot).await {
            tracing::warn!(key = STORAGE_KEY, "Failed to persist board: {}", e);
        }
    }

    pub async fn try_save(&self, snapshot: &Snapshot) -> Result<(), PersistenceError> {
        let raw = serde_json::to_string(snapshot)?;
        self.slot.set(STORAGE_KEY, &raw).await?;
        tracing::debug!(cards = snapshot.len(), key = STORAGE_KEY, "Persisted board");
        Ok(())
    }
}

/// Stored data must satisfy the same rules the store keeps: unique ids and
/// `updatedAt >= createdAt`.
fn check_invariants(cards: &[Card]) -> Result<(), PersistenceError> {
    let mut seen = HashSet::with_capacity(cards.len());
    for card in cards {
        if !seen.insert(card.id) {
            return Err(PersistenceError::InvalidData(format!(
                "duplicate card id {}",
                card.id
            )));
        }
        if card.updated_at < card.created_at {
            return Err(PersistenceError::InvalidData(format!(
                "card {} updated before it was created",
                card.id
            )));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CardChanges, ColumnId, NewCard, Priority};
    use crate::store::CardStore;

    #[tokio::test]
    async fn test_save_then_load_round_trips() {
        let mut store = CardStore::new();
        let card = store.create(NewCard {
            title: "Design API".to_string(),
            description: Some("REST first".to_string()),
            status: ColumnId::Ontwerp,
            priority: Some(Priority::High),
            tags: Some(vec!["api".to_string(), "api".to_string()]),
        });
        store.create(NewCard::new("Ship it", ColumnId::Klaar));
        store.update(
            card.id,
            CardChanges {
                description: Some(String::new()),
                ..CardChanges::default()
            },
        );

        let bridge = PersistenceBridge::new(Arc::new(MemorySlot::new()));
        bridge.try_save(store.cards()).await.unwrap();

        assert_eq!(bridge.load().await, store.snapshot());
    }

    #[tokio::test]
    async fn test_save_overwrites_previous_value() {
        let slot = Arc::new(MemorySlot::new());
        let bridge = PersistenceBridge::new(slot.clone());
        let mut store = CardStore::new();
        store.create(NewCard::new("One", ColumnId::Ontwerp));
        bridge.save(store.cards()).await;

        bridge.save(&Snapshot::default()).await;

        assert_eq!(slot.get(STORAGE_KEY).await.unwrap().as_deref(), Some("[]"));
        assert!(bridge.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_missing_or_corrupt_slot_loads_empty() {
        let bridge = PersistenceBridge::new(Arc::new(MemorySlot::new()));
        assert!(bridge.try_load().await.unwrap().is_none());
        assert!(bridge.load().await.is_empty());

        let corrupt = PersistenceBridge::new(Arc::new(MemorySlot::with_value(STORAGE_KEY, "{oops")));
        assert!(matches!(
            corrupt.try_load().await,
            Err(PersistenceError::Serialization(_))
        ));
        assert!(corrupt.load().await.is_empty());
    }

    fn stored_card(id: &str, created_at: &str, updated_at: &str) -> String {
        format!(
            r#"{{"id":"{}","title":"Card","status":"ontwerp","createdAt":"{}","updatedAt":"{}"}}"#,
            id, created_at, updated_at
        )
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_rejected() {
        let id = "6f1c2c3e-0d1b-4e0a-9a57-1d2b3c4d5e6f";
        let card = stored_card(id, "2026-01-01T00:00:00Z", "2026-01-01T00:00:00Z");
        let raw = format!("[{},{}]", card, card);
        let bridge = PersistenceBridge::new(Arc::new(MemorySlot::with_value(STORAGE_KEY, raw)));

        assert!(matches!(
            bridge.try_load().await,
            Err(PersistenceError::InvalidData(_))
        ));
        assert!(bridge.load().await.is_empty());
    }

    #[tokio::test]
    async fn test_updated_before_created_is_rejected() {
        let raw = format!(
            "[{}]",
            stored_card(
                "6f1c2c3e-0d1b-4e0a-9a57-1d2b3c4d5e6f",
                "2026-01-02T00:00:00Z",
                "2026-01-01T00:00:00Z"
            )
        );
        let bridge = PersistenceBridge::new(Arc::new(MemorySlot::with_value(STORAGE_KEY, raw)));

        assert!(matches!(
            bridge.try_load().await,
            Err(PersistenceError::InvalidData(_))
        ));
        assert!(bridge.load().await.is_empty());
    }
}
