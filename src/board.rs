use uuid::Uuid;

use crate::models::{Card, CardChanges, ColumnId, NewCard};
use crate::persistence::PersistenceBridge;
use crate::store::{Action, CardStore, Snapshot};

/// Yes/no prompt asked before a card is deleted.
pub trait Confirm {
    fn confirm(&self, card: &Card) -> bool;
}

impl Confirm for bool {
    fn confirm(&self, _card: &Card) -> bool {
        *self
    }
}

impl<F> Confirm for F
where
    F: Fn(&Card) -> bool,
{
    fn confirm(&self, card: &Card) -> bool {
        self(card)
    }
}

/// A card store wired to its persistence bridge. Every mutation that changes the
/// collection is written through before the call returns.
pub struct Board {
    store: CardStore,
    bridge: PersistenceBridge,
}

impl Board {
    pub async fn open(bridge: PersistenceBridge) -> Self {
        let mut store = CardStore::new();
        store.dispatch(Action::SetCards(bridge.load().await));
        Self { store, bridge }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.store.snapshot()
    }

    pub fn get(&self, id: Uuid) -> Option<&Card> {
        self.store.cards().get(id)
    }

    pub async fn add_card(&mut self, input: NewCard) -> Card {
        let card = self.store.create(input);
        tracing::info!(card_id = %card.id, status = %card.status, "Card created");
        self.sync().await;
        card
    }

    pub async fn update_card(&mut self, id: Uuid, changes: CardChanges) -> Option<Card> {
        if !self.store.cards().contains(id) {
            tracing::debug!(card_id = %id, "Update ignored, card not found");
            return None;
        }
        let card = self.store.update(id, changes);
        self.sync().await;
        card
    }

    pub async fn move_card(&mut self, id: Uuid, status: ColumnId) -> Option<Card> {
        if !self.store.cards().contains(id) {
            tracing::debug!(card_id = %id, "Move ignored, card not found");
            return None;
        }
        let card = self.store.move_card(id, status);
        tracing::info!(card_id = %id, status = %status, "Card moved");
        self.sync().await;
        card
    }

    /// Deletes the card if it exists and `confirm` agrees. Returns whether a card was removed.
    pub async fn delete_card(&mut self, id: Uuid, confirm: &impl Confirm) -> bool {
        let Some(card) = self.store.cards().get(id) else {
            tracing::debug!(card_id = %id, "Delete ignored, card not found");
            return false;
        };
        if !confirm.confirm(card) {
            tracing::debug!(card_id = %id, "Delete declined");
            return false;
        }

        let removed = self.store.delete(id);
        if removed {
            tracing::info!(card_id = %id, "Card deleted");
            self.sync().await;
        }
        removed
    }

    /// Handles a drop on `column`. The payload is the dragged card's id as text; empty or
    /// malformed payloads are ignored.
    pub async fn drop_card(&mut self, payload: &str, column: ColumnId) -> Option<Card> {
        let payload = payload.trim();
        if payload.is_empty() {
            return None;
        }
        match payload.parse::<Uuid>() {
            Ok(id) => self.move_card(id, column).await,
            Err(_) => {
                tracing::debug!(payload, "Ignoring drop with unknown payload");
                None
            }
        }
    }

    async fn sync(&self) {
        self.bridge.save(self.store.cards()).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::{MemorySlot, PersistenceError, Slot, STORAGE_KEY};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[derive(Default)]
    struct CountingSlot {
        inner: MemorySlot,
        writes: AtomicUsize,
    }

    #[async_trait]
    impl Slot for CountingSlot {
        async fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            self.inner.set(key, value).await
        }
    }

    struct BrokenSlot;

    #[async_trait]
    impl Slot for BrokenSlot {
        async fn get(&self, _key: &str) -> Result<Option<String>, PersistenceError> {
            Err(PersistenceError::Unavailable("read failed".to_string()))
        }

        async fn set(&self, _key: &str, _value: &str) -> Result<(), PersistenceError> {
            Err(PersistenceError::Unavailable("quota exceeded".to_string()))
        }
    }

    async fn counting_board() -> (Board, Arc<CountingSlot>) {
        let slot = Arc::new(CountingSlot::default());
        let board = Board::open(PersistenceBridge::new(slot.clone())).await;
        (board, slot)
    }

    #[tokio::test]
    async fn test_each_mutation_is_persisted() {
        let (mut board, slot) = counting_board().await;

        let card = board
            .add_card(NewCard::new("Design API", ColumnId::Ontwerp))
            .await;
        board.move_card(card.id, ColumnId::Klaar).await;

        assert_eq!(slot.writes.load(Ordering::SeqCst), 2);
        let stored = slot.inner.get(STORAGE_KEY).await.unwrap().unwrap();
        let cards: Vec<Card> = serde_json::from_str(&stored).unwrap();
        assert_eq!(cards.len(), 1);
        assert_eq!(cards[0].status, ColumnId::Klaar);
    }

    #[tokio::test]
    async fn test_noops_skip_the_write() {
        let (mut board, slot) = counting_board().await;
        let missing = Uuid::new_v4();

        assert!(board.update_card(missing, CardChanges::default()).await.is_none());
        assert!(board.move_card(missing, ColumnId::Klaar).await.is_none());
        assert!(!board.delete_card(missing, &true).await);

        assert_eq!(slot.writes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_declined_delete_leaves_board_unchanged() {
        let (mut board, slot) = counting_board().await;
        let card = board.add_card(NewCard::new("Keep me", ColumnId::Ontwerp)).await;
        let before = board.snapshot();

        assert!(!board.delete_card(card.id, &false).await);
        assert!(board.snapshot().ptr_eq(&before));
        assert_eq!(slot.writes.load(Ordering::SeqCst), 1);

        assert!(board.delete_card(card.id, &|c: &Card| c.title == "Keep me").await);
        assert!(board.snapshot().is_empty());
    }

    #[tokio::test]
    async fn test_delete_of_absent_card_never_prompts() {
        let (mut board, _) = counting_board().await;
        let asked = AtomicUsize::new(0);
        let confirm = |_: &Card| {
            asked.fetch_add(1, Ordering::SeqCst);
            true
        };

        board.delete_card(Uuid::new_v4(), &confirm).await;

        assert_eq!(asked.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_drop_moves_by_payload() {
        let (mut board, _) = counting_board().await;
        let card = board.add_card(NewCard::new("Drag me", ColumnId::Ontwerp)).await;

        assert!(board.drop_card("", ColumnId::Klaar).await.is_none());
        assert!(board.drop_card("not-a-card", ColumnId::Klaar).await.is_none());

        let moved = board
            .drop_card(&format!(" {} ", card.id), ColumnId::Uitvoering)
            .await
            .unwrap();
        assert_eq!(moved.status, ColumnId::Uitvoering);
    }

    #[tokio::test]
    async fn test_board_reopens_with_stored_cards() {
        let slot = Arc::new(MemorySlot::new());
        let mut board = Board::open(PersistenceBridge::new(slot.clone())).await;
        let card = board.add_card(NewCard::new("Persisted", ColumnId::Uitvoering)).await;

        let reopened = Board::open(PersistenceBridge::new(slot)).await;

        assert_eq!(reopened.get(card.id), Some(&card));
    }

    #[tokio::test]
    async fn test_storage_failures_do_not_affect_the_store() {
        let mut board = Board::open(PersistenceBridge::new(Arc::new(BrokenSlot))).await;
        assert!(board.snapshot().is_empty());

        let card = board.add_card(NewCard::new("Still here", ColumnId::Ontwerp)).await;

        assert_eq!(board.snapshot().len(), 1);
        assert_eq!(board.get(card.id).unwrap().title, "Still here");
    }
}
