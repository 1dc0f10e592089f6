//! In-memory card collection and the four state transitions applied to it.
//!
//! Every transition goes through [`reduce`], which never touches the snapshot it
//! is given. Transitions that change nothing hand back the same allocation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::models::{Card, CardChanges, ColumnId, NewCard};

/// Immutable view of the full card collection at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot(Arc<Vec<Card>>);

impl Snapshot {
    pub fn new(cards: Vec<Card>) -> Self {
        Self(Arc::new(cards))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Card> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Card] {
        &self.0
    }

    pub fn get(&self, id: Uuid) -> Option<&Card> {
        self.0.iter().find(|c| c.id == id)
    }

    pub fn contains(&self, id: Uuid) -> bool {
        self.get(id).is_some()
    }

    /// Cards in `status`, in insertion order.
    pub fn by_status(&self, status: ColumnId) -> Vec<&Card> {
        self.0.iter().filter(|c| c.status == status).collect()
    }

    /// True when both snapshots share the same underlying collection.
    pub fn ptr_eq(&self, other: &Snapshot) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl<'a> IntoIterator for &'a Snapshot {
    type Item = &'a Card;
    type IntoIter = std::slice::Iter<'a, Card>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[derive(Debug, Clone)]
pub enum Action {
    /// Replace the whole collection, used when seeding from storage.
    SetCards(Snapshot),
    AddCard {
        id: Uuid,
        input: NewCard,
        now: DateTime<Utc>,
    },
    UpdateCard {
        id: Uuid,
        changes: CardChanges,
        now: DateTime<Utc>,
    },
    MoveCard {
        id: Uuid,
        status: ColumnId,
        now: DateTime<Utc>,
    },
    DeleteCard {
        id: Uuid,
    },
}

impl Action {
    pub fn name(&self) -> &'static str {
        match self {
            Action::SetCards(_) => "set_cards",
            Action::AddCard { .. } => "add_card",
            Action::UpdateCard { .. } => "update_card",
            Action::MoveCard { .. } => "move_card",
            Action::DeleteCard { .. } => "delete_card",
        }
    }
}

pub fn reduce(state: &Snapshot, action: Action) -> Snapshot {
    match action {
        Action::SetCards(cards) => cards,
        Action::AddCard { id, input, now } => {
            let mut cards = Vec::with_capacity(state.len() + 1);
            cards.extend(state.iter().cloned());
            cards.push(Card::from_new(id, input, now));
            Snapshot::new(cards)
        }
        Action::UpdateCard { id, changes, now } => {
            replace(state, id, |card| card.merged(changes.clone(), now))
        }
        Action::MoveCard { id, status, now } => {
            replace(state, id, |card| card.merged(CardChanges::status(status), now))
        }
        Action::DeleteCard { id } => {
            if !state.contains(id) {
                return state.clone();
            }
            Snapshot::new(state.iter().filter(|c| c.id != id).cloned().collect())
        }
    }
}

fn replace(state: &Snapshot, id: Uuid, f: impl Fn(&Card) -> Card) -> Snapshot {
    if !state.contains(id) {
        return state.clone();
    }

    let cards = state
        .iter()
        .map(|card| if card.id == id { f(card) } else { card.clone() })
        .collect();
    Snapshot::new(cards)
}

/// Owned holder of the current snapshot. Generates ids and timestamps, then
/// delegates to [`reduce`].
#[derive(Debug, Clone, Default)]
pub struct CardStore {
    cards: Snapshot,
}

impl CardStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.cards.clone()
    }

    pub fn cards(&self) -> &Snapshot {
        &self.cards
    }

    /// Applies `action` and returns whether the collection changed.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let name = action.name();
        let next = reduce(&self.cards, action);
        let changed = !next.ptr_eq(&self.cards);
        tracing::debug!(action = name, changed, cards = next.len(), "Applied board action");
        self.cards = next;
        changed
    }

    pub fn create(&mut self, input: NewCard) -> Card {
        let id = Uuid::new_v4();
        self.dispatch(Action::AddCard {
            id,
            input,
            now: Utc::now(),
        });
        // The card was just appended.
        self.cards.as_slice()[self.cards.len() - 1].clone()
    }

    pub fn update(&mut self, id: Uuid, changes: CardChanges) -> Option<Card> {
        self.dispatch(Action::UpdateCard {
            id,
            changes,
            now: Utc::now(),
        });
        self.cards.get(id).cloned()
    }

    pub fn move_card(&mut self, id: Uuid, status: ColumnId) -> Option<Card> {
        self.dispatch(Action::MoveCard {
            id,
            status,
            now: Utc::now(),
        });
        self.cards.get(id).cloned()
    }

    pub fn delete(&mut self, id: Uuid) -> bool {
        self.dispatch(Action::DeleteCard { id })
    }
}
