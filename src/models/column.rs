use serde::Serialize;

use super::card::{Card, ColumnId};

/// Static column descriptor. Columns are never created, renamed or removed at runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub id: ColumnId,
    pub title: &'static str,
    pub color: &'static str,
}

pub const COLUMNS: [Column; 3] = [
    Column {
        id: ColumnId::Ontwerp,
        title: "Ontwerp",
        color: "blue",
    },
    Column {
        id: ColumnId::Uitvoering,
        title: "Uitvoering",
        color: "orange",
    },
    Column {
        id: ColumnId::Klaar,
        title: "Klaar",
        color: "green",
    },
];

#[derive(Debug, Serialize)]
pub struct ColumnResponse {
    pub id: ColumnId,
    pub title: &'static str,
    pub color: &'static str,
    pub count: usize,
    pub cards: Vec<Card>,
}

impl From<&Column> for ColumnResponse {
    fn from(col: &Column) -> Self {
        Self {
            id: col.id,
            title: col.title,
            color: col.color,
            count: 0,
            cards: vec![],
        }
    }
}

impl ColumnResponse {
    pub fn with_cards(mut self, cards: Vec<Card>) -> Self {
        self.count = cards.len();
        self.cards = cards;
        self
    }
}
