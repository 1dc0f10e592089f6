use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Workflow stage a card sits in. The set is fixed at compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnId {
    Ontwerp,
    Uitvoering,
    Klaar,
}

impl ColumnId {
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnId::Ontwerp => "ontwerp",
            ColumnId::Uitvoering => "uitvoering",
            ColumnId::Klaar => "klaar",
        }
    }
}

impl std::fmt::Display for ColumnId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ColumnId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "ontwerp" => Ok(ColumnId::Ontwerp),
            "uitvoering" => Ok(ColumnId::Uitvoering),
            "klaar" => Ok(ColumnId::Klaar),
            _ => Err(format!("Invalid column: {}", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

/// A task on the board. Field names on the wire match the stored layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub status: ColumnId,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Pre-validated input for creating a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCard {
    pub title: String,
    pub description: Option<String>,
    pub status: ColumnId,
    pub priority: Option<Priority>,
    pub tags: Option<Vec<String>>,
}

impl NewCard {
    pub fn new(title: impl Into<String>, status: ColumnId) -> Self {
        Self {
            title: title.into(),
            description: None,
            status,
            priority: None,
            tags: None,
        }
    }
}

/// Partial field set merged over an existing card. `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub status: Option<ColumnId>,
    pub priority: Option<Priority>,
    pub tags: Option<Vec<String>>,
}

impl CardChanges {
    pub fn status(status: ColumnId) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct MoveCard {
    pub status: ColumnId,
}

impl Card {
    pub(crate) fn from_new(id: Uuid, input: NewCard, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description.unwrap_or_default(),
            status: input.status,
            priority: input.priority.unwrap_or_default(),
            tags: input.tags.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a new card with `changes` merged in. `id` and `created_at` never change and
    /// `updated_at` never goes backwards.
    pub(crate) fn merged(&self, changes: CardChanges, now: DateTime<Utc>) -> Self {
        Self {
            id: self.id,
            title: changes.title.unwrap_or_else(|| self.title.clone()),
            description: changes
                .description
                .unwrap_or_else(|| self.description.clone()),
            status: changes.status.unwrap_or(self.status),
            priority: changes.priority.unwrap_or(self.priority),
            tags: changes.tags.unwrap_or_else(|| self.tags.clone()),
            created_at: self.created_at,
            updated_at: now.max(self.updated_at),
        }
    }
}
