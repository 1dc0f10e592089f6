pub mod card;
pub mod column;

pub use card::{Card, CardChanges, ColumnId, MoveCard, NewCard, Priority};
pub use column::{Column, ColumnResponse, COLUMNS};
