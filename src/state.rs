use sqlx::SqlitePool;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::board::Board;
use crate::persistence::{PersistenceBridge, Slot, SqliteSlot};

/// Shared handle to the single board. The mutex keeps one mutator at a time, so each
/// request finishes its transition and write before the next one starts.
#[derive(Clone)]
pub struct AppState {
    pub board: Arc<Mutex<Board>>,
}

impl AppState {
    pub async fn new(pool: SqlitePool) -> Self {
        Self::with_slot(Arc::new(SqliteSlot::new(Arc::new(pool)))).await
    }

    pub async fn with_slot(slot: Arc<dyn Slot>) -> Self {
        let board = Board::open(PersistenceBridge::new(slot)).await;
        Self {
            board: Arc::new(Mutex::new(board)),
        }
    }
}
