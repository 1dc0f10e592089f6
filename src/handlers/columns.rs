use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::{AppError, Result};
use crate::models::{Card, ColumnId, ColumnResponse, COLUMNS};
use crate::state::AppState;

pub(crate) fn parse_column(raw: &str) -> Result<ColumnId> {
    raw.parse::<ColumnId>().map_err(AppError::BadRequest)
}

pub async fn list_columns(State(state): State<AppState>) -> Json<Vec<ColumnResponse>> {
    let snapshot = state.board.lock().await.snapshot();

    let columns = COLUMNS
        .iter()
        .map(|col| {
            let cards = snapshot
                .by_status(col.id)
                .into_iter()
                .cloned()
                .collect();
            ColumnResponse::from(col).with_cards(cards)
        })
        .collect();

    Json(columns)
}

/// Drop target. The body carries the dragged card's id as plain text.
pub async fn drop_card(
    State(state): State<AppState>,
    Path(column_id): Path<String>,
    payload: String,
) -> Result<Json<Option<Card>>> {
    let status = parse_column(&column_id)?;

    let card = state.board.lock().await.drop_card(&payload, status).await;
    Ok(Json(card))
}
