use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::models::{Card, MoveCard};
use crate::state::AppState;
use crate::store::Snapshot;
use crate::validation::{CardEdit, CardForm};

use super::columns::parse_column;

#[derive(Debug, Default, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub confirm: bool,
}

#[derive(Debug, Serialize)]
pub struct DeleteOutcome {
    pub deleted: bool,
}

pub async fn list_cards(State(state): State<AppState>) -> Json<Snapshot> {
    Json(state.board.lock().await.snapshot())
}

pub async fn get_card(
    State(state): State<AppState>,
    Path(card_id): Path<Uuid>,
) -> Result<Json<Card>> {
    let board = state.board.lock().await;
    let card = board.get(card_id).cloned().ok_or(AppError::NotFound)?;
    Ok(Json(card))
}

pub async fn create_card(
    State(state): State<AppState>,
    Path(column_id): Path<String>,
    Json(input): Json<CardForm>,
) -> Result<Json<Card>> {
    let status = parse_column(&column_id)?;
    let new_card = input.validate(status)?;

    let card = state.board.lock().await.add_card(new_card).await;
    Ok(Json(card))
}

/// Returns `null` when the card no longer exists.
pub async fn update_card(
    State(state): State<AppState>,
    Path(card_id): Path<Uuid>,
    Json(input): Json<CardEdit>,
) -> Result<Json<Option<Card>>> {
    let changes = input.validate()?;

    let card = state.board.lock().await.update_card(card_id, changes).await;
    Ok(Json(card))
}

pub async fn move_card(
    State(state): State<AppState>,
    Path(card_id): Path<Uuid>,
    Json(input): Json<MoveCard>,
) -> Json<Option<Card>> {
    let card = state
        .board
        .lock()
        .await
        .move_card(card_id, input.status)
        .await;
    Json(card)
}

/// Deletes only when the caller confirmed; an unconfirmed request changes nothing.
pub async fn delete_card(
    State(state): State<AppState>,
    Path(card_id): Path<Uuid>,
    Query(params): Query<DeleteParams>,
) -> Json<DeleteOutcome> {
    let deleted = state
        .board
        .lock()
        .await
        .delete_card(card_id, &params.confirm)
        .await;
    Json(DeleteOutcome { deleted })
}
