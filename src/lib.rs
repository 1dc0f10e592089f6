pub mod board;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod persistence;
pub mod state;
pub mod store;
pub mod validation;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;

use state::AppState;

pub fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Column routes
        .route("/columns", get(handlers::columns::list_columns))
        .route(
            "/columns/{column_id}/cards",
            post(handlers::cards::create_card),
        )
        .route(
            "/columns/{column_id}/drop",
            post(handlers::columns::drop_card),
        )
        // Card routes
        .route("/cards", get(handlers::cards::list_cards))
        .route(
            "/cards/{card_id}",
            get(handlers::cards::get_card)
                .put(handlers::cards::update_card)
                .delete(handlers::cards::delete_card),
        )
        .route("/cards/{card_id}/move", patch(handlers::cards::move_card));

    Router::new()
        .nest("/api", api_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub mod test_utils {
    use crate::models::{Card, ColumnId, NewCard};
    use crate::state::AppState;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    pub async fn create_test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test pool");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    pub async fn create_test_state() -> AppState {
        let pool = create_test_pool().await;
        AppState::new(pool).await
    }

    pub async fn create_test_card(state: &AppState, title: &str, status: ColumnId) -> Card {
        state
            .board
            .lock()
            .await
            .add_card(NewCard::new(title, status))
            .await
    }
}
