//! HTTP API endpoints.
//!
//! Read-only board snapshot for clients that poll instead of holding a socket.

use axum::{extract::State, Json};
use std::sync::Arc;

use crate::state::{AppState, BoardView};

/// Current board.
///
/// GET /api/board
pub async fn get_board(State(state): State<Arc<AppState>>) -> Json<BoardView> {
    Json(state.board_view().await)
}
