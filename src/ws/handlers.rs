//! WebSocket message dispatch
//!
//! Maps client commands 1:1 onto the session commands and turns the outcome
//! into a reply for the sender. Board changes are also broadcast by the session.

use crate::protocol::{ClientMessage, ServerMessage};
use crate::state::{AppState, BoardView, SessionError};
use std::sync::Arc;

/// Handle a client message and build the reply for the sender
pub async fn handle_message(msg: ClientMessage, state: &Arc<AppState>) -> ServerMessage {
    let result = match msg {
        ClientMessage::StartGame => state.start_or_restart_game().await,
        ClientMessage::SelectClue {
            category_id,
            clue_id,
        } => state.select_clue(category_id, clue_id).await,
        ClientMessage::Advance => state.advance().await,
        ClientMessage::Sync => Ok(state.board_view().await),
    };

    reply(result)
}

fn reply(result: Result<BoardView, SessionError>) -> ServerMessage {
    match result {
        Ok(board) => ServerMessage::Board { board },
        Err(e) => {
            tracing::info!("Command rejected: {}", e);
            ServerMessage::Error {
                code: e.code().to_string(),
                msg: e.to_string(),
            }
        }
    }
}
