use crate::state::BoardView;
use crate::types::{CategoryId, ClueId};
use serde::{Deserialize, Serialize};

/// Protocol version sent in the welcome message
pub const PROTOCOL_VERSION: &str = "1.0";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Deal a new board (play / restart control)
    StartGame,
    SelectClue {
        category_id: CategoryId,
        clue_id: ClueId,
    },
    /// Question to answer, answer to board
    Advance,
    /// Ask for the current board without changing anything
    Sync,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "t", rename_all = "snake_case")]
pub enum ServerMessage {
    Welcome {
        protocol: String,
        board: BoardView,
        server_now: String,
    },
    Board {
        board: BoardView,
    },
    Error {
        code: String,
        msg: String,
    },
}
