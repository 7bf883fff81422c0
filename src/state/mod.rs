mod board;
mod reveal;
mod session;
mod view;

pub use board::{ActiveClue, GameState};
pub use reveal::TransitionError;
pub use view::{ActiveClueView, BoardView, CategoryView, ClueView};

use crate::catalog::{CatalogProvider, SetupError};
use crate::protocol::ServerMessage;
use crate::types::GameConfig;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

/// Where the session is in its setup lifecycle
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionStatus {
    /// No game has been requested yet
    Empty,
    /// A setup is fetching the catalog
    Loading,
    Ready,
    Failed { reason: String },
}

/// The live game and its setup status, swapped together
#[derive(Debug)]
pub struct Session {
    pub status: SessionStatus,
    pub game: Option<GameState>,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum SessionError {
    #[error("A game setup is already in progress")]
    SetupInFlight,

    #[error("A game is in progress")]
    GameInProgress,

    #[error("No game in progress")]
    NoGame,

    #[error(transparent)]
    Setup(#[from] SetupError),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}

impl SessionError {
    /// Stable code for protocol errors
    pub fn code(&self) -> &'static str {
        match self {
            SessionError::SetupInFlight => "SETUP_IN_FLIGHT",
            SessionError::GameInProgress => "GAME_IN_PROGRESS",
            SessionError::NoGame => "NO_GAME",
            SessionError::Setup(_) => "SETUP_FAILED",
            SessionError::Transition(_) => "INVALID_TRANSITION",
        }
    }
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub session: Arc<RwLock<Session>>,
    pub catalog: Arc<dyn CatalogProvider>,
    pub config: GameConfig,
    /// Broadcast channel for board updates to all clients
    pub broadcast: broadcast::Sender<ServerMessage>,
}

impl AppState {
    pub fn new(catalog: Arc<dyn CatalogProvider>, config: GameConfig) -> Self {
        let (tx, _rx) = broadcast::channel(100);
        Self {
            session: Arc::new(RwLock::new(Session {
                status: SessionStatus::Empty,
                game: None,
            })),
            catalog,
            config,
            broadcast: tx,
        }
    }

    /// Current board snapshot
    pub async fn board_view(&self) -> BoardView {
        let session = self.session.read().await;
        BoardView::new(&session.status, session.game.as_ref())
    }

    /// Send a message to every connected client
    pub fn broadcast_to_all(&self, msg: ServerMessage) {
        // No receivers connected is fine
        let _ = self.broadcast.send(msg);
    }

    async fn broadcast_board(&self) {
        let board = self.board_view().await;
        self.broadcast_to_all(ServerMessage::Board { board });
    }
}
