use rand::rngs::StdRng;
use rand::SeedableRng;

use super::{AppState, BoardView, GameState, SessionError, SessionStatus, TransitionError};
use crate::catalog::load_game;
use crate::protocol::ServerMessage;
use crate::types::{CategoryId, ClueId, RevealMode};

impl AppState {
    /// Deal a fresh board, replacing the previous game once the fetch is done.
    ///
    /// Only one setup may run at a time, and a game still being played
    /// cannot be replaced.
    pub async fn start_or_restart_game(&self) -> Result<BoardView, SessionError> {
        {
            let mut session = self.session.write().await;
            if session.status == SessionStatus::Loading {
                return Err(SessionError::SetupInFlight);
            }
            if session.game.as_ref().is_some_and(|g| !g.is_over()) {
                return Err(SessionError::GameInProgress);
            }
            session.status = SessionStatus::Loading;
        }
        tracing::info!("Setting up a new game");
        self.broadcast_board().await;

        let mut rng = StdRng::from_rng(&mut rand::rng());
        let result = load_game(self.catalog.as_ref(), &self.config, &mut rng).await;

        let outcome = {
            let mut session = self.session.write().await;
            match result {
                Ok(game) => {
                    session.game = Some(game);
                    session.status = SessionStatus::Ready;
                    Ok(BoardView::new(&session.status, session.game.as_ref()))
                }
                Err(e) => {
                    tracing::error!("Game setup failed: {}", e);
                    session.game = None;
                    session.status = SessionStatus::Failed {
                        reason: e.to_string(),
                    };
                    Err(SessionError::Setup(e))
                }
            }
        };

        self.broadcast_board().await;
        outcome
    }

    /// Reveal a clue on the live board
    pub async fn select_clue(
        &self,
        category_id: CategoryId,
        clue_id: ClueId,
    ) -> Result<BoardView, SessionError> {
        self.apply(|game| game.select_clue(category_id, clue_id))
            .await
    }

    /// Step the active clue forward
    pub async fn advance(&self) -> Result<BoardView, SessionError> {
        self.apply(|game| game.advance()).await
    }

    async fn apply<F>(&self, transition: F) -> Result<BoardView, SessionError>
    where
        F: FnOnce(&mut GameState) -> Result<RevealMode, TransitionError>,
    {
        let view = {
            let mut session = self.session.write().await;
            if session.status == SessionStatus::Loading {
                return Err(SessionError::SetupInFlight);
            }
            let game = session.game.as_mut().ok_or(SessionError::NoGame)?;

            if let Err(e) = transition(game) {
                tracing::debug!("Rejected transition: {}", e);
                return Err(e.into());
            }
            BoardView::new(&session.status, session.game.as_ref())
        };

        self.broadcast_to_all(ServerMessage::Board {
            board: view.clone(),
        });
        Ok(view)
    }
}
