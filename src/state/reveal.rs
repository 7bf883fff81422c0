//! Clue reveal flow
//!
//! Idle -> ShowingQuestion -> ShowingAnswer -> Idle, until the last answer
//! leads to GameOver. Rejected events leave the game untouched.

use super::board::{ActiveClue, GameState};
use crate::types::{CategoryId, ClueId, RevealMode};

/// Why an event was rejected
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    #[error("Game is over")]
    GameOver,

    #[error("A clue is already being shown ({0:?})")]
    ClueActive(RevealMode),

    #[error("No clue is being shown")]
    NoActiveClue,

    #[error("Category {0} is not on the board")]
    UnknownCategory(CategoryId),

    #[error("Clue {clue_id} not found in category {category_id}")]
    UnknownClue {
        category_id: CategoryId,
        clue_id: ClueId,
    },

    #[error("Clue {clue_id} in category {category_id} was already viewed")]
    AlreadyViewed {
        category_id: CategoryId,
        clue_id: ClueId,
    },
}

impl GameState {
    /// Reveal a clue's question. Only allowed while idle, once per clue.
    ///
    /// The category counts as completed as soon as its last clue is selected.
    pub fn select_clue(
        &mut self,
        category_id: CategoryId,
        clue_id: ClueId,
    ) -> Result<RevealMode, TransitionError> {
        match self.mode {
            RevealMode::Idle => {}
            RevealMode::GameOver => return Err(TransitionError::GameOver),
            mode => return Err(TransitionError::ClueActive(mode)),
        }

        let clues = self
            .clue_sets
            .get_mut(&category_id)
            .ok_or(TransitionError::UnknownCategory(category_id))?;

        if clues.clue(clue_id).is_none() {
            return Err(TransitionError::UnknownClue {
                category_id,
                clue_id,
            });
        }
        if !clues.mark_viewed(clue_id) {
            return Err(TransitionError::AlreadyViewed {
                category_id,
                clue_id,
            });
        }

        if clues.is_exhausted() {
            self.categories_completed += 1;
            tracing::debug!(
                "Category {} completed ({}/{})",
                category_id,
                self.categories_completed,
                self.category_ids.len()
            );
        }

        self.active = Some(ActiveClue {
            category_id,
            clue_id,
        });
        self.mode = RevealMode::ShowingQuestion;
        self.version += 1;

        tracing::info!("Showing clue {} of category {}", clue_id, category_id);
        Ok(self.mode)
    }

    /// Move the active clue forward: question to answer, answer to idle or game over
    pub fn advance(&mut self) -> Result<RevealMode, TransitionError> {
        match self.mode {
            RevealMode::Idle => return Err(TransitionError::NoActiveClue),
            RevealMode::GameOver => return Err(TransitionError::GameOver),
            RevealMode::ShowingQuestion => {
                self.mode = RevealMode::ShowingAnswer;
            }
            RevealMode::ShowingAnswer => {
                if self.all_categories_completed() {
                    self.mode = RevealMode::GameOver;
                    tracing::info!("Game {} over", self.id);
                } else {
                    self.active = None;
                    self.mode = RevealMode::Idle;
                }
            }
        }

        self.version += 1;
        Ok(self.mode)
    }
}
