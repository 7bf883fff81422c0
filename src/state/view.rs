//! Board snapshot handed to the presentation layer.
//!
//! Everything a client renders is derived from here; clients keep no
//! parallel flags of their own.

use serde::{Deserialize, Serialize};

use super::board::GameState;
use super::SessionStatus;
use crate::types::*;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClueView {
    pub id: ClueId,
    pub value: u32,
    pub viewed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryView {
    pub id: CategoryId,
    pub title: String,
    pub clues: Vec<ClueView>,
}

/// The clue on screen; `text` is the question or the answer depending on mode
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ActiveClueView {
    pub category_id: CategoryId,
    pub clue_id: ClueId,
    pub value: u32,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoardView {
    pub session: SessionStatus,
    pub game_id: Option<GameId>,
    pub version: u64,
    pub mode: Option<RevealMode>,
    pub categories: Vec<CategoryView>,
    pub active: Option<ActiveClueView>,
    pub categories_completed: usize,
    pub game_over: bool,
    /// Whether the start/restart control should be offered
    pub play_enabled: bool,
}

impl BoardView {
    /// Snapshot of the session, with or without a live game
    pub fn new(session: &SessionStatus, game: Option<&GameState>) -> Self {
        let Some(game) = game else {
            return Self {
                session: session.clone(),
                game_id: None,
                version: 0,
                mode: None,
                categories: Vec::new(),
                active: None,
                categories_completed: 0,
                game_over: false,
                play_enabled: *session != SessionStatus::Loading,
            };
        };

        let categories = game
            .category_ids()
            .iter()
            .filter_map(|id| {
                let category = game.category(*id)?;
                let clues = game.clue_set(*id)?;
                Some(CategoryView {
                    id: category.id,
                    title: category.title.clone(),
                    clues: clues
                        .clues()
                        .map(|clue| ClueView {
                            id: clue.id,
                            value: clue.display_value(),
                            viewed: clues.is_viewed(clue.id),
                        })
                        .collect(),
                })
            })
            .collect();

        let active = match (game.mode(), game.active(), game.active_clue()) {
            (RevealMode::ShowingQuestion, Some(active), Some(clue)) => Some(ActiveClueView {
                category_id: active.category_id,
                clue_id: active.clue_id,
                value: clue.display_value(),
                text: clue.question.clone(),
            }),
            (RevealMode::ShowingAnswer, Some(active), Some(clue)) => Some(ActiveClueView {
                category_id: active.category_id,
                clue_id: active.clue_id,
                value: clue.display_value(),
                text: clue.answer.clone(),
            }),
            _ => None,
        };

        Self {
            session: session.clone(),
            game_id: Some(game.id.clone()),
            version: game.version,
            mode: Some(game.mode()),
            categories,
            active,
            categories_completed: game.categories_completed(),
            game_over: game.is_over(),
            play_enabled: *session != SessionStatus::Loading && game.is_over(),
        }
    }
}
