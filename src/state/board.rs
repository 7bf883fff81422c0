//! Game state model: the dealt board, viewed tracking and the reveal mode

use crate::types::*;
use std::collections::HashMap;

/// Identifies the clue currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveClue {
    pub category_id: CategoryId,
    pub clue_id: ClueId,
}

/// One game session, from a freshly dealt board until game over
#[derive(Debug, Clone)]
pub struct GameState {
    pub id: GameId,
    /// Bumped on every accepted transition
    pub version: u64,
    pub(super) category_ids: Vec<CategoryId>,
    pub(super) categories_by_id: HashMap<CategoryId, Category>,
    pub(super) clue_sets: HashMap<CategoryId, CategoryClueSet>,
    pub(super) categories_completed: usize,
    pub(super) active: Option<ActiveClue>,
    pub(super) mode: RevealMode,
}

impl GameState {
    /// Build an idle game from categories and their dealt clues, in board order.
    ///
    /// A category without clues has nothing left to reveal and counts as
    /// completed immediately.
    pub fn new(board: Vec<(Category, CategoryClueSet)>) -> Self {
        let mut category_ids = Vec::with_capacity(board.len());
        let mut categories_by_id = HashMap::with_capacity(board.len());
        let mut clue_sets = HashMap::with_capacity(board.len());

        for (category, clues) in board {
            if categories_by_id.contains_key(&category.id) {
                tracing::warn!("Category {} dealt twice, keeping the first", category.id);
                continue;
            }
            category_ids.push(category.id);
            clue_sets.insert(category.id, clues);
            categories_by_id.insert(category.id, category);
        }

        let categories_completed = clue_sets.values().filter(|set| set.is_empty()).count();

        Self {
            id: ulid::Ulid::new().to_string(),
            version: 1,
            category_ids,
            categories_by_id,
            clue_sets,
            categories_completed,
            active: None,
            mode: RevealMode::Idle,
        }
    }

    pub fn mode(&self) -> RevealMode {
        self.mode
    }

    pub fn category_ids(&self) -> &[CategoryId] {
        &self.category_ids
    }

    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories_by_id.get(&id)
    }

    pub fn clue_set(&self, id: CategoryId) -> Option<&CategoryClueSet> {
        self.clue_sets.get(&id)
    }

    pub fn categories_completed(&self) -> usize {
        self.categories_completed
    }

    pub fn active(&self) -> Option<ActiveClue> {
        self.active
    }

    /// The clue currently shown, if any
    pub fn active_clue(&self) -> Option<&Clue> {
        let active = self.active?;
        self.clue_sets.get(&active.category_id)?.clue(active.clue_id)
    }

    pub fn is_viewed(&self, category_id: CategoryId, clue_id: ClueId) -> bool {
        self.clue_sets
            .get(&category_id)
            .is_some_and(|set| set.is_viewed(clue_id))
    }

    /// Every category has had all of its clues revealed
    pub fn all_categories_completed(&self) -> bool {
        self.categories_completed == self.category_ids.len()
    }

    pub fn is_over(&self) -> bool {
        self.mode == RevealMode::GameOver
    }

    /// Clues not yet revealed across the whole board
    pub fn remaining_clues(&self) -> usize {
        self.clue_sets
            .values()
            .map(|set| set.len() - set.viewed_count())
            .sum()
    }
}
