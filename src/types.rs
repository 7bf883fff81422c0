use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Opaque ID types for type safety
pub type GameId = String;
pub type CategoryId = u64;
pub type ClueId = u64;

/// Point value shown for clues the provider returns without one
pub const DEFAULT_CLUE_VALUE: u32 = 1000;

/// Phase of the active clue display
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RevealMode {
    Idle,
    ShowingQuestion,
    ShowingAnswer,
    GameOver,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of distinct categories on the board
    pub category_count: usize,
    /// Maximum clues shown per category
    pub clues_per_category: usize,
    /// How many candidate categories to request before sampling
    pub category_pool_size: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            category_count: 6,
            clues_per_category: 5,
            category_pool_size: 100,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    /// Total clues available upstream
    #[serde(default)]
    pub clues_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Clue {
    pub id: ClueId,
    pub question: String,
    pub answer: String,
    #[serde(default)]
    pub value: Option<u32>,
}

impl Clue {
    pub fn display_value(&self) -> u32 {
        self.value.unwrap_or(DEFAULT_CLUE_VALUE)
    }
}

/// The clues dealt for one category, fixed at fetch time
#[derive(Debug, Clone)]
pub struct CategoryClueSet {
    clue_ids: Vec<ClueId>,
    clues_by_id: HashMap<ClueId, Clue>,
    viewed: HashSet<ClueId>,
}

impl CategoryClueSet {
    /// Build from the provider's clue list, keeping the first `cap` entries in order.
    /// Repeated clue ids keep their first occurrence.
    pub fn from_clues(clues: Vec<Clue>, cap: usize) -> Self {
        let mut clue_ids = Vec::new();
        let mut clues_by_id = HashMap::new();

        for clue in clues.into_iter().take(cap) {
            if clues_by_id.contains_key(&clue.id) {
                tracing::warn!("Duplicate clue id {} in category, skipping", clue.id);
                continue;
            }
            clue_ids.push(clue.id);
            clues_by_id.insert(clue.id, clue);
        }

        Self {
            clue_ids,
            clues_by_id,
            viewed: HashSet::new(),
        }
    }

    pub fn clue_ids(&self) -> &[ClueId] {
        &self.clue_ids
    }

    pub fn clue(&self, id: ClueId) -> Option<&Clue> {
        self.clues_by_id.get(&id)
    }

    /// Clues in board order
    pub fn clues(&self) -> impl Iterator<Item = &Clue> {
        self.clue_ids
            .iter()
            .filter_map(move |id| self.clues_by_id.get(id))
    }

    pub fn len(&self) -> usize {
        self.clue_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clue_ids.is_empty()
    }

    pub fn viewed_count(&self) -> usize {
        self.viewed.len()
    }

    pub fn is_viewed(&self, id: ClueId) -> bool {
        self.viewed.contains(&id)
    }

    pub fn is_exhausted(&self) -> bool {
        self.viewed.len() == self.clue_ids.len()
    }

    /// Mark a clue as viewed. Returns false if it is unknown or already viewed.
    pub(crate) fn mark_viewed(&mut self, id: ClueId) -> bool {
        if !self.clues_by_id.contains_key(&id) {
            return false;
        }
        self.viewed.insert(id)
    }
}
