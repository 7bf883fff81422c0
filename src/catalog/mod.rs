//! Catalog fetching
//!
//! Pulls a pool of categories from the data provider, samples distinct ones,
//! fetches their clues concurrently and assembles a fresh `GameState`.

mod http;

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;

use crate::state::GameState;
use crate::types::{Category, CategoryClueSet, CategoryId, Clue, GameConfig};

pub use http::{HttpCatalog, DEFAULT_API_URL};

/// Result type for provider operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Errors the data provider can report
#[derive(Debug, Clone, thiserror::Error)]
pub enum CatalogError {
    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Provider returned status {0}")]
    Status(u16),

    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    #[error("Response parsing failed: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Reasons game setup can fail
#[derive(Debug, Clone, thiserror::Error)]
pub enum SetupError {
    #[error("Failed to fetch categories: {0}")]
    Fetch(#[from] CatalogError),

    #[error("Only {available} distinct categories available, {requested} requested")]
    InsufficientPool { requested: usize, available: usize },

    #[error("Loaded clues for {loaded} of {requested} categories")]
    Incomplete { requested: usize, loaded: usize },

    #[error("None of the {0} dealt categories has any clues")]
    NoClues(usize),
}

/// A category together with its full clue list, as returned by the provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDetail {
    pub id: CategoryId,
    pub title: String,
    #[serde(default)]
    pub clues_count: u32,
    #[serde(default)]
    pub clues: Vec<Clue>,
}

/// Read-only source of categories and clues
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// List up to `max_count` candidate categories
    async fn list_categories(&self, max_count: usize) -> CatalogResult<Vec<Category>>;

    /// Get one category with all of its clues
    async fn get_category(&self, id: CategoryId) -> CatalogResult<CategoryDetail>;
}

/// Draw `count` distinct categories uniformly from `pool`.
///
/// Duplicate draws are discarded and retried. The pool is checked up front so
/// the retry loop always terminates.
pub fn sample_distinct<R: Rng + ?Sized>(
    pool: &[Category],
    count: usize,
    rng: &mut R,
) -> Result<Vec<Category>, SetupError> {
    let available = pool.iter().map(|c| c.id).collect::<HashSet<_>>().len();
    if available < count {
        return Err(SetupError::InsufficientPool {
            requested: count,
            available,
        });
    }

    let mut seen = HashSet::with_capacity(count);
    let mut picked = Vec::with_capacity(count);
    while picked.len() < count {
        let candidate = &pool[rng.random_range(0..pool.len())];
        if seen.insert(candidate.id) {
            picked.push(candidate.clone());
        }
    }

    Ok(picked)
}

/// Fetch and assemble a new game.
///
/// Never returns a partial board: any per-category failure is logged and the
/// whole setup is reported as `SetupError::Incomplete`. A board with nothing
/// to reveal could never reach game over, so it fails with `SetupError::NoClues`.
pub async fn load_game<R: Rng + Send>(
    provider: &dyn CatalogProvider,
    config: &GameConfig,
    rng: &mut R,
) -> Result<GameState, SetupError> {
    let pool = provider
        .list_categories(config.category_pool_size)
        .await
        .inspect_err(|e| tracing::error!("Listing categories failed: {}", e))?;

    tracing::debug!("Category pool has {} entries", pool.len());

    let sampled = sample_distinct(&pool, config.category_count, rng).inspect_err(|e| {
        tracing::error!("Cannot sample categories: {}", e);
    })?;

    // Fan out, join_all keeps the sampled order
    let fetches = sampled.iter().map(|category| async move {
        (category.id, provider.get_category(category.id).await)
    });
    let results = futures::future::join_all(fetches).await;

    let mut board = Vec::with_capacity(sampled.len());
    for (category, (id, result)) in sampled.into_iter().zip(results) {
        match result {
            Ok(detail) => {
                let clues = CategoryClueSet::from_clues(detail.clues, config.clues_per_category);
                tracing::debug!(
                    "Category {} ({}) dealt {} clues",
                    id,
                    category.title,
                    clues.len()
                );
                board.push((category, clues));
            }
            Err(e) => {
                tracing::error!("Fetching clues for category {} failed: {}", id, e);
            }
        }
    }

    if board.len() < config.category_count {
        return Err(SetupError::Incomplete {
            requested: config.category_count,
            loaded: board.len(),
        });
    }

    let game = GameState::new(board);
    if game.remaining_clues() == 0 {
        tracing::error!("Dealt board has no clues to play");
        return Err(SetupError::NoClues(game.category_ids().len()));
    }

    tracing::info!(
        "Game {} ready with {} categories",
        game.id,
        game.category_ids().len()
    );
    Ok(game)
}
