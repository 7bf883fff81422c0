//! Server configuration from environment variables

use std::time::Duration;

use crate::catalog::DEFAULT_API_URL;
use crate::types::GameConfig;

/// Port the server listens on unless PORT is set
pub const DEFAULT_PORT: u16 = 6573;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the clue API
    pub api_url: String,
    /// Timeout for each provider request
    pub fetch_timeout: Duration,
    pub port: u16,
    pub game: GameConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            fetch_timeout: Duration::from_secs(10),
            port: DEFAULT_PORT,
            game: GameConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// JEOPARDY_API_URL, CATEGORY_COUNT, CLUES_PER_CATEGORY, CATEGORY_POOL_SIZE,
    /// FETCH_TIMEOUT (seconds) and PORT. Missing or invalid values use defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let api_url = env_string("JEOPARDY_API_URL").unwrap_or(defaults.api_url);

        let game = GameConfig {
            category_count: env_count("CATEGORY_COUNT")
                .unwrap_or(defaults.game.category_count),
            clues_per_category: env_count("CLUES_PER_CATEGORY")
                .unwrap_or(defaults.game.clues_per_category),
            category_pool_size: env_count("CATEGORY_POOL_SIZE")
                .unwrap_or(defaults.game.category_pool_size),
        };

        if game.category_pool_size < game.category_count {
            tracing::warn!(
                "CATEGORY_POOL_SIZE ({}) is smaller than CATEGORY_COUNT ({}), setup will fail",
                game.category_pool_size,
                game.category_count
            );
        }

        Self {
            api_url,
            fetch_timeout: env_string("FETCH_TIMEOUT")
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.fetch_timeout),
            port: env_string("PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            game,
        }
    }
}

/// Trimmed, non-empty value of an environment variable
fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

/// Positive count from an environment variable
fn env_count(key: &str) -> Option<usize> {
    let raw = env_string(key)?;
    match raw.parse::<usize>() {
        Ok(0) => {
            tracing::warn!("{} must be at least 1, using default", key);
            None
        }
        Ok(n) => Some(n),
        Err(_) => {
            tracing::warn!("Invalid {} value '{}', using default", key, raw);
            None
        }
    }
}
