use std::env;
use std::time::Duration;

/// Process configuration, read once from the environment.
///
/// Both credentials are optional: a missing GitHub token degrades the search
/// client to unauthenticated rate limits, and a missing Gemini key switches
/// the classifier to its deterministic fallback. Neither is an error.
#[derive(Debug, Clone)]
pub struct Config {
    pub github_token: Option<String>,
    pub gemini_api_key: Option<String>,
    pub database_path: Option<String>,
    pub snapshot_base: String,
    pub search_query: String,
    pub page_size: u32,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            github_token: env::var("GITHUB_TOKEN").ok().filter(|v| !v.is_empty()),
            gemini_api_key: env::var("GEMINI_API_KEY").ok().filter(|v| !v.is_empty()),
            database_path: env::var("DATABASE_PATH").ok().filter(|v| !v.is_empty()),
            snapshot_base: env::var("SNAPSHOT_BASE").unwrap_or_else(|_| "bots_data".to_string()),
            search_query: env::var("SEARCH_QUERY").unwrap_or_else(|_| "telegram bot".to_string()),
            page_size: env::var("PAGE_SIZE")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(10),
        }
    }
}

/// Knobs for a single sync batch.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub query: String,
    pub page_size: u32,
    /// Unconditional sleep after each item is persisted.
    pub item_delay: Duration,
}

impl SyncConfig {
    pub fn new(query: impl Into<String>, page_size: u32) -> Self {
        Self {
            query: query.into(),
            page_size,
            item_delay: Duration::from_secs(5),
        }
    }

    pub fn without_delays(mut self) -> Self {
        self.item_delay = Duration::ZERO;
        self
    }
}

impl From<&Config> for SyncConfig {
    fn from(config: &Config) -> Self {
        Self::new(config.search_query.clone(), config.page_size)
    }
}
