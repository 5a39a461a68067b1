pub mod config;
pub mod error;
pub mod models;
pub mod github;
pub mod llm;
pub mod storage;
pub mod sync;

pub use config::{Config, SyncConfig};
pub use error::{Error, Result};
pub use github::GitHubClient;
pub use llm::{Classifier, GeminiProvider, Summarizer};
pub use storage::Persistence;
pub use sync::SyncOrchestrator;
