use std::sync::Arc;

use indicatif::{ProgressBar, ProgressStyle};

use crate::config::SyncConfig;
use crate::error::Result;
use crate::github::RepoSource;
use crate::llm::Classifier;
use crate::models::BotRecord;
use crate::storage::Persistence;
use crate::sync::assembler::assemble;

/// Drives one batch: search, then per candidate fetch the README, classify,
/// assemble and persist. Strictly sequential; the pacing sleeps and external
/// rate limits make fan-out counterproductive here.
pub struct SyncOrchestrator {
    source: Arc<dyn RepoSource>,
    classifier: Classifier,
    persistence: Persistence,
    config: SyncConfig,
}

impl SyncOrchestrator {
    pub fn new(
        source: Arc<dyn RepoSource>,
        classifier: Classifier,
        persistence: Persistence,
        config: SyncConfig,
    ) -> Self {
        Self {
            source,
            classifier,
            persistence,
            config,
        }
    }

    /// Runs a full batch and returns the accumulated records.
    ///
    /// Every sub-step degrades rather than fails, so a single repository can
    /// never abort the batch. The whole accumulated list is re-persisted
    /// after each item; an interruption mid-batch leaves durable state
    /// covering everything processed so far. Quadratic write volume across a
    /// batch, acceptable at tens of items per run.
    pub async fn run(
        &self,
        query_override: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<BotRecord>> {
        let query = query_override.unwrap_or(&self.config.query);
        let mut candidates = self.source.search(query, self.config.page_size).await;

        if let Some(limit) = limit {
            candidates.truncate(limit);
        }
        tracing::info!("Processing {} candidates", candidates.len());

        let pb = ProgressBar::new(candidates.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template(
                    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} repos",
                )
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );

        let mut results = Vec::with_capacity(candidates.len());

        for repo in &candidates {
            tracing::info!("Processing {}", repo.full_name());

            let readme = self.source.readme(&repo.owner.login, &repo.name).await;
            let classification = self.classifier.classify(repo, &readme).await;
            results.push(assemble(repo, classification));

            // Full rewrite of both tiers after every item, so a crash or an
            // external time-limit cutoff loses nothing already processed.
            self.persistence.persist(&results);

            pb.inc(1);
            tokio::time::sleep(self.config.item_delay).await;
        }

        pb.finish_and_clear();
        tracing::info!("Batch done: {} records synced", results.len());
        Ok(results)
    }
}
