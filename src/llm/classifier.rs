use std::sync::Arc;

use crate::llm::heuristics::resolve_repo_type;
use crate::llm::provider::Summarizer;
use crate::models::{Classification, Repository, RepoType};

/// Shown when no AI credential is configured.
const NO_CREDENTIAL_GUIDANCE: &str = "AI summary not available: no API key configured.";
/// Shown when the AI call or its response parsing failed.
const FAILED_GUIDANCE: &str =
    "AI summary failed. Refer to the GitHub repository for installation and usage instructions.";

/// Produces the summary and structural classification for one repository.
///
/// Infallible by contract: whatever the provider does, the result carries all
/// three enrichment fields and a canonical `repo_type`.
pub struct Classifier {
    provider: Option<Arc<dyn Summarizer>>,
}

impl Classifier {
    pub fn new(provider: Option<Arc<dyn Summarizer>>) -> Self {
        Self { provider }
    }

    pub async fn classify(&self, repo: &Repository, readme: &str) -> Classification {
        let description = repo.description.as_deref().unwrap_or("");

        let mut classification = match &self.provider {
            None => Classification {
                what_it_does: description.to_string(),
                how_to_use: NO_CREDENTIAL_GUIDANCE.to_string(),
                repo_type: RepoType::Unknown,
            },
            Some(provider) => match provider.summarize(readme, description).await {
                Ok(c) => c,
                Err(e) => {
                    tracing::warn!("{} summary failed for {}: {}", provider.name(), repo.full_name(), e);
                    Classification {
                        what_it_does: if description.is_empty() {
                            "No description available".to_string()
                        } else {
                            description.to_string()
                        },
                        how_to_use: FAILED_GUIDANCE.to_string(),
                        repo_type: RepoType::Unknown,
                    }
                }
            },
        };

        // The heuristic resolves both the absent-key and the literal
        // "Unknown" cases; persisted records never carry Unknown.
        if classification.repo_type == RepoType::Unknown {
            classification.repo_type = resolve_repo_type(
                &repo.name,
                description,
                readme,
                repo.language.as_deref().unwrap_or(""),
            );
        }

        classification
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::models::RepositoryOwner;
    use async_trait::async_trait;

    fn repo(name: &str, description: Option<&str>) -> Repository {
        Repository {
            name: name.to_string(),
            owner: RepositoryOwner {
                login: "acme".to_string(),
            },
            description: description.map(String::from),
            html_url: format!("https://github.com/acme/{}", name),
            topics: vec![],
            language: None,
            stargazers_count: 0,
            forks_count: 0,
            open_issues_count: 0,
            updated_at: None,
            license: None,
        }
    }

    struct FailingSummarizer;

    #[async_trait]
    impl Summarizer for FailingSummarizer {
        async fn summarize(&self, _readme: &str, _description: &str) -> Result<Classification> {
            Err(Error::AiApi("quota exceeded".to_string()))
        }

        fn name(&self) -> &str {
            "Failing"
        }
    }

    struct UnknownSummarizer;

    #[async_trait]
    impl Summarizer for UnknownSummarizer {
        async fn summarize(&self, _readme: &str, _description: &str) -> Result<Classification> {
            Ok(Classification {
                what_it_does: "summarized".to_string(),
                how_to_use: "pip install it".to_string(),
                repo_type: RepoType::Unknown,
            })
        }

        fn name(&self) -> &str {
            "Unknown"
        }
    }

    #[tokio::test]
    async fn no_credential_fallback_is_deterministic() {
        let classifier = Classifier::new(None);
        let repo = repo("thing", Some("Does a thing"));

        for _ in 0..3 {
            let c = classifier.classify(&repo, "").await;
            assert_eq!(c.what_it_does, "Does a thing");
            assert_eq!(c.how_to_use, NO_CREDENTIAL_GUIDANCE);
        }
    }

    #[tokio::test]
    async fn provider_failure_degrades_without_erroring() {
        let classifier = Classifier::new(Some(Arc::new(FailingSummarizer)));
        let repo = repo("thing", None);

        let c = classifier.classify(&repo, "").await;
        assert_eq!(c.what_it_does, "No description available");
        assert_eq!(c.how_to_use, FAILED_GUIDANCE);
        assert_ne!(c.repo_type, RepoType::Unknown);
    }

    #[tokio::test]
    async fn unknown_from_provider_is_resolved_by_heuristic() {
        let classifier = Classifier::new(Some(Arc::new(UnknownSummarizer)));
        let repo = repo("tgkit", Some("A toolkit for Telegram"));

        let c = classifier.classify(&repo, "").await;
        assert_eq!(c.what_it_does, "summarized");
        assert_eq!(c.repo_type, RepoType::Library);
    }

    #[tokio::test]
    async fn heuristic_default_applies_with_no_signals() {
        let classifier = Classifier::new(None);
        let repo = repo("plain", Some("nothing special"));

        let c = classifier.classify(&repo, "ordinary readme").await;
        assert_eq!(c.repo_type, RepoType::Application);
    }
}
