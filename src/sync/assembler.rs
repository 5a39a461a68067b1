use chrono::SecondsFormat;

use crate::models::{BotRecord, Classification, Repository, RepoType};

const DEFAULT_WHAT_IT_DOES: &str = "No description available";
const DEFAULT_HOW_TO_USE: &str = "Refer to the GitHub repository for setup instructions.";

/// Merges a raw descriptor and its classification into the canonical record.
/// Pure and total: missing optional fields default, enrichment fields are
/// always populated.
pub fn assemble(repo: &Repository, classification: Classification) -> BotRecord {
    let description = repo.description.clone();

    let what_it_does = if classification.what_it_does.trim().is_empty() {
        description
            .clone()
            .unwrap_or_else(|| DEFAULT_WHAT_IT_DOES.to_string())
    } else {
        classification.what_it_does
    };

    let how_to_use = if classification.how_to_use.trim().is_empty() {
        DEFAULT_HOW_TO_USE.to_string()
    } else {
        classification.how_to_use
    };

    // The classifier already resolves Unknown through the heuristic; this is
    // the last-resort default the record contract promises.
    let repo_type = match classification.repo_type {
        RepoType::Unknown => RepoType::Application,
        other => other,
    };

    BotRecord {
        name: repo.name.clone(),
        author: repo.owner.login.clone(),
        full_name: repo.full_name(),
        description,
        link: repo.html_url.clone(),
        category: repo.topics.join(", "),
        language: repo.language.clone(),
        stars: repo.stargazers_count,
        forks: repo.forks_count,
        open_issues: repo.open_issues_count,
        last_updated: repo
            .updated_at
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_default(),
        license: repo
            .license
            .as_ref()
            .and_then(|l| l.name.clone())
            .unwrap_or_else(|| "None".to_string()),
        repo_type,
        what_it_does,
        how_to_use,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{License, RepositoryOwner};

    fn descriptor() -> Repository {
        Repository {
            name: "tgbot".to_string(),
            owner: RepositoryOwner {
                login: "acme".to_string(),
            },
            description: Some("A wrapper for Telegram".to_string()),
            html_url: "https://github.com/acme/tgbot".to_string(),
            topics: vec!["telegram".to_string(), "sdk".to_string()],
            language: Some("Python".to_string()),
            stargazers_count: 42,
            forks_count: 7,
            open_issues_count: 3,
            updated_at: None,
            license: None,
        }
    }

    #[test]
    fn builds_identity_category_and_license_defaults() {
        let record = assemble(&descriptor(), Classification::default());

        assert_eq!(record.full_name, "acme/tgbot");
        assert_eq!(record.category, "telegram, sdk");
        assert_eq!(record.license, "None");
        assert_eq!(record.stars, 42);
    }

    #[test]
    fn empty_enrichment_falls_back_to_description_and_guidance() {
        let record = assemble(&descriptor(), Classification::default());

        assert_eq!(record.what_it_does, "A wrapper for Telegram");
        assert_eq!(record.how_to_use, DEFAULT_HOW_TO_USE);
    }

    #[test]
    fn no_description_at_all_still_fills_enrichment() {
        let mut repo = descriptor();
        repo.description = None;

        let record = assemble(&repo, Classification::default());
        assert_eq!(record.description, None);
        assert_eq!(record.what_it_does, DEFAULT_WHAT_IT_DOES);
    }

    #[test]
    fn unknown_repo_type_defaults_to_application() {
        let record = assemble(&descriptor(), Classification::default());
        assert_eq!(record.repo_type, RepoType::Application);
    }

    #[test]
    fn named_license_is_copied_through() {
        let mut repo = descriptor();
        repo.license = Some(License {
            name: Some("MIT License".to_string()),
        });

        let record = assemble(&repo, Classification::default());
        assert_eq!(record.license, "MIT License");
    }

    #[test]
    fn classifier_output_wins_over_fallbacks() {
        let record = assemble(
            &descriptor(),
            Classification {
                what_it_does: "Wraps the Bot API".to_string(),
                how_to_use: "pip install tgbot".to_string(),
                repo_type: RepoType::Library,
            },
        );

        assert_eq!(record.what_it_does, "Wraps the Bot API");
        assert_eq!(record.how_to_use, "pip install tgbot");
        assert_eq!(record.repo_type, RepoType::Library);
    }
}
