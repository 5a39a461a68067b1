use crate::models::RepoType;

const LIBRARY_SIGNALS: [&str; 9] = [
    "wrapper",
    "library",
    "api-client",
    "sdk",
    "framework",
    "for developers",
    "binding",
    "client for",
    "toolkit",
];

const APPLICATION_SIGNALS: [&str; 7] = [
    "bot for",
    "ready to use",
    "run with",
    "deployment",
    "docker-compose",
    "self-hosted",
    "personal bot",
];

/// Keyword fallback used when the AI classification is missing or `Unknown`.
/// Library signals take precedence when both kinds match; the default is
/// `Application/Bot`. Never returns `Unknown`.
pub fn resolve_repo_type(
    name: &str,
    description: &str,
    readme: &str,
    language: &str,
) -> RepoType {
    let text = format!("{} {} {}", name, description, readme).to_lowercase();

    if LIBRARY_SIGNALS.iter().any(|k| text.contains(k)) {
        return RepoType::Library;
    }
    if APPLICATION_SIGNALS.iter().any(|k| text.contains(k)) {
        return RepoType::Application;
    }

    // Python repos that ship packaging files read like libraries even when
    // none of the generic signals appear.
    if language == "Python" && (readme.contains("setup.py") || readme.contains("pyproject.toml")) {
        return RepoType::Library;
    }

    RepoType::Application
}
