use serde::{Deserialize, Serialize};

/// Structural classification of a repository.
///
/// `Unknown` only exists between the AI call and the heuristic fallback; a
/// persisted record always carries one of the two canonical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RepoType {
    Library,
    Application,
    #[default]
    Unknown,
}

impl RepoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepoType::Library => "Library/Module",
            RepoType::Application => "Application/Bot",
            RepoType::Unknown => "Unknown",
        }
    }
}

impl From<String> for RepoType {
    fn from(value: String) -> Self {
        // AI output is free text; anything off-script stays Unknown and gets
        // resolved by the heuristic later.
        match value.trim() {
            "Library/Module" => RepoType::Library,
            "Application/Bot" => RepoType::Application,
            _ => RepoType::Unknown,
        }
    }
}

impl From<RepoType> for String {
    fn from(value: RepoType) -> Self {
        value.as_str().to_string()
    }
}

impl std::fmt::Display for RepoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Summary produced for one repository, AI-generated or fallback.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Classification {
    #[serde(default)]
    pub what_it_does: String,
    #[serde(default)]
    pub how_to_use: String,
    #[serde(default)]
    pub repo_type: RepoType,
}

/// The persisted entity. `full_name` is the unique identity across runs;
/// repeated syncs replace fields in place rather than inserting duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotRecord {
    pub name: String,
    pub author: String,
    pub full_name: String,
    pub description: Option<String>,
    pub link: String,
    pub category: String,
    pub language: Option<String>,
    pub stars: u32,
    pub forks: u32,
    pub open_issues: u32,
    pub last_updated: String,
    pub license: String,
    pub repo_type: RepoType,
    pub what_it_does: String,
    pub how_to_use: String,
}

impl BotRecord {
    /// Field names in declaration order, used as the CSV header row.
    pub const FIELDS: [&'static str; 15] = [
        "name",
        "author",
        "full_name",
        "description",
        "link",
        "category",
        "language",
        "stars",
        "forks",
        "open_issues",
        "last_updated",
        "license",
        "repo_type",
        "what_it_does",
        "how_to_use",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repo_type_round_trips_canonical_values() {
        assert_eq!(RepoType::from("Library/Module".to_string()), RepoType::Library);
        assert_eq!(RepoType::from("Application/Bot".to_string()), RepoType::Application);
        assert_eq!(RepoType::Library.as_str(), "Library/Module");
    }

    #[test]
    fn repo_type_tolerates_off_script_ai_output() {
        assert_eq!(RepoType::from("Framework".to_string()), RepoType::Unknown);
        assert_eq!(RepoType::from("".to_string()), RepoType::Unknown);

        let c: Classification =
            serde_json::from_str(r#"{"what_it_does": "x", "repo_type": "Tool"}"#).unwrap();
        assert_eq!(c.repo_type, RepoType::Unknown);
        assert_eq!(c.how_to_use, "");
    }
}
