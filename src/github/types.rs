// src/github/types.rs
// =============================================================================
// Data shapes returned by the GitHub REST API.
//
// Only the fields the gallery actually renders or ranks on are declared.
// serde ignores every other field in the response, so the structs stay small.
//
// Rust concepts:
// - #[derive(Deserialize)]: serde generates the JSON parsing code
// - Option<T>: fields GitHub may send as null
// - #[serde(default)]: fields GitHub may leave out entirely
// =============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One repository's descriptive attributes, as returned by
/// `GET /repos/{owner}/{name}` and `GET /users/{owner}/repos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepositorySummary {
    pub name: String,
    pub html_url: String,
    pub description: Option<String>,
    pub language: Option<String>,
    #[serde(default)]
    pub stargazers_count: u64,
    #[serde(default)]
    pub forks_count: u64,
    pub updated_at: DateTime<Utc>,
    pub homepage: Option<String>,
    /// Whether the repository publishes a GitHub Pages site
    #[serde(default)]
    pub has_pages: bool,
    #[serde(default)]
    pub fork: bool,
    #[serde(default = "default_branch")]
    pub default_branch: String,
}

fn default_branch() -> String {
    "main".to_string()
}

impl RepositorySummary {
    /// Synthesizes the record shown when the live fetch for `name` fails.
    ///
    /// Counts are zeroed and the description is generated from the name,
    /// so the card still renders.
    pub fn placeholder(owner: &str, name: &str, now: DateTime<Utc>) -> Self {
        RepositorySummary {
            name: name.to_string(),
            html_url: format!("https://github.com/{}/{}", owner, name),
            description: Some(format!("{} project", spaced_name(name))),
            language: None,
            stargazers_count: 0,
            forks_count: 0,
            updated_at: now,
            homepage: None,
            has_pages: false,
            fork: false,
            default_branch: default_branch(),
        }
    }

    /// The description, if it has any visible text.
    pub fn description_text(&self) -> Option<&str> {
        non_blank(self.description.as_deref())
    }

    /// The declared language, if any.
    pub fn language_name(&self) -> Option<&str> {
        non_blank(self.language.as_deref())
    }

    /// The homepage URL, if one is set. The API reports "" for cleared homepages.
    pub fn homepage_url(&self) -> Option<&str> {
        non_blank(self.homepage.as_deref())
    }
}

/// Body of `GET /repos/{owner}/{name}/readme`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReadmeDocument {
    pub content: String,
    #[serde(default)]
    pub encoding: String,
}

/// Replaces the separator characters of a repository name with spaces.
///
/// "game-of_life" -> "game of life"
pub fn spaced_name(name: &str) -> String {
    name.replace(['-', '_'], " ")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_repo() {
        let json = r#"{
            "id": 1,
            "name": "weather-app",
            "html_url": "https://github.com/octo/weather-app",
            "description": "A weather app",
            "language": "Kotlin",
            "stargazers_count": 12,
            "forks_count": 3,
            "updated_at": "2024-05-01T10:00:00Z",
            "homepage": "",
            "has_pages": true,
            "fork": false,
            "default_branch": "master"
        }"#;
        let repo: RepositorySummary = serde_json::from_str(json).unwrap();
        assert_eq!(repo.name, "weather-app");
        assert_eq!(repo.stargazers_count, 12);
        assert_eq!(repo.default_branch, "master");
        assert!(repo.has_pages);
        assert_eq!(repo.homepage_url(), None);
    }

    #[test]
    fn test_missing_optional_fields_default() {
        let json = r#"{
            "name": "x",
            "html_url": "https://github.com/octo/x",
            "description": null,
            "language": null,
            "updated_at": "2024-05-01T10:00:00Z",
            "homepage": null
        }"#;
        let repo: RepositorySummary = serde_json::from_str(json).unwrap();
        assert!(!repo.has_pages);
        assert!(!repo.fork);
        assert_eq!(repo.default_branch, "main");
        assert_eq!(repo.stargazers_count, 0);
    }

    #[test]
    fn test_placeholder_fields() {
        let now = Utc::now();
        let repo = RepositorySummary::placeholder("octo", "my_cool-project", now);
        assert_eq!(repo.html_url, "https://github.com/octo/my_cool-project");
        assert_eq!(repo.description.as_deref(), Some("my cool project project"));
        assert_eq!(repo.stargazers_count, 0);
        assert_eq!(repo.forks_count, 0);
        assert_eq!(repo.updated_at, now);
        assert!(repo.language.is_none());
    }

    #[test]
    fn test_blank_description_is_absent() {
        let mut repo = RepositorySummary::placeholder("octo", "x", Utc::now());
        repo.description = Some("   ".to_string());
        assert_eq!(repo.description_text(), None);
    }
}
