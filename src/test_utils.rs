// src/test_utils.rs
// =============================================================================
// In-memory RepoSource used by the pipeline tests.
//
// Repositories and READMEs that were not registered answer with HTTP 404,
// and the listing answers with HTTP 503 unless one was provided.
// =============================================================================

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::github::{FetchError, RepoSource, RepositorySummary};

/// A live-looking repository with no description, language or stars.
pub fn repo(name: &str) -> RepositorySummary {
    RepositorySummary {
        name: name.to_string(),
        html_url: format!("https://github.com/octo/{}", name),
        description: None,
        language: None,
        stargazers_count: 0,
        forks_count: 0,
        updated_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        homepage: None,
        has_pages: false,
        fork: false,
        default_branch: "main".to_string(),
    }
}

#[derive(Default)]
pub struct StubSource {
    repos: HashMap<String, RepositorySummary>,
    readmes: HashMap<String, String>,
    listing: Option<Vec<RepositorySummary>>,
    pub readme_requests: AtomicUsize,
}

impl StubSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_repo(mut self, repo: RepositorySummary) -> Self {
        self.repos.insert(repo.name.clone(), repo);
        self
    }

    pub fn with_readme(mut self, name: &str, text: &str) -> Self {
        self.readmes.insert(name.to_string(), text.to_string());
        self
    }

    pub fn with_listing(mut self, repos: Vec<RepositorySummary>) -> Self {
        self.listing = Some(repos);
        self
    }
}

fn not_found(path: String) -> FetchError {
    FetchError::Status {
        url: path,
        status: 404,
    }
}

#[async_trait]
impl RepoSource for StubSource {
    async fn fetch_repo(&self, name: &str) -> Result<RepositorySummary, FetchError> {
        self.repos
            .get(name)
            .cloned()
            .ok_or_else(|| not_found(format!("/repos/octo/{}", name)))
    }

    async fn list_recent(&self, _per_page: u8) -> Result<Vec<RepositorySummary>, FetchError> {
        self.listing.clone().ok_or(FetchError::Status {
            url: "/users/octo/repos".to_string(),
            status: 503,
        })
    }

    async fn fetch_readme(&self, name: &str) -> Result<String, FetchError> {
        self.readme_requests.fetch_add(1, Ordering::SeqCst);
        self.readmes
            .get(name)
            .cloned()
            .ok_or_else(|| not_found(format!("/repos/octo/{}/readme", name)))
    }
}
