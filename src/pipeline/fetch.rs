// src/pipeline/fetch.rs
// =============================================================================
// Resolves the repositories that make up the gallery.
//
// Two modes:
// - Featured (fixed list): one request per name. A failed request turns into
//   a placeholder record, so every requested name is always represented.
// - Recent: one listing request. If that fails there is nothing to fall back
//   to, so the error goes back to the caller. Successful listings are ranked.
// =============================================================================

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::github::{FetchError, RepoSource, RepositorySummary};

/// How many repositories the recent listing keeps after ranking
pub const RECENT_LIMIT: usize = 6;

/// Where a project's summary came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectOrigin {
    Live,
    Placeholder,
}

/// Fetches one named repository, substituting a placeholder on any failure.
pub async fn resolve_repo<S: RepoSource + ?Sized>(
    source: &S,
    owner: &str,
    name: &str,
    now: DateTime<Utc>,
) -> (RepositorySummary, ProjectOrigin) {
    match source.fetch_repo(name).await {
        Ok(repo) => (repo, ProjectOrigin::Live),
        Err(e) => {
            tracing::warn!(repo = %name, error = %e, "using placeholder for repository");
            (
                RepositorySummary::placeholder(owner, name, now),
                ProjectOrigin::Placeholder,
            )
        }
    }
}

/// Fetches the user's recently updated repositories and ranks them.
pub async fn fetch_recent<S: RepoSource + ?Sized>(
    source: &S,
    per_page: u8,
) -> Result<Vec<RepositorySummary>, FetchError> {
    let repos = source.list_recent(per_page).await?;
    tracing::info!(count = repos.len(), "fetched repository listing");
    Ok(rank_recent(repos))
}

/// Drops forks, orders by score (highest first), keeps RECENT_LIMIT.
///
/// The sort is stable, so equal scores keep the API's order.
pub fn rank_recent(repos: Vec<RepositorySummary>) -> Vec<RepositorySummary> {
    let mut candidates: Vec<RepositorySummary> =
        repos.into_iter().filter(|repo| !repo.fork).collect();

    candidates.sort_by(|a, b| score(b).total_cmp(&score(a)));
    candidates.truncate(RECENT_LIMIT);
    candidates
}

/// 2 for a description, 0.5 per star, 1 for a declared language.
pub fn score(repo: &RepositorySummary) -> f64 {
    let description = if repo.description_text().is_some() { 2.0 } else { 0.0 };
    let language = if repo.language_name().is_some() { 1.0 } else { 0.0 };
    description + 0.5 * repo.stargazers_count as f64 + language
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{repo, StubSource};

    #[test]
    fn test_score_example() {
        let mut a = repo("a");
        a.description = Some("has one".to_string());
        a.stargazers_count = 10;
        a.language = Some("Rust".to_string());

        let mut b = repo("b");
        b.stargazers_count = 100;

        assert_eq!(score(&a), 8.0);
        assert_eq!(score(&b), 50.0);

        let ranked = rank_recent(vec![a, b]);
        assert_eq!(ranked[0].name, "b");
        assert_eq!(ranked[1].name, "a");
    }

    #[test]
    fn test_forks_are_excluded() {
        let mut forked = repo("forked");
        forked.fork = true;
        forked.stargazers_count = 1000;

        let ranked = rank_recent(vec![forked, repo("mine")]);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].name, "mine");
    }

    #[test]
    fn test_truncates_to_limit_and_keeps_order_on_ties() {
        let repos: Vec<_> = (0..10).map(|i| repo(&format!("r{i}"))).collect();
        let ranked = rank_recent(repos);
        let names: Vec<_> = ranked.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["r0", "r1", "r2", "r3", "r4", "r5"]);
    }

    #[tokio::test]
    async fn test_resolve_repo_live_and_placeholder() {
        let source = StubSource::new().with_repo(repo("present"));
        let now = Utc::now();

        let (live, origin) = resolve_repo(&source, "octo", "present", now).await;
        assert_eq!(origin, ProjectOrigin::Live);
        assert_eq!(live.name, "present");

        let (placeholder, origin) = resolve_repo(&source, "octo", "missing-repo", now).await;
        assert_eq!(origin, ProjectOrigin::Placeholder);
        assert_eq!(placeholder.description.as_deref(), Some("missing repo project"));
        assert_eq!(placeholder.stargazers_count, 0);
    }

    #[tokio::test]
    async fn test_fetch_recent_surfaces_listing_failure() {
        let source = StubSource::new();
        let result = fetch_recent(&source, 30).await;
        assert!(matches!(result, Err(FetchError::Status { status: 503, .. })));
    }

    #[tokio::test]
    async fn test_fetch_recent_ranks_listing() {
        let mut starred = repo("starred");
        starred.stargazers_count = 40;
        let source = StubSource::new().with_listing(vec![repo("plain"), starred]);

        let ranked = fetch_recent(&source, 30).await.unwrap();
        assert_eq!(ranked[0].name, "starred");
    }
}
