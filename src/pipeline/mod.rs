// src/pipeline/mod.rs
// =============================================================================
// The gallery pipeline: fetch -> enrich -> classify.
//
// Submodules:
// - fetch: resolves repositories (featured list or ranked recent listing)
// - media: scans README text for embedded images and videos
//
// Every project runs through its own future (repository fetch, then README).
// join_all drives them concurrently and hands the results back in the order
// the futures were created, which is the order the names were requested in.
// =============================================================================

mod fetch;
mod media;

pub use fetch::{fetch_recent, resolve_repo, ProjectOrigin};
pub use media::{scan_media, MediaKind, MediaReference};

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde::Serialize;
use url::Url;

use crate::classify::{classify, Classification};
use crate::config::GalleryConfig;
use crate::github::{FetchError, RepoSource, RepositorySummary};

/// A repository ready to be rendered as a card
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedProject {
    pub repo: RepositorySummary,
    pub media: Vec<MediaReference>,
    pub classification: Classification,
    pub origin: ProjectOrigin,
}

/// Builds the featured gallery. Always returns one project per name, in order.
pub async fn run_featured<S: RepoSource + ?Sized>(
    source: &S,
    config: &GalleryConfig,
    names: &[String],
    now: DateTime<Utc>,
) -> Vec<EnrichedProject> {
    let tasks = names.iter().map(|name| async move {
        let (repo, origin) = resolve_repo(source, &config.user, name, now).await;
        enrich(source, config, repo, origin).await
    });

    let projects = join_all(tasks).await;

    let placeholders = projects
        .iter()
        .filter(|p| p.origin == ProjectOrigin::Placeholder)
        .count();
    tracing::info!(
        total = projects.len(),
        placeholders,
        "featured projects resolved"
    );

    projects
}

/// Builds the recent gallery. Fails only when the listing itself fails.
pub async fn run_recent<S: RepoSource + ?Sized>(
    source: &S,
    config: &GalleryConfig,
    per_page: u8,
) -> Result<Vec<EnrichedProject>, FetchError> {
    let repos = fetch_recent(source, per_page).await?;

    let tasks = repos
        .into_iter()
        .map(|repo| enrich(source, config, repo, ProjectOrigin::Live));

    Ok(join_all(tasks).await)
}

/// Attaches README media and a classification to a repository.
///
/// README problems never fail the project; they just leave `media` empty.
pub async fn enrich<S: RepoSource + ?Sized>(
    source: &S,
    config: &GalleryConfig,
    repo: RepositorySummary,
    origin: ProjectOrigin,
) -> EnrichedProject {
    let media = match source.fetch_readme(&repo.name).await {
        Ok(readme) => {
            let base = config.raw_content_base(&repo.name, &repo.default_branch);
            match Url::parse(&base) {
                Ok(base) => scan_media(&readme, &base),
                Err(e) => {
                    tracing::debug!(repo = %repo.name, error = %e, "invalid raw content base");
                    Vec::new()
                }
            }
        }
        Err(e) => {
            tracing::debug!(repo = %repo.name, error = %e, "no README media");
            Vec::new()
        }
    };

    let classification = classify(&repo.name, repo.description_text(), repo.language_name());

    EnrichedProject {
        repo,
        media,
        classification,
        origin,
    }
}
