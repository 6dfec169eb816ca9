// src/github/client.rs
// =============================================================================
// Talks to the GitHub REST API.
//
// Endpoints used:
// - GET /repos/{user}/{name}                          -> one repository
// - GET /users/{user}/repos?sort=updated&per_page=N   -> recent repositories
// - GET /repos/{user}/{name}/readme                   -> base64 README
//
// The RepoSource trait is the seam between the pipeline and the network:
// GithubClient implements it over reqwest, tests implement it in memory.
//
// URLs are built with the `url` crate, one path segment at a time, so a
// repository name can never add path segments or a query string.
//
// Rust concepts:
// - Traits: RepoSource describes what the pipeline needs, not how it is done
// - #[async_trait]: lets a trait have async methods usable as &dyn RepoSource
// - thiserror: derives Display and From for the FetchError enum
// - Generics: get_json::<T> deserializes into whatever type the caller asks for
// =============================================================================

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use reqwest::Client;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

use super::types::{ReadmeDocument, RepositorySummary};
use crate::config::GalleryConfig;

/// Why a single API request did not produce a usable value
//
// #[from] generates `impl From<reqwest::Error> for FetchError`,
// which is what lets `?` convert reqwest errors automatically
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to fetch {url}: HTTP {status}")]
    Status { url: String, status: u16 },

    #[error("Could not decode document: {0}")]
    Decode(String),

    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

/// Source of repository data for the gallery pipeline.
#[async_trait]
pub trait RepoSource: Send + Sync {
    /// Fetches one named repository of the configured user.
    async fn fetch_repo(&self, name: &str) -> Result<RepositorySummary, FetchError>;

    /// Lists the user's repositories, most recently updated first.
    async fn list_recent(&self, per_page: u8) -> Result<Vec<RepositorySummary>, FetchError>;

    /// Fetches and decodes the README of a repository.
    async fn fetch_readme(&self, name: &str) -> Result<String, FetchError>;
}

pub struct GithubClient {
    client: Client,
    config: GalleryConfig,
}

impl GithubClient {
    pub fn new(config: GalleryConfig) -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("application/vnd.github+json"),
        );

        // One client for every request so connections are pooled
        let client = Client::builder()
            .user_agent(concat!("portfolio-gallery/", env!("CARGO_PKG_VERSION")))
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        Ok(GithubClient { client, config })
    }

    /// Builds `{api_base}/{segments...}`.
    /// Each segment is percent-encoded, so a name like "a/b" stays one segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, FetchError> {
        api_url(&self.config.api_base, segments)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        tracing::debug!(%url, "GET");

        let mut request = self.client.get(url.clone());
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        // `?` turns a connection or timeout failure into FetchError::Request
        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        // A body that does not match T is also a reqwest error
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl RepoSource for GithubClient {
    async fn fetch_repo(&self, name: &str) -> Result<RepositorySummary, FetchError> {
        let url = self.endpoint(&["repos", self.config.user.as_str(), name])?;
        self.get_json(url).await
    }

    async fn list_recent(&self, per_page: u8) -> Result<Vec<RepositorySummary>, FetchError> {
        let mut url = self.endpoint(&["users", self.config.user.as_str(), "repos"])?;
        url.query_pairs_mut()
            .append_pair("sort", "updated")
            .append_pair("per_page", &per_page.to_string());
        self.get_json(url).await
    }

    async fn fetch_readme(&self, name: &str) -> Result<String, FetchError> {
        let url = self.endpoint(&["repos", self.config.user.as_str(), name, "readme"])?;
        let document: ReadmeDocument = self.get_json(url).await?;
        decode_readme(&document)
    }
}

/// Appends path segments to a base URL, percent-encoding each one.
///
/// The base may already carry a path (e.g. a GitHub Enterprise
/// "https://host/api/v3"), the segments go after it.
pub fn api_url(base: &str, segments: &[&str]) -> Result<Url, FetchError> {
    let mut url = Url::parse(base).map_err(|e| FetchError::InvalidUrl(format!("{}: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| FetchError::InvalidUrl(format!("{} cannot take a path", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Decodes the `content` field of a README response.
///
/// GitHub wraps the base64 text at 60 columns, so whitespace is stripped
/// before decoding. The result must be valid UTF-8.
pub fn decode_readme(document: &ReadmeDocument) -> Result<String, FetchError> {
    if !document.encoding.is_empty() && document.encoding != "base64" {
        return Err(FetchError::Decode(format!(
            "unsupported encoding '{}'",
            document.encoding
        )));
    }

    let compact: String = document
        .content
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();

    let bytes = STANDARD
        .decode(compact.as_bytes())
        .map_err(|e| FetchError::Decode(e.to_string()))?;

    String::from_utf8(bytes).map_err(|e| FetchError::Decode(e.to_string()))
}
