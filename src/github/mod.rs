// src/github/mod.rs
// =============================================================================
// This module handles everything that comes from the GitHub REST API.
//
// - types: the repository and README payloads
// - client: the HTTP client and the RepoSource trait the pipeline uses
//
// Both submodules are private. `pub use` re-exports the handful of items the
// rest of the crate needs, so callers write `github::GithubClient` instead of
// `github::client::GithubClient`.
// =============================================================================

mod client;
mod types;

pub use client::{FetchError, GithubClient, RepoSource};
pub use types::{spaced_name, RepositorySummary};
