// src/config.rs
// =============================================================================
// Runtime settings shared by the GitHub client and the renderer.
//
// Values come from the command line (with environment fallbacks handled by
// clap in cli.rs) and are folded into one GalleryConfig that gets passed
// around explicitly. Nothing here is global.
// =============================================================================

use std::time::Duration;

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_RAW_BASE: &str = "https://raw.githubusercontent.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct GalleryConfig {
    /// GitHub account whose repositories are shown
    pub user: String,
    /// Base URL of the REST API, without trailing slash
    pub api_base: String,
    /// Base URL serving raw file contents, without trailing slash
    pub raw_base: String,
    /// Optional token, sent as a bearer credential
    pub token: Option<String>,
    pub timeout: Duration,
}

impl GalleryConfig {
    pub fn new(user: impl Into<String>) -> Self {
        GalleryConfig {
            user: user.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            raw_base: DEFAULT_RAW_BASE.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_raw_base(mut self, raw_base: &str) -> Self {
        self.raw_base = raw_base.trim_end_matches('/').to_string();
        self
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Directory URL that relative README media paths resolve against.
    pub fn raw_content_base(&self, repo: &str, branch: &str) -> String {
        format!("{}/{}/{}/{}/", self.raw_base, self.user, repo, branch)
    }

    /// Address of the GitHub Pages site for a repository.
    ///
    /// The repository named `{user}.github.io` is the user site itself and
    /// is served from the root, not from a sub-path.
    pub fn pages_url(&self, repo: &str) -> String {
        let user_site = format!("{}.github.io", self.user);
        if repo.eq_ignore_ascii_case(&user_site) {
            format!("https://{}/", user_site)
        } else {
            format!("https://{}/{}/", user_site, repo)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slashes_are_trimmed() {
        let config = GalleryConfig::new("octo")
            .with_api_base("http://localhost:8080/")
            .with_raw_base("http://raw.local//");
        assert_eq!(config.api_base, "http://localhost:8080");
        assert_eq!(config.raw_base, "http://raw.local");
    }

    #[test]
    fn test_raw_content_base() {
        let config = GalleryConfig::new("octo");
        assert_eq!(
            config.raw_content_base("demo", "main"),
            "https://raw.githubusercontent.com/octo/demo/main/"
        );
    }

    #[test]
    fn test_pages_url() {
        let config = GalleryConfig::new("octo");
        assert_eq!(config.pages_url("demo"), "https://octo.github.io/demo/");
    }

    #[test]
    fn test_pages_url_for_user_site_is_root() {
        let config = GalleryConfig::new("octo");
        assert_eq!(config.pages_url("octo.github.io"), "https://octo.github.io/");
        assert_eq!(config.pages_url("Octo.GitHub.io"), "https://octo.github.io/");
    }

    #[test]
    fn test_blank_token_is_dropped() {
        let config = GalleryConfig::new("octo").with_token(Some("  ".to_string()));
        assert!(config.token.is_none());
    }
}
