// src/cli.rs
// =============================================================================
// This file defines our command-line interface using the `clap` crate.
//
// Two subcommands, one per gallery mode:
// - featured: a fixed, ordered list of repository names
// - recent: the user's recently updated repositories, ranked
//
// Options shared by both live on Cli itself (account, API endpoints, token),
// and the output options are flattened into each subcommand.
//
// Rust concepts:
// - Derive macros: #[derive(Parser)] generates the whole argument parser
// - Enums with fields: each subcommand variant carries its own arguments
// - #[command(flatten)]: reuse one Args struct inside several subcommands
// =============================================================================

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{GalleryConfig, DEFAULT_API_BASE, DEFAULT_RAW_BASE, DEFAULT_TIMEOUT_SECS};
use crate::render::RenderTarget;

// This struct represents our entire CLI application
//
// Fields with `env = ...` fall back to that environment variable when the
// flag is missing, which is how CI jobs usually pass the user and token
#[derive(Parser, Debug)]
#[command(
    name = "portfolio-gallery",
    version,
    about = "Render a portfolio projects gallery from GitHub repositories",
    long_about = "portfolio-gallery fetches repositories from the GitHub API, looks for screenshots \
                  and demo videos in their READMEs, and renders project cards into a page."
)]
pub struct Cli {
    /// GitHub user whose repositories are shown
    #[arg(long, env = "PORTFOLIO_GITHUB_USER")]
    pub user: String,

    /// Base URL of the GitHub REST API
    #[arg(long, default_value = DEFAULT_API_BASE)]
    pub api_base: String,

    /// Base URL serving raw repository files
    #[arg(long, default_value = DEFAULT_RAW_BASE)]
    pub raw_base: String,

    /// API token, raises the rate limit
    // hide_env_values keeps the token out of --help output
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    // Holds one of the subcommands defined in the Commands enum
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render cards for a fixed list of repositories
    ///
    /// Example: portfolio-gallery --user octo featured weather-app chess-engine
    Featured {
        /// Repository names, in display order
        ///
        /// Positional and repeatable: featured one two three
        #[arg(required = true)]
        names: Vec<String>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Render cards for the user's recently updated repositories
    ///
    /// Example: portfolio-gallery --user octo recent --page index.html --container github-projects
    Recent {
        /// How many repositories to request before ranking (1-100, the API's page limit)
        // value_parser!(u8).range(..) makes clap reject 0 and 101 at parse time
        #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u8).range(1..=100))]
        per_page: u8,

        #[command(flatten)]
        output: OutputArgs,
    },
}

// Where the result goes. Stdout when none of these is given.
//
// clap enforces the combinations at parse time:
// --json excludes --output and --page, and --page needs --container
#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Print the enriched projects as JSON instead of markup
    #[arg(long, conflicts_with_all = ["output", "page"])]
    pub json: bool,

    /// Write the markup fragment to this file
    #[arg(long, conflicts_with = "page")]
    pub output: Option<PathBuf>,

    /// HTML page whose container element receives the markup
    #[arg(long, requires = "container")]
    pub page: Option<PathBuf>,

    /// Id of the container element inside --page
    #[arg(long, requires = "page")]
    pub container: Option<String>,
}

impl Cli {
    // Folds the global flags into the config value the rest of the app uses
    pub fn config(&self) -> GalleryConfig {
        GalleryConfig::new(self.user.clone())
            .with_api_base(&self.api_base)
            .with_raw_base(&self.raw_base)
            .with_token(self.token.clone())
            .with_timeout(Duration::from_secs(self.timeout_secs))
    }
}

impl OutputArgs {
    // Container wins over file, file wins over stdout
    pub fn target(&self) -> RenderTarget {
        match (&self.page, &self.container, &self.output) {
            (Some(page), Some(id), _) => RenderTarget::Container {
                page: page.clone(),
                id: id.clone(),
            },
            (_, _, Some(path)) => RenderTarget::File(path.clone()),
            _ => RenderTarget::Stdout,
        }
    }
}
