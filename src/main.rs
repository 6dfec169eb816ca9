// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap and set up logging
// 2. Run the gallery pipeline for the chosen mode (featured or recent)
// 3. Render the cards and write them to the chosen target
// 4. Exit with proper code (0 = success, 1 = listing failed, 2 = error)
//
// Logs go to stderr so stdout can carry the markup or JSON.
//
// Rust concepts used:
// - async/await: every repository is fetched and enriched concurrently
// - Result<T, E> and the ? operator: errors travel up to run() and become exit code 2
// - match: one branch per subcommand
// =============================================================================

// Module declarations - tells Rust about our other source files
mod classify;      // src/classify.rs - category and icon rules
mod cli;           // src/cli.rs - command-line parsing
mod config;        // src/config.rs - account and endpoint settings
mod github;        // src/github/ - GitHub API client and payload types
mod pipeline;      // src/pipeline/ - fetch, rank and enrich projects
mod render;        // src/render/ - card markup and where it gets written

// Only compiled for `cargo test`
#[cfg(test)]
mod test_utils;

// anyhow::Result lets run() return any error type with the ? operator,
// and Context adds a human-readable message on the way up
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;  // Parser trait enables Cli::parse()
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands, OutputArgs};
use config::GalleryConfig;
use github::GithubClient;
use pipeline::EnrichedProject;

// The #[tokio::main] attribute builds a tokio runtime and runs our async main on it
#[tokio::main]
async fn main() {
    init_logging();

    // std::process::exit() terminates the program with the given code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // {:#} prints the whole context chain: "Failed to read index.html: No such file..."
            tracing::error!("{:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// RUST_LOG overrides the level, e.g. RUST_LOG=portfolio_gallery=debug
// shows every API request
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// Returns:
//   Ok(0) = gallery written
//   Ok(1) = recent listing failed, error state written
//   Err   = unexpected error
async fn run() -> Result<i32> {
    // Handles --help and --version itself and exits on bad arguments
    let cli = Cli::parse();
    let config = cli.config();
    // One client for the whole run so connections are reused
    let client = GithubClient::new(config.clone()).context("Failed to create HTTP client")?;

    // Borrow the command (&cli.command) instead of moving it out of cli
    match &cli.command {
        Commands::Featured { names, output } => {
            handle_featured(&client, &config, names, output).await
        }
        Commands::Recent { per_page, output } => {
            handle_recent(&client, &config, *per_page, output).await
        }
    }
}

// Handles the 'featured' subcommand
// Never fails on a missing repository: it becomes a placeholder card
async fn handle_featured(
    client: &GithubClient,
    config: &GalleryConfig,
    names: &[String],
    output: &OutputArgs,
) -> Result<i32> {
    tracing::info!(user = %config.user, count = names.len(), "building featured gallery");

    let now = Utc::now();
    let projects = pipeline::run_featured(client, config, names, now).await;

    emit(&projects, config, output, now)?;
    Ok(0)
}

// Handles the 'recent' subcommand
// A failed listing renders the error state and exits with 1
async fn handle_recent(
    client: &GithubClient,
    config: &GalleryConfig,
    per_page: u8,
    output: &OutputArgs,
) -> Result<i32> {
    tracing::info!(user = %config.user, per_page, "building recent gallery");

    let now = Utc::now();
    match pipeline::run_recent(client, config, per_page).await {
        Ok(projects) => {
            emit(&projects, config, output, now)?;
            Ok(0)
        }
        Err(e) => {
            tracing::error!(error = %e, "could not load repositories");
            // JSON consumers only get the exit code
            if !output.json {
                let markup =
                    render::render_error("Please check your connection and try again later.");
                output.target().write(&markup)?;
            }
            Ok(1)
        }
    }
}

// Writes the result once: JSON on stdout, or markup to the chosen target
fn emit(
    projects: &[EnrichedProject],
    config: &GalleryConfig,
    output: &OutputArgs,
    now: chrono::DateTime<Utc>,
) -> Result<()> {
    if output.json {
        let json_output = serde_json::to_string_pretty(projects)?;
        println!("{}", json_output);
        return Ok(());
    }

    let markup = if projects.is_empty() {
        render::render_empty()
    } else {
        render::render_gallery(projects, config, now)
    };

    output.target().write(&markup)
}
