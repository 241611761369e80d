// Lint configuration for this crate
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! RepoVault CLI - back up a GitHub account to a local directory.
//!
//! # Examples
//!
//! ```bash
//! # Back up an account (token from the environment)
//! GITHUB_TOKEN=ghp_... repovault --username octocat --dest ./backup
//!
//! # Everything from the environment
//! GITHUB_USERNAME=octocat GITHUB_TOKEN=ghp_... REPOVAULT_DEST=./backup repovault
//!
//! # Verbose progress on stderr
//! repovault --username octocat --dest ./backup --verbose
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use repovault_backup::{BackupRun, GithubForge, TokenCloner};
use repovault_core::BackupConfig;
use repovault_fetch::{ApiClient, FetchConfig, GitCli};

// ============================================================================
// CLI Definition
// ============================================================================

/// RepoVault CLI - GitHub account backup.
#[derive(Parser)]
#[command(name = "repovault")]
#[command(about = "Back up a GitHub account to a local directory")]
#[command(long_about = r#"
RepoVault downloads everything tied to a GitHub account into one
self-contained directory tree:

  • repository list, issues with all comments, releases
  • release binaries, saved per tag
  • embedded issue/comment/release images, rewritten to local paths
  • a full git clone of every repository, with its markdown files
    rewritten the same way
  • the user profile and the starred list

The destination directory is wiped at the start of each run; every run
is a complete snapshot.

Examples:
  repovault --username octocat --dest ./backup
  GITHUB_TOKEN=ghp_... REPOVAULT_DEST=./backup repovault -u octocat
"#)]
#[command(version)]
#[command(author = "RepoVault Contributors")]
pub struct Cli {
    /// GitHub account to back up.
    #[arg(long, short, env = "GITHUB_USERNAME")]
    pub username: String,

    /// Personal access token with repo scope.
    #[arg(long, short, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: String,

    /// Destination directory. Wiped and recreated on every run.
    #[arg(long, short, env = "REPOVAULT_DEST")]
    pub dest: PathBuf,

    /// Verbose output (show debug info).
    #[arg(long, short)]
    pub verbose: bool,

    /// Quiet mode (minimal output).
    #[arg(long, short)]
    pub quiet: bool,
}

// ============================================================================
// Logging Setup
// ============================================================================

fn setup_logging(verbose: bool, quiet: bool) {
    if quiet {
        return; // No logging in quiet mode
    }

    let filter = if verbose {
        EnvFilter::new("repovault_fetch=debug,repovault_backup=debug,info")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .init();
}

// ============================================================================
// Main Entry Point
// ============================================================================

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli).await {
        if !cli.quiet {
            eprintln!("Error: {e:#}");
        }
        std::process::exit(1);
    }
}

async fn run(cli: &Cli) -> Result<()> {
    let config = BackupConfig::new(&cli.username, &cli.token, &cli.dest)?;

    let client = ApiClient::new(&cli.token, FetchConfig::default())
        .context("failed to build the API client")?;
    let forge = GithubForge::new(client);

    let git = GitCli::locate().context("git binary not found on PATH")?;
    let cloner = TokenCloner::new(git, &cli.token);

    BackupRun::new(&forge, &cloner, &config)
        .execute()
        .await
        .context("backup failed")?;

    Ok(())
}
