//! discussctl CLI - publish repository announcements as static-site posts
//!
//! Fetches the repository's discussions once, keeps the "Announcements"
//! category and writes each one to `content/post/<slug>/index.md`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use discussctl_core::config::{ConfigFile, SyncConfig};
use discussctl_core::run_sync;
use tracing::info;

mod tracing_setup;

#[derive(Parser, Debug)]
#[command(
    name = "discussctl",
    author,
    version,
    about = "Convert repository announcement discussions into static-site posts",
    long_about = "Fetch discussions from a repository, keep one category (Announcements by \
                  default) and write each as content/post/<slug>/index.md with YAML frontmatter. \
                  Every run re-fetches and rewrites everything."
)]
struct Cli {
    /// Repository to read discussions from (owner/name)
    #[arg(long, env = "GITHUB_REPOSITORY", value_name = "OWNER/NAME")]
    repo: Option<String>,

    /// API token sent as `Authorization: token <value>`
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// API base URL
    #[arg(long, env = "GITHUB_API_URL", value_name = "URL")]
    api_base: Option<String>,

    /// Discussion category to publish
    #[arg(long, value_name = "NAME")]
    category: Option<String>,

    /// Output directory for post folders
    #[arg(long = "out", value_name = "DIR")]
    output: Option<PathBuf>,

    /// TOML config file with a [sync] table
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Preview operations without writing files
    #[arg(long = "dry-run")]
    dry_run: bool,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Only log warnings and errors
    #[arg(long, short = 'q')]
    quiet: bool,
}

impl Cli {
    /// Defaults, then config file, then flags and environment
    fn sync_config(&self) -> Result<SyncConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let file = ConfigFile::load(path)
                    .with_context(|| format!("failed to load config {}", path.display()))?;
                SyncConfig::from_file(&file)
            }
            None => SyncConfig::default(),
        };

        if let Some(repo) = &self.repo {
            config.repo = repo.clone();
        }
        if let Some(api_base) = &self.api_base {
            config.api_base = api_base.clone();
        }
        if let Some(category) = &self.category {
            config.category = category.clone();
        }
        if let Some(output) = &self.output {
            config.output_dir = output.clone();
        }
        config.token = self.token.clone().filter(|token| !token.trim().is_empty());
        config.dry_run = self.dry_run;

        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads env-backed arguments
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    tracing_setup::init(&tracing_setup::TracingConfig {
        debug: cli.debug,
        quiet: cli.quiet,
    })?;

    let config = cli.sync_config()?;
    let report = run_sync(&config)
        .await
        .with_context(|| format!("failed to sync discussions for {:?}", config.repo))?;

    let verb = if report.dry_run { "would write" } else { "wrote" };
    info!(
        matched = report.matched,
        collisions = report.collisions.len(),
        "{} {} post(s) under {}",
        verb,
        report.written.len(),
        config.output_dir.display()
    );

    Ok(())
}
