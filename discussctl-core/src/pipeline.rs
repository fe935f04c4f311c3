use std::path::PathBuf;

use tracing::{instrument, warn};

use crate::config::SyncConfig;
use crate::discussion::Discussion;
use crate::error::Result;
use crate::fetch::DiscussionClient;
use crate::frontmatter::render_discussion;
use crate::slug::{post_slug, SlugRegistry};
use crate::writer::PostWriter;

/// Outcome of one sync run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SyncReport {
    /// Discussions that matched the category
    pub matched: usize,
    /// Post files written (or that would be written in dry-run mode)
    pub written: Vec<PathBuf>,
    /// Slugs claimed by more than one title; the last one won
    pub collisions: Vec<String>,
    pub dry_run: bool,
}

/// Fetch, convert and write every matching discussion
#[instrument(
    skip_all,
    fields(repo = %config.repo, category = %config.category, dry_run = config.dry_run)
)]
pub async fn run_sync(config: &SyncConfig) -> Result<SyncReport> {
    config.validate()?;

    let client = DiscussionClient::new(config);
    let discussions = client.fetch_category(&config.category).await?;

    let writer = PostWriter::new(&config.output_dir, config.dry_run);
    write_posts(&discussions, &writer)
}

/// Convert and write already-fetched discussions in order
pub fn write_posts(discussions: &[Discussion], writer: &PostWriter) -> Result<SyncReport> {
    let mut registry = SlugRegistry::new();
    let mut report = SyncReport {
        matched: discussions.len(),
        dry_run: writer.is_dry_run(),
        ..SyncReport::default()
    };

    for discussion in discussions {
        let slug = post_slug(&discussion.title);
        if let Some(previous) = registry.record(&slug, &discussion.title) {
            warn!(
                slug = %slug,
                previous = %previous,
                title = %discussion.title,
                "slug collision; later post overwrites earlier one"
            );
            report.collisions.push(slug);
        }

        let markdown = render_discussion(discussion)?;
        let path = writer.write(&discussion.title, &markdown)?;
        report.written.push(path);
    }

    Ok(report)
}
