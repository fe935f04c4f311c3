use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{DiscussError, Result};
use crate::slug::post_slug;

pub const POST_FILENAME: &str = "index.md";

/// Writes rendered posts as `<root>/<slug>/index.md`
pub struct PostWriter {
    root: PathBuf,
    dry_run: bool,
}

impl PostWriter {
    pub fn new(root: impl Into<PathBuf>, dry_run: bool) -> Self {
        Self {
            root: root.into(),
            dry_run,
        }
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Target file for a post with this title
    pub fn post_path(&self, title: &str) -> PathBuf {
        self.root.join(post_slug(title)).join(POST_FILENAME)
    }

    /// Write `content` for `title`, replacing any existing file
    pub fn write(&self, title: &str, content: &str) -> Result<PathBuf> {
        let path = self.post_path(title);

        if self.dry_run {
            debug!(path = %path.display(), bytes = content.len(), "dry run, skipping write");
            return Ok(path);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|err| DiscussError::io(parent, err))?;
        }
        fs::write(&path, content).map_err(|err| DiscussError::io(&path, err))?;

        info!(path = %path.display(), "wrote post");
        Ok(path)
    }
}
