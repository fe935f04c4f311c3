use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::discussion::ANNOUNCEMENTS;
use crate::error::{DiscussError, Result};

pub const DEFAULT_API_BASE: &str = "https://api.github.com";
pub const DEFAULT_OUTPUT_DIR: &str = "content/post";

/// Everything a sync run needs, assembled once at startup
#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    /// API root, e.g. `https://api.github.com`
    pub api_base: String,
    /// Repository as `owner/name`
    pub repo: String,
    /// Token sent as `Authorization: token <value>`
    pub token: Option<String>,
    /// Discussion category to keep
    pub category: String,
    /// Posts land in `<output_dir>/<slug>/index.md`
    pub output_dir: PathBuf,
    /// Render and report without touching the filesystem
    pub dry_run: bool,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            repo: String::new(),
            token: None,
            category: ANNOUNCEMENTS.to_string(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            dry_run: false,
        }
    }
}

/// On-disk TOML config. The token is never read from here.
///
/// ```toml
/// [sync]
/// repo = "owner/name"
/// output_dir = "site/content/post"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub sync: SyncSection,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SyncSection {
    pub repo: Option<String>,
    pub api_base: Option<String>,
    pub category: Option<String>,
    pub output_dir: Option<PathBuf>,
}

impl ConfigFile {
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| DiscussError::io(path, err))?;
        let parsed: ConfigFile = toml::from_str(&content).map_err(|err| {
            DiscussError::config(format!("failed to parse {}: {}", path.display(), err))
        })?;
        debug!(path = %path.display(), "loaded config file");
        Ok(parsed)
    }
}

impl SyncConfig {
    /// Defaults overlaid with values from a config file
    pub fn from_file(file: &ConfigFile) -> Self {
        let defaults = Self::default();
        let section = &file.sync;
        Self {
            api_base: section.api_base.clone().unwrap_or(defaults.api_base),
            repo: section.repo.clone().unwrap_or(defaults.repo),
            token: None,
            category: section.category.clone().unwrap_or(defaults.category),
            output_dir: section.output_dir.clone().unwrap_or(defaults.output_dir),
            dry_run: false,
        }
    }

    /// URL of the repository discussions listing
    pub fn discussions_url(&self) -> String {
        format!(
            "{}/repos/{}/discussions",
            self.api_base.trim_end_matches('/'),
            self.repo
        )
    }

    pub fn validate(&self) -> Result<()> {
        let mut parts = self.repo.split('/');
        let valid = matches!(
            (parts.next(), parts.next(), parts.next()),
            (Some(owner), Some(name), None) if !owner.is_empty() && !name.is_empty()
        );
        if !valid {
            return Err(DiscussError::config(format!(
                "repository must look like owner/name, got {:?}",
                self.repo
            )));
        }
        if self.api_base.trim().is_empty() {
            return Err(DiscussError::config("API base URL is empty"));
        }
        if self.category.trim().is_empty() {
            return Err(DiscussError::config("category is empty"));
        }
        Ok(())
    }
}
