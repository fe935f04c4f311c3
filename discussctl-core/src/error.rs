/// Structured error types for discussctl-core.
///
/// Uses `thiserror` so the library exposes composable errors; the
/// discussctl binary wraps them in `anyhow` with extra context.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for discussctl-core operations
#[derive(Error, Debug)]
pub enum DiscussError {
    /// The HTTP request could not be sent or its body could not be read
    #[error("HTTP request to {url} failed: {source}")]
    Http {
        url: String,
        source: reqwest::Error,
    },

    /// The API answered with a non-success status
    #[error("discussions request failed ({status}): {body}")]
    Status { status: u16, body: String },

    /// The response body was not the expected JSON shape
    #[error("failed to decode discussions response: {source}")]
    Decode { source: serde_json::Error },

    /// Frontmatter could not be serialized
    #[error("YAML error: {source}")]
    Yaml {
        #[from]
        source: serde_yaml::Error,
    },

    /// Filesystem operation failed
    #[error("I/O error at {path:?}: {source}")]
    Io { path: PathBuf, source: io::Error },

    /// Configuration error
    #[error("Configuration error: {reason}")]
    Config { reason: String },
}

/// Result type alias for discussctl-core operations
pub type Result<T> = std::result::Result<T, DiscussError>;

impl DiscussError {
    /// Create an HTTP transport error for a URL
    pub fn http(url: impl Into<String>, source: reqwest::Error) -> Self {
        Self::Http {
            url: url.into(),
            source,
        }
    }

    /// Create an I/O error tied to a path
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a config error
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }
}
