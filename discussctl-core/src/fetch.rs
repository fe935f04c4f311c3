//! Repository discussions client
//!
//! One authenticated `GET /repos/{repo}/discussions` per run. No paging, no
//! retries: any failure is returned to the caller as-is.

use reqwest::header::{ACCEPT, AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use tracing::{debug, info, warn};

use crate::config::SyncConfig;
use crate::discussion::{filter_by_category, Discussion};
use crate::error::{DiscussError, Result};

const ACCEPT_JSON: &str = "application/vnd.github+json";
const ERROR_EXCERPT_LEN: usize = 500;

pub struct DiscussionClient {
    client: Client,
    url: String,
    token: Option<String>,
}

impl DiscussionClient {
    pub fn new(config: &SyncConfig) -> Self {
        Self {
            client: Client::new(),
            url: config.discussions_url(),
            token: config.token.clone(),
        }
    }

    /// Fetch every discussion on the first page, unfiltered
    pub async fn fetch_all(&self) -> Result<Vec<Discussion>> {
        let mut request = self
            .client
            .get(&self.url)
            .header(ACCEPT, ACCEPT_JSON)
            .header(USER_AGENT, concat!("discussctl/", env!("CARGO_PKG_VERSION")));

        match &self.token {
            Some(token) => request = request.header(AUTHORIZATION, format!("token {}", token)),
            None => warn!("no API token configured; sending unauthenticated request"),
        }

        debug!(url = %self.url, "requesting discussions");
        let response = request
            .send()
            .await
            .map_err(|err| DiscussError::http(&self.url, err))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|err| DiscussError::http(&self.url, err))?;

        if !status.is_success() {
            return Err(DiscussError::Status {
                status: status.as_u16(),
                body: excerpt(&text, ERROR_EXCERPT_LEN),
            });
        }

        serde_json::from_str(&text).map_err(|source| DiscussError::Decode { source })
    }

    /// Fetch discussions and keep those filed under `category`
    pub async fn fetch_category(&self, category: &str) -> Result<Vec<Discussion>> {
        let all = self.fetch_all().await?;
        let total = all.len();
        let kept = filter_by_category(all, category);
        info!(total, kept = kept.len(), category, "fetched discussions");
        Ok(kept)
    }
}

/// Truncate to at most `max` bytes without splitting a character
fn excerpt(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_short_text_unchanged() {
        assert_eq!(excerpt("Not Found", 500), "Not Found");
    }

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        let text = "é".repeat(10);
        let cut = excerpt(&text, 5);
        assert_eq!(cut, "éé...");
    }
}
