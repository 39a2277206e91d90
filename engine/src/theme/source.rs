use crate::common::ThemeError;
use crate::palette::{Mode, Palette};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// One candidate theme in a batch returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeEntry {
    pub palette: Palette,
}

/// Body of a pre-generated theme file: `{ "results": [{ "palette": [...] }] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeBatch {
    pub results: Vec<ThemeEntry>,
}

/// Relative path of the pre-generated theme file for `mode` and `index`.
pub fn theme_path(mode: Mode, index: u8) -> String {
    format!("themes/{mode}/{index:02}.json")
}

/// Source of palette batches.
///
/// The production implementation is [`HttpThemeSource`]; tests substitute an
/// in-memory source so the fetcher can be exercised without a network.
#[async_trait]
pub trait ThemeSource: Send + Sync {
    /// Retrieve the batch stored in theme file `index` for `mode`.
    ///
    /// # Errors
    ///
    /// Returns [`ThemeError::Status`] for non-success responses,
    /// [`ThemeError::Transport`] when no response arrives and
    /// [`ThemeError::Decode`] when the body is not a theme batch.
    async fn fetch_batch(&self, mode: Mode, index: u8) -> Result<ThemeBatch, ThemeError>;
}

/// Theme source backed by plain unauthenticated HTTP GETs.
pub struct HttpThemeSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpThemeSource {
    /// Create a source rooted at `base_url`. Without a `timeout` a hung
    /// request stays pending until the server closes the connection.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, ThemeError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| ThemeError::Transport {
            url: base_url.to_string(),
            reason: format!("failed to create HTTP client: {e}"),
        })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, mode: Mode, index: u8) -> String {
        format!("{}/{}", self.base_url, theme_path(mode, index))
    }
}

#[async_trait]
impl ThemeSource for HttpThemeSource {
    async fn fetch_batch(&self, mode: Mode, index: u8) -> Result<ThemeBatch, ThemeError> {
        let url = self.url_for(mode, index);
        log::debug!("Requesting theme batch from {url}");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ThemeError::Transport {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            log::warn!("Theme request to {url} returned {status}");
            return Err(ThemeError::Status {
                url,
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| ThemeError::Transport {
            url: url.clone(),
            reason: e.to_string(),
        })?;

        serde_json::from_str(&body).map_err(|e| ThemeError::Decode {
            url,
            reason: e.to_string(),
        })
    }
}
