//! Manifest sources

use std::future::Future;
use thiserror::Error;
use url::Url;

use crate::content::PostRecord;

/// Why the manifest could not be loaded
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Status(u16),

    #[error("network error: {0}")]
    Transport(String),

    #[error("invalid manifest: {0}")]
    Decode(String),
}

/// Something that can deliver the manifest for a page load
pub trait ManifestSource {
    fn fetch_manifest(
        &self,
        url: &Url,
    ) -> impl Future<Output = Result<Vec<PostRecord>, FetchError>> + Send;
}

/// Fetches the manifest over HTTP
#[derive(Clone, Default)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ManifestSource for HttpSource {
    async fn fetch_manifest(&self, url: &Url) -> Result<Vec<PostRecord>, FetchError> {
        tracing::debug!("Fetching manifest from {}", url);

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
