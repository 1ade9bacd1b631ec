//! HTTP Image Source
//!
//! reqwest-backed implementation of the `ImageSource` port. Fetches run
//! one at a time from the PDF exporter; failures bubble up as
//! `DomainError::Image` and the caller degrades to a blank placeholder.

use async_trait::async_trait;
use dossier::{DomainError, ImageSource};
use image::DynamicImage;
use tracing::debug;

/// Fetches persona thumbnails over HTTP
pub struct HttpImageSource {
    client: reqwest::Client,
}

impl HttpImageSource {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl Default for HttpImageSource {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ImageSource for HttpImageSource {
    async fn fetch(&self, url: &str) -> Result<DynamicImage, DomainError> {
        debug!(url = %url, "Fetching image");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| DomainError::Image(format!("GET {url}: {e}")))?
            .error_for_status()
            .map_err(|e| DomainError::Image(format!("GET {url}: {e}")))?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DomainError::Image(format!("read {url}: {e}")))?;

        image::load_from_memory(&bytes)
            .map_err(|e| DomainError::Image(format!("decode {url}: {e}")))
    }
}
