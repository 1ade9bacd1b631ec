//! Image Source Port
//!
//! Abstract interface for fetching persona thumbnails by URL. The PDF
//! exporter pulls images through this; the HTML view lets the browser
//! load the URL itself.

use async_trait::async_trait;
use image::DynamicImage;

use crate::domain::DomainError;

/// Service interface for fetching an image by URL
#[async_trait]
pub trait ImageSource: Send + Sync {
    /// Fetch and decode one image. Callers treat any error as "no image"
    /// and fall back to a blank placeholder.
    async fn fetch(&self, url: &str) -> Result<DynamicImage, DomainError>;
}
