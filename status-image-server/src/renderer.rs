// File: status-image-server/src/renderer.rs

use std::path::PathBuf;
use async_trait::async_trait;
use tracing::info;

use status_image_common::traits::host_traits::Renderer;
use status_image_core::Error;

/// Writes the card document to disk for an external browser service to
/// rasterize, and returns the bytes written.
pub struct FileRenderer {
    path: PathBuf,
}

impl FileRenderer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl Renderer for FileRenderer {
    async fn render(&self, html: &str) -> Result<Vec<u8>, Error> {
        tokio::fs::write(&self.path, html)
            .await
            .map_err(|e| Error::Render(format!("writing {}: {}", self.path.display(), e)))?;
        info!("Status card written to {}", self.path.display());
        Ok(html.as_bytes().to_vec())
    }
}
