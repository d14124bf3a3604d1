//! Local file loader
//!
//! Fallback loader: every location that is not an HTTP(S) URL is read
//! from disk.

use super::{LoadOptions, Loader};
use crate::error::{ApirefError, Result};
use async_trait::async_trait;
use std::path::Path;

/// Reads documentation saved to a local file
pub struct FileLoader;

impl FileLoader {
    /// Create a new file loader
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Loader for FileLoader {
    fn name(&self) -> &'static str {
        "file"
    }

    fn matches(&self, _location: &str) -> bool {
        true
    }

    async fn load(&self, location: &str, _options: &LoadOptions) -> Result<String> {
        let path = Path::new(location);
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ApirefError::io(path, e))?;
        tracing::debug!(path = %path.display(), size = bytes.len(), "Read document");
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
