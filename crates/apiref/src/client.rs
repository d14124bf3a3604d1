//! Entry points for apiref
//!
//! This module ties the loaders and the two extractors together. The
//! extraction logic itself lives in [`docs`](crate::docs) and
//! [`registry`](crate::registry).

use crate::catalog::Catalog;
use crate::docs::{DocsConfig, DocsExtractor, Extraction};
use crate::error::Result;
use crate::loaders::{LoadOptions, LoaderRegistry};
use crate::registry::{inspect_registry, ClientRegistry};
use std::path::Path;

/// Load a document from a URL or a local path
///
/// Uses the default loader registry with all built-in loaders.
pub async fn load_document(location: &str, options: &LoadOptions) -> Result<String> {
    LoaderRegistry::with_defaults().load(location, options).await
}

/// Extract the API reference from a local HTML file, or from the
/// published documentation when `location` is `None`
///
/// For custom options, use [`extract_docs_with_options`].
pub async fn extract_docs(location: Option<&str>) -> Result<Extraction> {
    extract_docs_with_options(location, DocsConfig::default(), LoadOptions::default()).await
}

/// Extract the API reference with custom extractor and loader options
pub async fn extract_docs_with_options(
    location: Option<&str>,
    config: DocsConfig,
    options: LoadOptions,
) -> Result<Extraction> {
    // Validate the configuration before any I/O
    let extractor = DocsExtractor::new(config)?;
    let location = location.unwrap_or(extractor.config().docs_url.as_str());
    let html = load_document(location, &options).await?;
    extractor.extract(&html)
}

/// Build the API reference of a client library from its registry file
pub async fn inspect_registry_file(location: impl AsRef<Path>) -> Result<Catalog> {
    let registry = ClientRegistry::load(location).await?;
    Ok(inspect_registry(&registry))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApirefError;

    #[tokio::test]
    async fn test_load_empty_location() {
        let result = load_document("", &LoadOptions::default()).await;
        assert!(matches!(result, Err(ApirefError::MissingLocation)));
    }

    #[tokio::test]
    async fn test_invalid_selector_fails_before_loading() {
        let config = DocsConfig::default().container("div[");
        let result =
            extract_docs_with_options(Some("/nonexistent/docs.html"), config, LoadOptions::default())
                .await;
        assert!(matches!(result, Err(ApirefError::InvalidSelector(_))));
    }

    #[tokio::test]
    async fn test_missing_registry_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = inspect_registry_file(dir.path().join("missing.json")).await;
        assert!(matches!(result, Err(ApirefError::Io { .. })));
    }
}
