//! Loader system for documentation pages
//!
//! Design: Each loader handles one kind of location (URL or local path).
//! LoaderRegistry dispatches to the first matching loader.

mod file;
mod http;

pub use file::FileLoader;
pub use http::HttpLoader;

use crate::error::{ApirefError, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Default timeout for fetching a documentation page
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Options shared by all loaders
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Custom User-Agent
    pub user_agent: Option<String>,
    /// Total request timeout
    pub timeout: Duration,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            user_agent: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl LoadOptions {
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Trait for document loaders
///
/// Each loader declares which locations it can handle via `matches()`
/// and reads the document via `load()`.
#[async_trait]
pub trait Loader: Send + Sync {
    /// Unique identifier for this loader (for logging/debugging)
    fn name(&self) -> &'static str;

    /// Returns true if this loader can handle the given location
    fn matches(&self, location: &str) -> bool;

    /// Load the document text
    ///
    /// Called only if `matches()` returned true.
    async fn load(&self, location: &str, options: &LoadOptions) -> Result<String>;
}

/// Registry of loaders that dispatches to the appropriate handler
pub struct LoaderRegistry {
    loaders: Vec<Box<dyn Loader>>,
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LoaderRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            loaders: Vec::new(),
        }
    }

    /// Create a registry with default loaders pre-registered
    ///
    /// Includes (in order of priority):
    /// 1. HttpLoader - handles http:// and https:// URLs
    /// 2. FileLoader - handles everything else as a local path
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(Box::new(HttpLoader::new()));
        registry.register(Box::new(FileLoader::new()));
        registry
    }

    /// Register a loader
    ///
    /// Loaders are checked in registration order.
    pub fn register(&mut self, loader: Box<dyn Loader>) {
        self.loaders.push(loader);
    }

    /// Load a document using the first loader that matches the location
    pub async fn load(&self, location: &str, options: &LoadOptions) -> Result<String> {
        if location.is_empty() {
            return Err(ApirefError::MissingLocation);
        }

        for loader in &self.loaders {
            if loader.matches(location) {
                tracing::debug!(loader = loader.name(), %location, "Using loader");
                return loader.load(location, options).await;
            }
        }

        Err(ApirefError::LoaderError(format!(
            "No loader available for {}",
            location
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_with_defaults() {
        let registry = LoaderRegistry::with_defaults();
        assert_eq!(registry.loaders.len(), 2);
        assert_eq!(registry.loaders[0].name(), "http");
        assert_eq!(registry.loaders[1].name(), "file");
    }

    #[tokio::test]
    async fn test_empty_registry() {
        let registry = LoaderRegistry::new();
        assert!(registry.loaders.is_empty());
        let err = registry
            .load("docs.html", &LoadOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApirefError::LoaderError(_)));
    }

    #[tokio::test]
    async fn test_missing_location() {
        let registry = LoaderRegistry::with_defaults();
        let err = registry.load("", &LoadOptions::default()).await.unwrap_err();
        assert!(matches!(err, ApirefError::MissingLocation));
    }

    #[test]
    fn test_load_options() {
        let options = LoadOptions::default();
        assert!(options.user_agent.is_none());
        assert_eq!(options.timeout, DEFAULT_TIMEOUT);

        let options = LoadOptions::default()
            .user_agent("test/1.0")
            .timeout(Duration::from_secs(5));
        assert_eq!(options.user_agent.as_deref(), Some("test/1.0"));
        assert_eq!(options.timeout, Duration::from_secs(5));
    }
}
