//! HTTP loader
//!
//! Fetches the published documentation page with a single GET request.

use super::{LoadOptions, Loader};
use crate::error::{ApirefError, Result};
use crate::DEFAULT_USER_AGENT;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use tracing::{debug, warn};
use url::Url;

/// Accept header sent with documentation requests
const ACCEPT_HTML: &str = "text/html, application/xhtml+xml, */*;q=0.8";

/// Fetches documentation over HTTP(S)
pub struct HttpLoader;

impl HttpLoader {
    /// Create a new HTTP loader
    pub fn new() -> Self {
        Self
    }
}

impl Default for HttpLoader {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Loader for HttpLoader {
    fn name(&self) -> &'static str {
        "http"
    }

    fn matches(&self, location: &str) -> bool {
        Url::parse(location)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false)
    }

    async fn load(&self, location: &str, options: &LoadOptions) -> Result<String> {
        let mut headers = HeaderMap::new();
        let user_agent = options.user_agent.as_deref().unwrap_or(DEFAULT_USER_AGENT);
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent).unwrap_or_else(|_| {
                warn!(%user_agent, "Invalid User-Agent, using default");
                HeaderValue::from_static(DEFAULT_USER_AGENT)
            }),
        );
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HTML));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(options.timeout)
            .build()
            .map_err(ApirefError::ClientBuildError)?;

        let response = client
            .get(location)
            .send()
            .await
            .map_err(ApirefError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApirefError::HttpStatus {
                status: status.as_u16(),
                url: location.to_string(),
            });
        }

        let body = response.bytes().await.map_err(ApirefError::from_reqwest)?;
        debug!(url = %location, size = body.len(), "Fetched document");
        Ok(String::from_utf8_lossy(&body).into_owned())
    }
}
