//! Extraction of actions from the vendor's HTML API documentation
//!
//! Design: the documentation page is one long content container. Level-1
//! headings open a resource, level-2 headings open an action, and every
//! element up to the next heading of either level belongs to that action.
//! The container is scanned once, front to back, by a small state machine.

mod action;
mod table;

pub use action::{parse_request, parse_url, ParsedRequest};
pub use table::parse_options_table;

use crate::catalog::Catalog;
use crate::error::{ApirefError, Result};
use crate::{API_BASE_PREFIX, DEFAULT_DOCS_URL};
use scraper::{ElementRef, Html, Selector};
use serde::Serialize;
use tracing::{debug, info, warn};

/// Resources that carry prose rather than endpoint reference
pub const DEFAULT_SKIP_SECTIONS: &[&str] = &[
    "Introduction",
    "Authentication",
    "Errors",
    "Pagination",
    "Webhooks",
];

/// Selector of the documentation container
pub const DEFAULT_CONTAINER: &str = "div.content";

/// Configuration of the document extractor
#[derive(Debug, Clone)]
pub struct DocsConfig {
    /// Page fetched when no local document is given
    pub docs_url: String,
    /// CSS selector of the element whose children are scanned
    pub container: String,
    /// Prefix stripped from request URLs to form the path
    pub api_prefix: String,
    /// Level-1 sections whose actions are ignored
    pub skip_sections: Vec<String>,
}

impl Default for DocsConfig {
    fn default() -> Self {
        Self {
            docs_url: DEFAULT_DOCS_URL.to_string(),
            container: DEFAULT_CONTAINER.to_string(),
            api_prefix: API_BASE_PREFIX.to_string(),
            skip_sections: DEFAULT_SKIP_SECTIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl DocsConfig {
    pub fn docs_url(mut self, url: impl Into<String>) -> Self {
        self.docs_url = url.into();
        self
    }

    pub fn container(mut self, selector: impl Into<String>) -> Self {
        self.container = selector.into();
        self
    }

    pub fn api_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.api_prefix = prefix.into();
        self
    }

    /// Add a section to the skip list
    pub fn skip_section(mut self, name: impl Into<String>) -> Self {
        self.skip_sections.push(name.into());
        self
    }

    fn is_skipped(&self, resource: &str) -> bool {
        self.skip_sections.iter().any(|s| s == resource)
    }
}

/// An element the extractor did not know how to classify
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    pub resource: String,
    pub action: String,
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub text: String,
}

/// Result of scanning one document
#[derive(Debug, Default)]
pub struct Extraction {
    pub catalog: Catalog,
    /// Unrecognised elements, in document order
    pub diagnostics: Vec<Diagnostic>,
    /// Actions dropped as pointers to other sections
    pub dropped: usize,
}

/// Scanner position within the content container
enum ScanState<'a> {
    /// No level-1 heading seen yet
    Outside,
    InResource {
        resource: String,
        skip: bool,
    },
    InAction(ActionSection<'a>),
}

/// Elements collected under one level-2 heading
pub(crate) struct ActionSection<'a> {
    pub resource: String,
    pub action: String,
    pub tags: Vec<ElementRef<'a>>,
}

/// Document extractor bound to a configuration
#[derive(Debug)]
pub struct DocsExtractor {
    config: DocsConfig,
    container: Selector,
}

impl DocsExtractor {
    pub fn new(config: DocsConfig) -> Result<Self> {
        let container = Selector::parse(&config.container).map_err(|e| {
            ApirefError::InvalidSelector(format!("{}: {:?}", config.container, e))
        })?;
        Ok(Self { config, container })
    }

    pub fn config(&self) -> &DocsConfig {
        &self.config
    }

    /// Extract every documented action from an HTML page
    pub fn extract(&self, html: &str) -> Result<Extraction> {
        let document = Html::parse_document(html);
        let container = document
            .select(&self.container)
            .next()
            .ok_or_else(|| ApirefError::MissingContainer(self.config.container.clone()))?;

        let mut extraction = Extraction::default();
        let mut state = ScanState::Outside;

        for elem in container.children().filter_map(ElementRef::wrap) {
            state = self.step(state, elem, &mut extraction);
        }
        self.close(state, &mut extraction);

        info!(
            actions = extraction.catalog.len(),
            dropped = extraction.dropped,
            diagnostics = extraction.diagnostics.len(),
            "Extracted documentation"
        );
        Ok(extraction)
    }

    fn step<'a>(
        &self,
        state: ScanState<'a>,
        elem: ElementRef<'a>,
        out: &mut Extraction,
    ) -> ScanState<'a> {
        match elem.value().name() {
            "h1" => {
                self.close(state, out);
                let resource = heading_text(elem);
                if resource.is_empty() {
                    warn!("Empty level-1 heading, ignoring until the next one");
                    return ScanState::Outside;
                }
                let skip = self.config.is_skipped(&resource);
                debug!(%resource, skip, "Entering resource");
                ScanState::InResource { resource, skip }
            }
            "h2" => {
                let resource = match state {
                    ScanState::Outside => {
                        debug!("Level-2 heading before any resource, ignoring");
                        return ScanState::Outside;
                    }
                    ScanState::InResource { resource, skip } => {
                        if skip {
                            return ScanState::InResource { resource, skip };
                        }
                        resource
                    }
                    ScanState::InAction(section) => {
                        let resource = section.resource.clone();
                        self.finish(section, out);
                        resource
                    }
                };
                let action = heading_text(elem);
                if action.is_empty() {
                    warn!(%resource, "Empty level-2 heading, ignoring its section");
                    return ScanState::InResource {
                        resource,
                        skip: false,
                    };
                }
                ScanState::InAction(ActionSection {
                    resource,
                    action,
                    tags: Vec::new(),
                })
            }
            _ => match state {
                ScanState::InAction(mut section) => {
                    section.tags.push(elem);
                    ScanState::InAction(section)
                }
                other => other,
            },
        }
    }

    fn close(&self, state: ScanState<'_>, out: &mut Extraction) {
        if let ScanState::InAction(section) = state {
            self.finish(section, out);
        }
    }

    fn finish(&self, section: ActionSection<'_>, out: &mut Extraction) {
        match action::parse_action(section, &self.config.api_prefix, &mut out.diagnostics) {
            Some(record) => {
                out.catalog.insert(record);
            }
            None => out.dropped += 1,
        }
    }
}

fn heading_text(elem: ElementRef<'_>) -> String {
    elem.text().collect::<String>().trim().to_string()
}
