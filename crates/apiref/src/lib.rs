//! apiref - API reference extraction for the SimpleMDM API
//!
//! This crate builds a plain-text (or JSON) reference of every API action
//! from one of two sources:
//!
//! - the vendor's published HTML documentation, scraped by the
//!   [`DocsExtractor`]
//! - a static [`ClientRegistry`] describing the client library's resources
//!   and methods, formatted by [`inspect_registry`]
//!
//! Both produce a [`Catalog`] keyed by display name (`Devices - List All`)
//! and emitted in key order.
//!
//! ## Loader System
//!
//! Documentation pages are read through pluggable loaders. The
//! [`LoaderRegistry`] dispatches a location to the first matching loader.
//!
//! Built-in loaders:
//! - [`HttpLoader`] - HTTP/HTTPS URLs
//! - [`FileLoader`] - local files

pub mod catalog;
pub mod client;
pub mod docs;
mod error;
pub mod loaders;
pub mod naming;
pub mod registry;
mod types;

pub use catalog::Catalog;
pub use client::{extract_docs, extract_docs_with_options, inspect_registry_file, load_document};
pub use docs::{Diagnostic, DocsConfig, DocsExtractor, Extraction};
pub use error::{ApirefError, Result};
pub use loaders::{FileLoader, HttpLoader, LoadOptions, Loader, LoaderRegistry};
pub use naming::{cap_action, cap_resource, title_case};
pub use registry::{inspect_registry, ClientRegistry, MethodSpec, ParamKind, ParamSpec, ResourceSpec};
pub use types::{ActionOption, ActionRecord, HttpMethod, Legacy, Locator};

/// Default User-Agent string
pub const DEFAULT_USER_AGENT: &str = "apiref/0.1";

/// Published API documentation
pub const DEFAULT_DOCS_URL: &str = "https://api.simplemdm.com";

/// Base of every request URL in the documentation
pub const API_BASE_PREFIX: &str = "https://a.simplemdm.com/api/v1";
