//! Static registry of a client library's resources and methods
//!
//! The registry is the description of the client library the registry
//! extractor formats: which sub-resources a session exposes, in declaration
//! order, and for each of them the methods with their docstring, HTTP verb,
//! parameters and deprecation status. It is usually maintained as a JSON
//! file next to the client library (see [`ClientRegistry::schema`]).

mod inspect;

pub use inspect::{
    clean_doc, infer_http_method, inspect_registry, method_record, render_signature,
    reorder_resources, REQUEST_MARKERS,
};

use crate::error::{ApirefError, Result};
use crate::types::HttpMethod;
use schemars::schema::RootSchema;
use schemars::{schema_for, JsonSchema};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// File looked up when a directory is given as registry location
pub const REGISTRY_FILE_NAME: &str = "registry.json";

/// Client session and the sub-resources it exposes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClientRegistry {
    /// Name of the session type, e.g. `Session`
    #[serde(default = "default_client")]
    pub client: String,
    /// Sub-resources in declaration order
    #[serde(default)]
    pub resources: Vec<ResourceSpec>,
}

fn default_client() -> String {
    "Session".to_string()
}

impl Default for ClientRegistry {
    fn default() -> Self {
        Self {
            client: default_client(),
            resources: Vec::new(),
        }
    }
}

/// One sub-resource attribute of the session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResourceSpec {
    /// Attribute name, e.g. `DeviceGroups`
    pub name: String,
    #[serde(default)]
    pub methods: Vec<MethodSpec>,
}

/// One callable member of a sub-resource
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MethodSpec {
    pub name: String,
    /// Docstring, as written in the source
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Declared HTTP verb; inferred from `source` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<HttpMethod>,
    /// Source text of the method body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Parameters, excluding the receiver
    #[serde(default)]
    pub params: Vec<ParamSpec>,
    #[serde(default)]
    pub legacy: bool,
    /// Identifier of the method that replaces a legacy one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaced_by: Option<String>,
    /// Declared on a base type only; such members are not listed
    #[serde(default)]
    pub inherited: bool,
}

/// One parameter of a method
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ParamSpec {
    pub name: String,
    /// Default value as source text; required when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    /// Default value as printed in option lines, e.g. `abc` for `'abc'`.
    /// Derived from `default` when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default)]
    pub kind: ParamKind,
}

/// Parameter passing style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ParamKind {
    #[default]
    Standard,
    /// `*args`
    VarPositional,
    /// Named-only, after `*`
    KeywordOnly,
    /// `**kwargs`
    VarKeyword,
}

impl ClientRegistry {
    /// Parse a registry from JSON text
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(ApirefError::InvalidRegistry)
    }

    /// Load a registry from a file, or from `registry.json` inside a directory
    pub async fn load(location: impl AsRef<Path>) -> Result<Self> {
        let path = registry_path(location.as_ref()).await;
        tracing::debug!(path = %path.display(), "Loading registry");
        let json = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| ApirefError::io(&path, e))?;
        Self::from_json(&json)
    }

    /// JSON schema of the registry format
    pub fn schema() -> RootSchema {
        schema_for!(ClientRegistry)
    }

    pub fn resource(mut self, resource: ResourceSpec) -> Self {
        self.resources.push(resource);
        self
    }
}

async fn registry_path(location: &Path) -> PathBuf {
    match tokio::fs::metadata(location).await {
        Ok(meta) if meta.is_dir() => location.join(REGISTRY_FILE_NAME),
        _ => location.to_path_buf(),
    }
}

impl ResourceSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            methods: Vec::new(),
        }
    }

    pub fn method(mut self, method: MethodSpec) -> Self {
        self.methods.push(method);
        self
    }
}

impl MethodSpec {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    pub fn http_method(mut self, method: HttpMethod) -> Self {
        self.http_method = Some(method);
        self
    }

    pub fn source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }

    /// Mark as legacy, optionally naming the replacement
    pub fn legacy(mut self, replaced_by: Option<&str>) -> Self {
        self.legacy = true;
        self.replaced_by = replaced_by.map(str::to_string);
        self
    }

    pub fn inherited(mut self) -> Self {
        self.inherited = true;
        self
    }
}

impl ParamSpec {
    pub fn required(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: None,
            value: None,
            kind: ParamKind::Standard,
        }
    }

    pub fn optional(name: impl Into<String>, default: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            default: Some(default.into()),
            value: None,
            kind: ParamKind::Standard,
        }
    }

    /// Override the printed form of the default
    pub fn value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn kind(mut self, kind: ParamKind) -> Self {
        self.kind = kind;
        self
    }

    /// Printed form of the default: the explicit `value`, or `default` with
    /// the quotes of a plain string literal removed
    pub fn display_value(&self) -> Option<String> {
        if let Some(value) = &self.value {
            return Some(value.clone());
        }
        self.default
            .as_deref()
            .map(|default| unquote(default).unwrap_or(default).to_string())
    }
}

/// Body of a single- or double-quoted literal without escapes
fn unquote(literal: &str) -> Option<&str> {
    if literal.len() < 2 {
        return None;
    }
    let quote = literal.chars().next().filter(|c| *c == '\'' || *c == '"')?;
    let body = literal.strip_prefix(quote)?.strip_suffix(quote)?;
    (!body.contains(['\\', quote])).then_some(body)
}
