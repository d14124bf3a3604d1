//! Core types for apiref

use crate::naming::{cap_action, cap_resource};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// HTTP method of a documented action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    /// HTTP GET request
    Get,
    /// HTTP POST request
    Post,
    /// HTTP PUT request
    Put,
    /// HTTP PATCH request
    Patch,
    /// HTTP DELETE request
    Delete,
}

impl FromStr for HttpMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "PATCH" => Ok(HttpMethod::Patch),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(format!("Unknown HTTP method: {}", s)),
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpMethod::Get => write!(f, "GET"),
            HttpMethod::Post => write!(f, "POST"),
            HttpMethod::Put => write!(f, "PUT"),
            HttpMethod::Patch => write!(f, "PATCH"),
            HttpMethod::Delete => write!(f, "DELETE"),
        }
    }
}

/// A named option of an action
///
/// For HTML docs the description comes from the options table. For
/// registry methods it is the rendered default value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOption {
    pub name: String,
    pub description: String,
}

impl ActionOption {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

/// Deprecation marker of a registry method
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Legacy {
    /// Action that supersedes this one, as an identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replaced_by: Option<String>,
}

/// Where an action lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Locator {
    /// URL path relative to the API base, from the HTML docs
    Path(Option<String>),
    /// Call signature on the client library
    Call(String),
}

/// One documented API action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionRecord {
    /// Raw resource name (heading text or client attribute)
    pub resource: String,
    /// Raw action name (heading text or method name)
    pub action: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy: Option<Legacy>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_method: Option<HttpMethod>,
    pub locator: Locator,
    /// Positional arguments in declaration order
    #[serde(default)]
    pub positional_args: Vec<String>,
    /// Named options in document order; `None` when no usable table exists
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<ActionOption>>,
}

impl ActionRecord {
    /// Sort and de-duplication key, e.g. `Devices - List All`
    pub fn display_key(&self) -> String {
        let mut key = format!(
            "{} - {}",
            cap_resource(&self.resource),
            cap_action(&self.action)
        );
        if let Some(legacy) = &self.legacy {
            match &legacy.replaced_by {
                Some(replacement) => {
                    key.push_str(&format!(
                        " (legacy, replaced by {})",
                        cap_action(replacement)
                    ));
                }
                None => key.push_str(" (legacy)"),
            }
        }
        key
    }

    /// Body lines printed under the display key
    ///
    /// Legacy actions are listed by key only.
    pub fn body_lines(&self) -> Vec<String> {
        if self.legacy.is_some() {
            return Vec::new();
        }

        let mut lines = Vec::new();
        lines.push(format!(
            "Desc: {}",
            self.description.as_deref().unwrap_or("None")
        ));
        lines.push(format!(
            "Method: {}",
            self.http_method
                .map(|m| m.to_string())
                .unwrap_or_else(|| "None".to_string())
        ));
        let args = match &self.locator {
            Locator::Path(path) => {
                lines.push(format!("Path: {}", path.as_deref().unwrap_or("None")));
                self.positional_args.join(", ").to_lowercase()
            }
            Locator::Call(signature) => {
                lines.push(format!("Call: {}", signature));
                self.positional_args.join(", ")
            }
        };
        lines.push(format!("Args: {}", args));
        lines.push("Options:".to_string());
        for option in self.options.iter().flatten() {
            lines.push(format!("    {}: {}", option.name, option.description));
        }
        lines
    }
}
