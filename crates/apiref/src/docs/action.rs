//! Classification of the elements under one action heading

use super::table::parse_options_table;
use super::{ActionSection, Diagnostic};
use crate::types::{ActionRecord, HttpMethod, Locator};
use regex::Regex;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;
use tracing::{debug, info, warn};

/// Description prefix of sections that only point elsewhere
const POINTER_PREFIX: &str = "Refer to";

static CODE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("code").expect("code selector"));

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{(?P<arg>[^}]+)\}").expect("placeholder pattern"));

/// Request line of an action, e.g. `GET https://.../devices/{DEVICE_ID}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    /// Verb as written in the docs
    pub verb: String,
    pub method: Option<HttpMethod>,
    pub path: String,
    /// Placeholder names, left to right
    pub args: Vec<String>,
}

/// Parse a `"<METHOD> <URL>"` request line
pub fn parse_request(request: &str, api_prefix: &str) -> ParsedRequest {
    let request = request.trim();
    let (verb, url) = request
        .split_once(char::is_whitespace)
        .map(|(verb, url)| (verb, url.trim_start()))
        .unwrap_or((request, ""));

    let method = match verb.parse::<HttpMethod>() {
        Ok(method) => Some(method),
        Err(e) => {
            if !verb.is_empty() {
                warn!(%verb, "{}", e);
            }
            None
        }
    };
    let (path, args) = parse_url(url, api_prefix);

    ParsedRequest {
        verb: verb.to_string(),
        method,
        path,
        args,
    }
}

/// Split a request URL into its API path and positional path arguments
///
/// URLs outside `api_prefix` are returned unchanged as the path.
pub fn parse_url(url: &str, api_prefix: &str) -> (String, Vec<String>) {
    let args = PLACEHOLDER
        .captures_iter(url)
        .map(|caps| caps["arg"].to_string())
        .collect();
    let path = url.strip_prefix(api_prefix).unwrap_or(url).to_string();
    (path, args)
}

/// Build the record for one action section
///
/// Returns `None` for sections that merely refer to another endpoint.
pub(crate) fn parse_action(
    section: ActionSection<'_>,
    api_prefix: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<ActionRecord> {
    let ActionSection {
        resource,
        action,
        tags,
    } = section;

    let mut description: Option<String> = None;
    let mut request: Option<ParsedRequest> = None;
    let mut options = None;

    for tag in tags {
        match tag.value().name() {
            "p" => match tag.select(&CODE).next() {
                Some(code) => request = Some(parse_request(&text_of(code), api_prefix)),
                None => {
                    let text = text_of(tag);
                    match description.as_mut() {
                        Some(desc) => {
                            desc.push('\n');
                            desc.push_str(&text);
                        }
                        None => description = Some(text),
                    }
                }
            },
            "table" => options = parse_options_table(tag),
            "div" if is_code_sample(tag) => {}
            "h3" | "aside" => {}
            name => {
                let diagnostic = Diagnostic {
                    resource: resource.clone(),
                    action: action.clone(),
                    tag: name.to_string(),
                    attrs: tag
                        .value()
                        .attrs()
                        .map(|(k, v)| (k.to_string(), v.to_string()))
                        .collect(),
                    text: text_of(tag),
                };
                info!(
                    resource = %diagnostic.resource,
                    action = %diagnostic.action,
                    tag = %diagnostic.tag,
                    attrs = ?diagnostic.attrs,
                    text = %diagnostic.text,
                    "Unrecognized element"
                );
                diagnostics.push(diagnostic);
            }
        }
    }

    let has_method = request.as_ref().is_some_and(|r| !r.verb.is_empty());
    let is_pointer = description
        .as_deref()
        .is_some_and(|d| d.trim_start().starts_with(POINTER_PREFIX));
    if !has_method && is_pointer {
        debug!(%resource, %action, "Dropping pointer section");
        return None;
    }

    let (http_method, path, positional_args) = match request {
        Some(r) => (r.method, Some(r.path), r.args),
        None => (None, None, Vec::new()),
    };

    Some(ActionRecord {
        resource,
        action,
        legacy: None,
        description,
        http_method,
        locator: Locator::Path(path),
        positional_args,
        options,
    })
}

/// Syntax-highlighted request/response samples
fn is_code_sample(tag: ElementRef<'_>) -> bool {
    let mut classes = tag.value().classes();
    classes.next() == Some("highlight") && classes.next().is_none()
}

fn text_of(elem: ElementRef<'_>) -> String {
    elem.text().collect()
}
