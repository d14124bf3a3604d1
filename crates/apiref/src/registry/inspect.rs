//! Formatting of registry methods into action records

use super::{ClientRegistry, MethodSpec, ParamKind, ParamSpec, ResourceSpec};
use crate::catalog::Catalog;
use crate::types::{ActionOption, ActionRecord, HttpMethod, Legacy, Locator};
use tracing::{debug, info};

/// Request helpers of the client library and the verb each one issues.
/// Checked in order; the first one found in a method's source wins.
pub const REQUEST_MARKERS: &[(&str, HttpMethod)] = &[
    ("self.get_data(", HttpMethod::Get),
    ("self.get_raw_content(", HttpMethod::Get),
    ("self.patch_data(", HttpMethod::Patch),
    ("self.post_data(", HttpMethod::Post),
    ("self.put_data(", HttpMethod::Put),
    ("self.delete_data(", HttpMethod::Delete),
];

/// Build the catalog of every listed method of every resource
pub fn inspect_registry(registry: &ClientRegistry) -> Catalog {
    let mut resources = registry.resources.clone();
    reorder_resources(&mut resources);

    let mut catalog = Catalog::new();
    for resource in &resources {
        let mut methods: Vec<&MethodSpec> = resource.methods.iter().collect();
        methods.sort_by(|a, b| a.name.cmp(&b.name));
        for method in methods {
            if method.inherited || method.name.starts_with('_') {
                debug!(resource = %resource.name, method = %method.name, "Skipping member");
                continue;
            }
            catalog.insert(method_record(&resource.name, method));
        }
    }

    info!(
        client = %registry.client,
        resources = resources.len(),
        actions = catalog.len(),
        "Inspected registry"
    );
    catalog
}

/// Move `Devices` in front of a directly preceding `DeviceGroups` or
/// `DeviceJobs`, so a base resource is listed before its variants.
pub fn reorder_resources(resources: &mut [ResourceSpec]) {
    for index in 1..resources.len() {
        let swap = match resources[index].name.strip_suffix('s') {
            Some(singular) => {
                let previous = resources[index - 1].name.as_str();
                previous == format!("{}Groups", singular)
                    || previous == format!("{}Jobs", singular)
            }
            None => false,
        };
        if swap {
            resources.swap(index - 1, index);
        }
    }
}

/// Guess the HTTP verb of a method from its source text
pub fn infer_http_method(source: &str) -> Option<HttpMethod> {
    REQUEST_MARKERS
        .iter()
        .find(|(marker, _)| source.contains(marker))
        .map(|(_, method)| *method)
}

/// Render `resource.method(params)` the way the method is called
pub fn render_signature(resource: &str, method: &MethodSpec) -> String {
    let mut parts = Vec::with_capacity(method.params.len());
    let mut star_seen = false;
    for param in &method.params {
        match param.kind {
            ParamKind::Standard => parts.push(render_param(param)),
            ParamKind::VarPositional => {
                star_seen = true;
                parts.push(format!("*{}", param.name));
            }
            ParamKind::KeywordOnly => {
                if !star_seen {
                    star_seen = true;
                    parts.push("*".to_string());
                }
                parts.push(render_param(param));
            }
            ParamKind::VarKeyword => parts.push(format!("**{}", param.name)),
        }
    }
    format!("{}.{}({})", resource, method.name, parts.join(", "))
}

fn render_param(param: &ParamSpec) -> String {
    match &param.default {
        Some(default) => format!("{}={}", param.name, default),
        None => param.name.clone(),
    }
}

/// Normalise docstring indentation.
///
/// Tabs are expanded to 8-column stops, the first line loses its leading
/// whitespace, the common indentation of the remaining lines is removed,
/// and empty lines at either end are dropped. Trailing whitespace is kept.
/// Returns `None` when only whitespace is left.
pub fn clean_doc(doc: &str) -> Option<String> {
    let expanded = expand_tabs(doc);
    let lines: Vec<&str> = expanded.split('\n').collect();

    let margin = lines[1..]
        .iter()
        .filter(|line| !line.trim_start().is_empty())
        .map(|line| line.len() - line.trim_start().len())
        .min();

    let mut cleaned: Vec<&str> = Vec::with_capacity(lines.len());
    cleaned.push(lines[0].trim_start());
    for &line in &lines[1..] {
        cleaned.push(match margin {
            Some(margin) if line.len() <= margin => "",
            Some(margin) => line.get(margin..).unwrap_or_else(|| line.trim_start()),
            None => line,
        });
    }

    while cleaned.last().is_some_and(|l| l.is_empty()) {
        cleaned.pop();
    }
    let start = cleaned.iter().position(|l| !l.is_empty())?;
    let text = cleaned[start..].join("\n");
    (!text.trim().is_empty()).then_some(text)
}

/// Replace tabs with spaces up to the next multiple of 8 columns
fn expand_tabs(text: &str) -> String {
    const TAB_SIZE: usize = 8;
    let mut out = String::with_capacity(text.len());
    let mut column = 0;
    for ch in text.chars() {
        match ch {
            '\t' => {
                let pad = TAB_SIZE - column % TAB_SIZE;
                out.push_str(&" ".repeat(pad));
                column += pad;
            }
            '\n' | '\r' => {
                out.push(ch);
                column = 0;
            }
            _ => {
                out.push(ch);
                column += 1;
            }
        }
    }
    out
}

/// Build the record for one method of a resource
pub fn method_record(resource: &str, method: &MethodSpec) -> ActionRecord {
    let legacy = method.legacy.then(|| Legacy {
        replaced_by: method.replaced_by.clone(),
    });
    let http_method = method
        .http_method
        .or_else(|| method.source.as_deref().and_then(infer_http_method));

    let mut positional_args = Vec::new();
    let mut options = Vec::new();
    for param in &method.params {
        match param.display_value() {
            Some(value) => options.push(ActionOption::new(&param.name, value)),
            None => positional_args.push(param.name.clone()),
        }
    }

    ActionRecord {
        resource: resource.to_string(),
        action: method.name.clone(),
        legacy,
        description: method.doc.as_deref().and_then(clean_doc),
        http_method,
        locator: Locator::Call(render_signature(resource, method)),
        positional_args,
        options: Some(options),
    }
}
