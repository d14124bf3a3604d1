//! Display names for resources and actions
//!
//! Identifiers from the client library (`DeviceGroups`, `list_all`) and raw
//! headings from the HTML docs (`Custom Configuration Profiles`) are turned
//! into title-cased phrases. Small words stay lowercase and a few domain
//! acronyms keep a fixed casing.

use regex::Regex;
use std::sync::LazyLock;

/// Words whose casing is fixed regardless of position
const CASE_EXCEPTIONS: &[(&str, &str)] = &[
    ("and", "and"),
    ("but", "but"),
    ("for", "for"),
    ("or", "or"),
    ("nor", "nor"),
    ("the", "the"),
    ("a", "a"),
    ("an", "an"),
    ("to", "to"),
    ("as", "as"),
    ("dep", "DEP"),
    ("csr", "CSR"),
    ("filevault", "FileVault"),
    ("os", "OS"),
];

static UPPERCASE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z]+)").expect("uppercase run pattern"));

static CAPITALIZED_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([A-Z][a-z]+)").expect("capitalized word pattern"));

/// Title-case a phrase word by word
pub fn title_case(raw: &str) -> String {
    raw.split_whitespace()
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Display name for a resource identifier such as `DEPServers`
pub fn cap_resource(identifier: &str) -> String {
    let words: Vec<String> = identifier
        .split_whitespace()
        .flat_map(camel_segments)
        .collect();
    title_case(&words.join(" "))
}

/// Display name for an action identifier such as `list_devices`
pub fn cap_action(identifier: &str) -> String {
    title_case(&identifier.replace('_', " "))
}

fn capitalize(word: &str) -> String {
    let lower = word.to_lowercase();
    if let Some((_, fixed)) = CASE_EXCEPTIONS.iter().find(|(key, _)| *key == lower) {
        return (*fixed).to_string();
    }
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Split one camel-case token into words.
///
/// Segments that spell a mixed-case exception when glued back together
/// (`File` + `Vault`) stay a single word.
fn camel_segments(token: &str) -> Vec<String> {
    let spaced = UPPERCASE_RUN.replace_all(token, " $1");
    let spaced = CAPITALIZED_WORD.replace_all(&spaced, " $1");
    let segments: Vec<&str> = spaced.split_whitespace().collect();

    let mut words = Vec::with_capacity(segments.len());
    let mut i = 0;
    while i < segments.len() {
        if let Some(next) = segments.get(i + 1) {
            let joined = format!("{}{}", segments[i], next);
            if is_compound_exception(&joined) {
                words.push(joined);
                i += 2;
                continue;
            }
        }
        words.push(segments[i].to_string());
        i += 1;
    }
    words
}

fn is_compound_exception(joined: &str) -> bool {
    CASE_EXCEPTIONS.iter().any(|(_, fixed)| *fixed == joined)
}
