//! Display-key keyed collection of extracted actions
//!
//! Records are inserted under their display key. A later record with the
//! same key replaces the earlier one, and iteration is always in key order.

use crate::types::ActionRecord;
use serde::Serialize;
use std::collections::BTreeMap;

/// Sorted, de-duplicated set of action records
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: BTreeMap<String, ActionRecord>,
}

/// One catalog entry as emitted in JSON output
#[derive(Debug, Serialize)]
pub struct CatalogEntry<'a> {
    pub key: &'a str,
    pub record: &'a ActionRecord,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record, returning the one it replaced
    pub fn insert(&mut self, record: ActionRecord) -> Option<ActionRecord> {
        let key = record.display_key();
        let replaced = self.entries.insert(key, record);
        if let Some(previous) = &replaced {
            tracing::debug!(
                resource = %previous.resource,
                action = %previous.action,
                "Display key collision, keeping later record"
            );
        }
        replaced
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&ActionRecord> {
        self.entries.get(key)
    }

    /// Iterate `(display key, record)` pairs in key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ActionRecord)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Iterate `(display key, body lines)` pairs in key order
    pub fn blocks(&self) -> impl Iterator<Item = (&str, Vec<String>)> {
        self.iter().map(|(key, record)| (key, record.body_lines()))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Entries in key order, shaped for serialization
    pub fn entries(&self) -> Vec<CatalogEntry<'_>> {
        self.iter()
            .map(|(key, record)| CatalogEntry { key, record })
            .collect()
    }

    /// Render the plain-text reference
    ///
    /// Every block starts with an empty line followed by the key and its
    /// body lines.
    pub fn render_text(&self) -> String {
        let mut output = String::new();
        for (key, lines) in self.blocks() {
            output.push('\n');
            output.push_str(key);
            output.push('\n');
            output.push_str(&lines.join("\n"));
            output.push('\n');
        }
        output
    }
}

impl FromIterator<ActionRecord> for Catalog {
    fn from_iter<I: IntoIterator<Item = ActionRecord>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for record in iter {
            catalog.insert(record);
        }
        catalog
    }
}

impl Extend<ActionRecord> for Catalog {
    fn extend<I: IntoIterator<Item = ActionRecord>>(&mut self, iter: I) {
        for record in iter {
            self.insert(record);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{HttpMethod, Legacy, Locator};

    fn record(resource: &str, action: &str, desc: &str) -> ActionRecord {
        ActionRecord {
            resource: resource.to_string(),
            action: action.to_string(),
            legacy: None,
            description: Some(desc.to_string()),
            http_method: Some(HttpMethod::Get),
            locator: Locator::Path(Some("/apps".to_string())),
            positional_args: Vec::new(),
            options: None,
        }
    }

    #[test]
    fn test_sorted_by_key() {
        let catalog: Catalog = vec![
            record("Devices", "List all", "d"),
            record("Apps", "Retrieve one", "b"),
            record("Apps", "List all", "a"),
        ]
        .into_iter()
        .collect();

        let keys: Vec<&str> = catalog.keys().collect();
        assert_eq!(
            keys,
            vec!["Apps - List All", "Apps - Retrieve One", "Devices - List All"]
        );
    }

    #[test]
    fn test_last_write_wins() {
        let mut catalog = Catalog::new();
        assert!(catalog.insert(record("Apps", "list all", "first")).is_none());
        // Different raw names, same display key
        let replaced = catalog.insert(record("Apps", "List All", "second"));
        assert_eq!(
            replaced.and_then(|r| r.description),
            Some("first".to_string())
        );
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog
                .get("Apps - List All")
                .and_then(|r| r.description.as_deref()),
            Some("second")
        );
    }

    #[test]
    fn test_render_text() {
        let mut legacy = record("Apps", "old_list", "ignored");
        legacy.legacy = Some(Legacy::default());
        let catalog: Catalog = vec![record("Apps", "List all", "Lists apps."), legacy]
            .into_iter()
            .collect();

        assert_eq!(
            catalog.render_text(),
            "\nApps - List All\nDesc: Lists apps.\nMethod: GET\nPath: /apps\nArgs: \nOptions:\n\
             \nApps - Old List (legacy)\n\n"
        );
    }

    #[test]
    fn test_entries_serialize_in_order() {
        let catalog: Catalog = vec![
            record("Blueprints", "x", "blueprints"),
            record("Apps", "x", "apps"),
        ]
        .into_iter()
        .collect();
        let json = serde_json::to_value(catalog.entries()).unwrap();
        assert_eq!(json[0]["key"], "Apps - X");
        assert_eq!(json[1]["key"], "Blueprints - X");
        assert_eq!(json[1]["record"]["description"], "blueprints");
        assert_eq!(json[0]["record"]["http_method"], "GET");
    }

    #[test]
    fn test_minor_word_keys_sort_after_capitalised() {
        // "A" is a minor word and stays lowercase, so it sorts after "B"
        let catalog: Catalog = vec![record("A", "x", "a"), record("B", "x", "b")]
            .into_iter()
            .collect();
        let keys: Vec<&str> = catalog.keys().collect();
        assert_eq!(keys, vec!["B - X", "a - X"]);
    }

    #[test]
    fn test_empty_catalog_renders_nothing() {
        let catalog = Catalog::new();
        assert!(catalog.is_empty());
        assert_eq!(catalog.render_text(), "");
    }
}
