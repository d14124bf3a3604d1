//! Option tables (`Argument | Description`)

use crate::types::ActionOption;
use scraper::{ElementRef, Selector};
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Header row an options table must have, in order
const OPTIONS_HEADER: [&str; 2] = ["Argument", "Description"];

static HEADER_CELL: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("thead th").expect("header cell selector"));

static BODY_ROW: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tbody > tr").expect("body row selector"));

/// Read the ordered `(name, description)` pairs of an options table.
///
/// Returns `None` when the table is not an options table, when the header
/// row is missing, or when any body row does not have exactly two cells.
pub fn parse_options_table(table: ElementRef<'_>) -> Option<Vec<ActionOption>> {
    let headers: Vec<String> = table.select(&HEADER_CELL).map(cell_text).collect();
    if headers.is_empty() {
        warn!("Table without header row, ignoring options");
        return None;
    }
    if headers != OPTIONS_HEADER {
        debug!(?headers, "Not an options table");
        return None;
    }

    let mut options = Vec::new();
    for row in table.select(&BODY_ROW) {
        let cells: Vec<String> = row
            .children()
            .filter_map(ElementRef::wrap)
            .filter(|cell| cell.value().name() == "td")
            .map(cell_text)
            .collect();
        match <[String; 2]>::try_from(cells) {
            Ok([name, description]) => options.push(ActionOption { name, description }),
            Err(cells) => {
                warn!(
                    cells = cells.len(),
                    "Malformed options row, omitting options"
                );
                return None;
            }
        }
    }
    Some(options)
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}
