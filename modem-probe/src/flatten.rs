//! Table flattening
//!
//! First stage of the pipeline: reduce the page's HTML tables to a flat,
//! ordered sequence of cleaned cell tokens. Token order is significant
//! downstream, since it encodes the row/column position of each reading
//! in the implicit grid.

use scraper::{Html, Selector};

use crate::types::{ProbeError, Result};

/// Firmware-dependent boilerplate sentence embedded in the signal table.
/// Tokens starting with it carry no data and are dropped.
const BOILERPLATE_PREFIX: &str = "The Downstream Power Level reading is a";

/// Flatten the text content of every table-data cell in document order.
///
/// Per-token normalization, in order: drop whitespace-only and boilerplate
/// tokens, strip non-breaking spaces, strip embedded newlines, trim. Only
/// non-empty results are emitted.
///
/// A document with no table cells at all is not the page we expect and
/// fails with [`ProbeError::Parse`].
pub fn flatten_cells(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let cell_selector = Selector::parse("tr td")
        .map_err(|e| ProbeError::Parse(format!("bad cell selector: {}", e)))?;
    let inner_cell_selector = Selector::parse("td")
        .map_err(|e| ProbeError::Parse(format!("bad cell selector: {}", e)))?;

    let mut saw_cell = false;
    let mut tokens = Vec::new();

    for cell in document.select(&cell_selector) {
        saw_cell = true;

        // Nested tables: text is collected at the innermost cell only
        if cell.select(&inner_cell_selector).next().is_some() {
            continue;
        }

        for text in cell.text() {
            if text.trim().is_empty() || text.trim_start().starts_with(BOILERPLATE_PREFIX) {
                continue;
            }
            let cleaned = text
                .replace('\u{a0}', "")
                .replace('\n', "")
                .trim()
                .to_string();
            if !cleaned.is_empty() {
                tokens.push(cleaned);
            }
        }
    }

    if !saw_cell {
        return Err(ProbeError::Parse(
            "no table cells found in document".to_string(),
        ));
    }

    log::trace!("Flattened {} cell tokens", tokens.len());
    Ok(tokens)
}
