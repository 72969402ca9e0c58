//! Extraction of price offers from the pipe-delimited markdown table in a
//! model answer.
//!
//! The parser is a single line-oriented pass. A header row (one containing
//! [`STORE_HEADER_KEYWORD`]) or a separator row (`|---|`) arms it; only rows
//! seen after that point are read as data. Everything that is not a
//! pipe-delimited row is ignored, so the summary prose around the table
//! never produces offers and never disarms the parser.

use crate::offers::PriceOffer;

/// Lowercase keyword of the store column header (`| Obchod | ... |`).
pub const STORE_HEADER_KEYWORD: &str = "obchod";

/// Placeholder for a missing store or product cell.
pub const UNKNOWN_LABEL: &str = "Neznámy";

/// Placeholder for a missing price cell.
pub const MISSING_PRICE_LABEL: &str = "N/A";

/// Placeholder for a missing validity cell.
pub const UNSPECIFIED_VALIDITY_LABEL: &str = "Neuvedené";

const MIN_CELLS: usize = 3;

/// Extracts every data row of every markdown table in `text`.
///
/// Never fails: malformed or absent tables yield an empty vector. Rows with
/// fewer than three non-empty cells are dropped.
#[must_use]
pub fn extract_offers(text: &str) -> Vec<PriceOffer> {
    let mut offers = Vec::new();
    let mut table_started = false;

    for line in text.lines() {
        let trimmed = line.trim();
        if !is_candidate_row(trimmed) {
            continue;
        }

        if is_header_or_separator(trimmed) {
            table_started = true;
            continue;
        }

        if !table_started {
            continue;
        }

        if let Some(offer) = parse_row(trimmed) {
            offers.push(offer);
        }
    }

    offers
}

/// A candidate row starts with `|` and contains at least one more `|`.
fn is_candidate_row(trimmed: &str) -> bool {
    trimmed
        .strip_prefix('|')
        .is_some_and(|rest| rest.contains('|'))
}

fn is_header_or_separator(trimmed: &str) -> bool {
    trimmed.to_lowercase().contains(STORE_HEADER_KEYWORD) || trimmed.contains("---")
}

fn parse_row(trimmed: &str) -> Option<PriceOffer> {
    // Blank cells (including the ones produced by the outer pipes) are
    // discarded before counting.
    let cells: Vec<&str> = trimmed
        .split('|')
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .collect();

    if cells.len() < MIN_CELLS {
        return None;
    }

    let cell = |index: usize, default: &str| -> String {
        cells
            .get(index)
            .copied()
            .filter(|c| !c.is_empty())
            .unwrap_or(default)
            .to_string()
    };

    Some(PriceOffer {
        store: cell(0, UNKNOWN_LABEL),
        product: cell(1, UNKNOWN_LABEL),
        price: cell(2, MISSING_PRICE_LABEL),
        valid_until: Some(cell(3, UNSPECIFIED_VALIDITY_LABEL)),
    })
}

#[cfg(test)]
#[path = "table_test.rs"]
mod tests;
