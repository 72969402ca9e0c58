use serde::{Deserialize, Serialize};

use crate::table::extract_offers;

/// Machine-readable tag placed in answer text that did not come from a live
/// web search.
pub const NON_LIVE_MARKER: &str = "[nezive-data]";

/// One row of the price table returned by the model.
///
/// `price` is kept as the formatted, currency-bearing string the model wrote
/// (e.g. `"1.49 €"`); it is never parsed to a number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceOffer {
    pub store: String,
    pub product: String,
    pub price: String,
    /// Promotion validity as written by the model, e.g. `"do 12.05"`.
    pub valid_until: Option<String>,
}

/// A web citation attached to a grounded answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroundingSource {
    pub title: String,
    pub uri: String,
}

/// The complete answer to one price search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Full free-form answer, including the table and any summary.
    pub text: String,
    pub sources: Vec<GroundingSource>,
    /// Derived from `text` by [`extract_offers`]; never set independently.
    pub offers: Vec<PriceOffer>,
}

impl QueryResult {
    /// Builds a result whose offers are extracted from `text`.
    #[must_use]
    pub fn from_text(text: String, sources: Vec<GroundingSource>) -> Self {
        let offers = extract_offers(&text);
        Self {
            text,
            sources,
            offers,
        }
    }

    /// Returns `false` when the answer was produced from model knowledge
    /// rather than a live web search.
    #[must_use]
    pub fn is_live(&self) -> bool {
        !self.text.contains(NON_LIVE_MARKER)
    }
}
