//! `search` and `categories` command handlers.

use std::io::Write;

use anyhow::Context;
use chrono::Utc;
use sliedic_gemini::{GenerateContent, PricePipeline};

use crate::render::{error_json, render_error, render_result};
use crate::store::KeyValueStore;
use crate::{history, session};

/// Quick-pick terms listed by `sliedic categories`.
pub const CATEGORIES: [&str; 6] = ["Maslo", "Mlieko", "Vajcia", "Olej", "Kuracie prsia", "Pivo"];

const SEARCHING_STATUS: &str = "Sliedim v letákoch...";

/// How a search command ended, for the process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SearchOutcome {
    Found,
    Failed,
}

/// Joins the positional words into one term. Returns `None` for blank input.
pub(crate) fn join_term(words: &[String]) -> Option<String> {
    let term = words.join(" ");
    let term = term.trim();
    (!term.is_empty()).then(|| term.to_owned())
}

/// Runs one price search and prints the result or the classified error.
///
/// Results go to `out`; progress and error panels go to `diag`. With `json`
/// both the result and the error are printed to `out` as JSON.
///
/// # Errors
///
/// Returns an error if the user is not logged in, the term is blank, or the
/// store or output cannot be written. A failed search is not an error; it is
/// reported through [`SearchOutcome::Failed`].
pub(crate) async fn run_search<B: GenerateContent>(
    store: &mut impl KeyValueStore,
    pipeline: &PricePipeline<B>,
    words: &[String],
    json: bool,
    out: &mut impl Write,
    diag: &mut impl Write,
) -> anyhow::Result<SearchOutcome> {
    if !session::is_authenticated(store)? {
        anyhow::bail!("not logged in; run `sliedic login` first");
    }
    let term = join_term(words).context("search term must not be blank")?;

    history::record(store, &term, Utc::now())?;

    if !json {
        writeln!(diag, "{SEARCHING_STATUS}")?;
    }

    match pipeline.search(&term).await {
        Ok(result) => {
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&result)?)?;
            } else {
                render_result(out, &term, &result)?;
            }
            Ok(SearchOutcome::Found)
        }
        Err(err) => {
            tracing::debug!(kind = ?err.kind(), error = %err, "search failed");
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&error_json(&err))?)?;
            } else {
                render_error(diag, &err)?;
            }
            Ok(SearchOutcome::Failed)
        }
    }
}

/// Prints the quick-pick categories.
///
/// # Errors
///
/// Returns any I/O error from `out`.
pub(crate) fn run_categories(out: &mut impl Write) -> std::io::Result<()> {
    for category in CATEGORIES {
        writeln!(out, "{category}")?;
    }
    writeln!(out)?;
    writeln!(out, "Použite: sliedic search <výraz>")
}

#[cfg(test)]
#[path = "search_test.rs"]
mod tests;
