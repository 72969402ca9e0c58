//! Terminal rendering of search results and classified errors.
//!
//! "No table rows but a summary" and "the request failed" are different
//! states: the first renders a normal result with an empty-table notice, the
//! second renders only the error panel.

use std::io::{self, Write};

use console::Style;
use sliedic_core::table::UNSPECIFIED_VALIDITY_LABEL;
use sliedic_core::{PriceOffer, QueryResult, StoreChain};
use sliedic_gemini::{SearchError, SearchErrorKind};

pub const NO_TABLE_MESSAGE: &str =
    "Tabuľkové dáta neboli nájdené. Pozrite si AI zhrnutie nižšie.";

pub const NON_LIVE_WARNING: &str =
    "Pozor: výsledky nepochádzajú z aktuálneho vyhľadávania na webe a môžu byť neaktuálne.";

const HEADERS: [&str; 4] = ["OBCHOD", "PRODUKT", "CENA", "PLATNOSŤ"];

/// Renders a successful search.
///
/// # Errors
///
/// Returns any I/O error from `out`.
pub(crate) fn render_result(
    out: &mut impl Write,
    term: &str,
    result: &QueryResult,
) -> io::Result<()> {
    let bold = Style::new().bold();
    let dim = Style::new().dim();

    writeln!(out, "{}", bold.apply_to(format!("Výsledky pre: {term}")))?;
    writeln!(out)?;

    if result.offers.is_empty() {
        writeln!(out, "{}", dim.apply_to(NO_TABLE_MESSAGE))?;
    } else {
        render_offers(out, &result.offers)?;
    }
    writeln!(out)?;

    if !result.is_live() {
        writeln!(out, "{}", Style::new().yellow().bold().apply_to(NON_LIVE_WARNING))?;
        writeln!(out)?;
    }

    writeln!(out, "{}", Style::new().blue().bold().apply_to("Zhrnutie od AI"))?;
    writeln!(out, "{}", result.text.trim())?;

    if !result.sources.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", bold.apply_to("Zdroje"))?;
        for source in &result.sources {
            writeln!(out, "  - {} {}", source.title, dim.apply_to(&source.uri))?;
        }
    }

    Ok(())
}

fn render_offers(out: &mut impl Write, offers: &[PriceOffer]) -> io::Result<()> {
    let rows: Vec<[&str; 4]> = offers
        .iter()
        .map(|o| {
            [
                o.store.as_str(),
                o.product.as_str(),
                o.price.as_str(),
                o.valid_until.as_deref().unwrap_or(UNSPECIFIED_VALIDITY_LABEL),
            ]
        })
        .collect();

    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let header_style = Style::new().dim().bold();
    let header: Vec<String> = HEADERS
        .iter()
        .zip(widths)
        .map(|(h, w)| format!("{h:<w$}"))
        .collect();
    writeln!(out, "{}", header_style.apply_to(header.join("  ")))?;

    let price_style = Style::new().green().bold();
    for (row, offer) in rows.iter().zip(offers) {
        // Pad before styling so escape codes do not disturb alignment.
        let store = format!("{:<w$}", row[0], w = widths[0]);
        writeln!(
            out,
            "{}  {:<w1$}  {}  {}",
            badge_style(StoreChain::detect(&offer.store)).apply_to(store),
            row[1],
            price_style.apply_to(format!("{:<w$}", row[2], w = widths[2])),
            row[3],
            w1 = widths[1],
        )?;
    }

    Ok(())
}

fn badge_style(chain: Option<StoreChain>) -> Style {
    match chain {
        Some(StoreChain::Tesco) => Style::new().white().on_blue().bold(),
        Some(StoreChain::Lidl) => Style::new().yellow().on_blue().bold(),
        Some(StoreChain::Kaufland | StoreChain::Jednota) => Style::new().white().on_red().bold(),
        Some(StoreChain::Billa) => Style::new().black().on_yellow().bold(),
        None => Style::new().bold(),
    }
}

const MISSING_KEY_HINTS: &[&str] = &[
    "Nastavte premennú GEMINI_API_KEY (napríklad v súbore .env).",
    "Spustite príkaz znova.",
];

const INVALID_KEY_HINTS: &[&str] = &[
    "Skontrolujte, či je GEMINI_API_KEY správny kľúč pre Gemini API.",
    "Uistite sa, že v ňom nie sú medzery ani úvodzovky.",
    "Po zmene kľúča spustite príkaz znova.",
];

const CAPABILITY_HINTS: &[&str] = &[
    "Povoľte záložný režim (SLIEDIC_FALLBACK_ENABLED=true).",
    "Alebo použite kľúč či model s podporou Google Search.",
];

const RATE_LIMIT_HINTS: &[&str] = &["Skúste to o chvíľu znova."];

const TRANSPORT_HINTS: &[&str] = &["Skontrolujte pripojenie k internetu a skúste to znova."];

/// Heading and operator hints for each error kind.
fn advice(kind: SearchErrorKind) -> (&'static str, &'static [&'static str]) {
    match kind {
        SearchErrorKind::MissingCredential => ("Chýba API kľúč", MISSING_KEY_HINTS),
        SearchErrorKind::InvalidCredential => ("Problém s kľúčom", INVALID_KEY_HINTS),
        SearchErrorKind::CapabilityRejected => {
            ("Vyhľadávanie na webe nie je dostupné", CAPABILITY_HINTS)
        }
        SearchErrorKind::RateLimited => ("Free limit vyčerpaný", RATE_LIMIT_HINTS),
        SearchErrorKind::Transport => ("Chyba spojenia", TRANSPORT_HINTS),
    }
}

/// Renders the error panel for a failed search.
///
/// # Errors
///
/// Returns any I/O error from `out`.
pub(crate) fn render_error(out: &mut impl Write, err: &SearchError) -> io::Result<()> {
    let (title, hints) = advice(err.kind());

    writeln!(out, "{}", Style::new().red().bold().apply_to(title))?;
    writeln!(out, "{} {err}", Style::new().dim().apply_to("Diagnostické hlásenie:"))?;

    if !hints.is_empty() {
        writeln!(out)?;
        writeln!(out, "{}", Style::new().bold().apply_to("Ako to opraviť?"))?;
        for (i, hint) in hints.iter().enumerate() {
            writeln!(out, "  {}. {hint}", i + 1)?;
        }
    }

    Ok(())
}

#[must_use]
pub(crate) fn kind_label(kind: SearchErrorKind) -> &'static str {
    match kind {
        SearchErrorKind::MissingCredential => "missing_credential",
        SearchErrorKind::InvalidCredential => "invalid_credential",
        SearchErrorKind::CapabilityRejected => "capability_rejected",
        SearchErrorKind::RateLimited => "rate_limited",
        SearchErrorKind::Transport => "transport",
    }
}

/// Machine-readable form of a failed search for `--json`.
#[must_use]
pub(crate) fn error_json(err: &SearchError) -> serde_json::Value {
    serde_json::json!({
        "error": {
            "kind": kind_label(err.kind()),
            "message": err.to_string(),
        }
    })
}
