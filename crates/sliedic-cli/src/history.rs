//! Recent search terms, newest first.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::store::KeyValueStore;

pub const HISTORY_KEY: &str = "sliedic_history";

/// Number of terms kept.
pub const MAX_ENTRIES: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub term: String,
    pub searched_at: DateTime<Utc>,
}

/// Loads the history. An unreadable value is logged and treated as empty so
/// a damaged entry never blocks searching.
///
/// # Errors
///
/// Returns an error if the store cannot be read.
pub(crate) fn load(store: &impl KeyValueStore) -> anyhow::Result<Vec<HistoryEntry>> {
    let Some(raw) = store.get(HISTORY_KEY)? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str(&raw) {
        Ok(entries) => Ok(entries),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable search history");
            Ok(Vec::new())
        }
    }
}

/// Moves `term` to the front of the history, dropping an older entry that
/// differs only in letter case, and trims to [`MAX_ENTRIES`].
///
/// # Errors
///
/// Returns an error if the store cannot be read or written.
pub(crate) fn record(
    store: &mut impl KeyValueStore,
    term: &str,
    now: DateTime<Utc>,
) -> anyhow::Result<()> {
    let lowered = term.to_lowercase();
    let mut entries = load(store)?;
    entries.retain(|e| e.term.to_lowercase() != lowered);
    entries.insert(
        0,
        HistoryEntry {
            term: term.to_owned(),
            searched_at: now,
        },
    );
    entries.truncate(MAX_ENTRIES);
    store.set(HISTORY_KEY, &serde_json::to_string(&entries)?)
}

/// Forgets all recorded searches.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub(crate) fn clear(store: &mut impl KeyValueStore) -> anyhow::Result<()> {
    store.clear(HISTORY_KEY)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::store::MemoryStore;

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 12, 9, minute, 0).unwrap()
    }

    fn terms(store: &MemoryStore) -> Vec<String> {
        load(store).unwrap().into_iter().map(|e| e.term).collect()
    }

    #[test]
    fn newest_search_comes_first() {
        let mut store = MemoryStore::default();
        record(&mut store, "Maslo", at(0)).unwrap();
        record(&mut store, "Mlieko", at(1)).unwrap();
        assert_eq!(terms(&store), ["Mlieko", "Maslo"]);
    }

    #[test]
    fn repeated_term_moves_to_front_case_insensitively() {
        let mut store = MemoryStore::default();
        record(&mut store, "Maslo", at(0)).unwrap();
        record(&mut store, "Pivo", at(1)).unwrap();
        record(&mut store, "maslo", at(2)).unwrap();

        let entries = load(&store).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].term, "maslo");
        assert_eq!(entries[0].searched_at, at(2));
        assert_eq!(entries[1].term, "Pivo");
    }

    #[test]
    fn history_is_capped() {
        let mut store = MemoryStore::default();
        for i in 0..15 {
            record(&mut store, &format!("term-{i}"), at(i)).unwrap();
        }
        let entries = load(&store).unwrap();
        assert_eq!(entries.len(), MAX_ENTRIES);
        assert_eq!(entries[0].term, "term-14");
        assert_eq!(entries[MAX_ENTRIES - 1].term, "term-5");
    }

    #[test]
    fn unreadable_history_is_treated_as_empty() {
        let mut store = MemoryStore::default();
        store.set(HISTORY_KEY, "{broken").unwrap();
        assert!(load(&store).unwrap().is_empty());
        record(&mut store, "Olej", at(0)).unwrap();
        assert_eq!(terms(&store), ["Olej"]);
    }

    #[test]
    fn clear_forgets_everything() {
        let mut store = MemoryStore::default();
        record(&mut store, "Vajcia", at(0)).unwrap();
        clear(&mut store).unwrap();
        assert!(load(&store).unwrap().is_empty());
    }
}
