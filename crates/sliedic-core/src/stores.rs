use serde::{Deserialize, Serialize};

/// Retail chains the assistant is asked to cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreChain {
    Tesco,
    Lidl,
    Kaufland,
    Billa,
    Jednota,
}

/// Lowercase name fragments and the chain they identify, checked in order.
const NAME_FRAGMENTS: &[(&str, StoreChain)] = &[
    ("tesco", StoreChain::Tesco),
    ("lidl", StoreChain::Lidl),
    ("kaufland", StoreChain::Kaufland),
    ("jednota", StoreChain::Jednota),
    ("billa", StoreChain::Billa),
    ("coop", StoreChain::Jednota),
];

impl StoreChain {
    /// All chains, in the order they are listed to the model.
    pub const ALL: [StoreChain; 5] = [
        StoreChain::Tesco,
        StoreChain::Lidl,
        StoreChain::Kaufland,
        StoreChain::Billa,
        StoreChain::Jednota,
    ];

    /// Recognises a chain from a free-form store cell such as
    /// `"Tesco Hypermarket"` or `"COOP Jednota"`.
    #[must_use]
    pub fn detect(store: &str) -> Option<Self> {
        let lower = store.to_lowercase();
        NAME_FRAGMENTS
            .iter()
            .find(|(fragment, _)| lower.contains(fragment))
            .map(|(_, chain)| *chain)
    }

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            StoreChain::Tesco => "Tesco",
            StoreChain::Lidl => "Lidl",
            StoreChain::Kaufland => "Kaufland",
            StoreChain::Billa => "Billa",
            StoreChain::Jednota => "Jednota",
        }
    }
}

impl std::fmt::Display for StoreChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_matches_case_insensitively() {
        assert_eq!(StoreChain::detect("LIDL"), Some(StoreChain::Lidl));
        assert_eq!(
            StoreChain::detect("Tesco Hypermarket Bratislava"),
            Some(StoreChain::Tesco)
        );
    }

    #[test]
    fn detect_maps_coop_to_jednota() {
        assert_eq!(StoreChain::detect("COOP"), Some(StoreChain::Jednota));
        assert_eq!(StoreChain::detect("Coop Jednota"), Some(StoreChain::Jednota));
    }

    #[test]
    fn detect_unknown_store_is_none() {
        assert_eq!(StoreChain::detect("Fresh"), None);
        assert_eq!(StoreChain::detect(""), None);
    }

    #[test]
    fn display_uses_brand_capitalisation() {
        let names: Vec<String> = StoreChain::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["Tesco", "Lidl", "Kaufland", "Billa", "Jednota"]);
    }
}
