//! Prompt text and request construction.

use sliedic_core::{StoreChain, NON_LIVE_MARKER};

use crate::types::{
    Content, GenerateContentRequest, GenerationConfig, GoogleSearch, ThinkingConfig, Tool,
};

/// Placeholder answer when the model returns no text at all.
pub const EMPTY_ANSWER_PLACEHOLDER: &str = "Dáta nedostupné.";

/// Human-readable half of the annotation appended to knowledge-only answers.
pub const NON_LIVE_NOTICE: &str =
    "Vyhľadávanie na webe nebolo dostupné; ceny pochádzajú zo znalostí modelu a nemusia byť aktuálne.";

/// Markdown header row the model is asked to produce.
const TABLE_HEADER: &str = "| Obchod | Produkt | Cena | Platnosť akcie |";

fn chain_list() -> String {
    StoreChain::ALL
        .iter()
        .map(|c| c.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Instruction for the grounded attempt: live web data only.
#[must_use]
pub fn grounded_instruction() -> String {
    format!(
        "Si bezplatný nákupný asistent pre Slovensko. Tvojou úlohou je nájsť aktuálne \
         najlepšie akciové ceny potravín v obchodoch: {chains}.\n\n\
         FORMÁT:\n\
         1. Markdown tabuľka s presne štyrmi stĺpcami: {TABLE_HEADER}\n\
         2. Pod tabuľkou krátke odporúčanie, kde nakúpiť najvýhodnejšie.\n\n\
         Dôležité: Používaj len Google Search grounding na získanie aktuálnych dát z webu.",
        chains = chain_list(),
    )
}

/// Instruction for the fallback attempt: the model may answer from what it knows.
#[must_use]
pub fn knowledge_only_instruction() -> String {
    format!(
        "Si bezplatný nákupný asistent pre Slovensko. Vyhľadávanie na webe nie je dostupné, \
         odpovedz preto zo svojich znalostí o bežných a akciových cenách potravín v obchodoch: \
         {chains}.\n\n\
         FORMÁT:\n\
         1. Markdown tabuľka s presne štyrmi stĺpcami: {TABLE_HEADER}\n\
         2. Pod tabuľkou krátke odporúčanie. Ak platnosť akcie nepoznáš, napíš \"odhad\".",
        chains = chain_list(),
    )
}

/// User turn sent for a search term.
#[must_use]
pub fn user_content(term: &str) -> String {
    format!("Nájdi ceny pre: {term} v SR obchodoch.")
}

/// Builds the `generateContent` request for `term`.
///
/// Thinking is disabled in both variants to keep latency and token use down.
#[must_use]
pub fn build_request(term: &str, grounded: bool) -> GenerateContentRequest {
    let (instruction, tools) = if grounded {
        (
            grounded_instruction(),
            vec![Tool {
                google_search: GoogleSearch::default(),
            }],
        )
    } else {
        (knowledge_only_instruction(), Vec::new())
    };

    GenerateContentRequest {
        system_instruction: Content::text(None, instruction),
        contents: vec![Content::text(Some("user"), user_content(term))],
        tools,
        generation_config: GenerationConfig {
            thinking_config: ThinkingConfig { thinking_budget: 0 },
        },
    }
}

/// Appends the non-live annotation to `text` unless it is already present.
#[must_use]
pub fn annotate_non_live(text: &str) -> String {
    if text.contains(NON_LIVE_MARKER) {
        return text.to_owned();
    }
    format!("{}\n\n{NON_LIVE_MARKER} {NON_LIVE_NOTICE}", text.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grounded_request_carries_search_tool_and_term() {
        let request = build_request("Maslo", true);
        assert!(request.uses_search());
        let user = request.contents[0].parts[0].text.as_deref().unwrap();
        assert_eq!(user, "Nájdi ceny pre: Maslo v SR obchodoch.");
        assert_eq!(request.contents[0].role.as_deref(), Some("user"));
    }

    #[test]
    fn knowledge_only_request_has_no_tools() {
        let request = build_request("Maslo", false);
        assert!(!request.uses_search());
        let instruction = request.system_instruction.parts[0].text.as_deref().unwrap();
        assert!(instruction.contains("zo svojich znalostí"));
    }

    #[test]
    fn instructions_name_every_chain_and_the_table_contract() {
        for instruction in [grounded_instruction(), knowledge_only_instruction()] {
            for chain in StoreChain::ALL {
                assert!(instruction.contains(chain.display_name()), "{chain} missing");
            }
            assert!(instruction.contains(TABLE_HEADER));
        }
    }

    #[test]
    fn same_term_builds_same_request_shape() {
        let a = serde_json::to_value(build_request("Pivo", true)).unwrap();
        let b = serde_json::to_value(build_request("Pivo", true)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn annotation_is_appended_once() {
        let once = annotate_non_live("Zhrnutie.\n");
        assert!(once.starts_with("Zhrnutie.\n\n"));
        assert!(once.ends_with(NON_LIVE_NOTICE));
        let twice = annotate_non_live(&once);
        assert_eq!(twice.matches(NON_LIVE_MARKER).count(), 1);
    }
}
