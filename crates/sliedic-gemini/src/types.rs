//! Gemini `generateContent` wire types.
//!
//! Only the fields this crate sends or reads are modelled. Response fields
//! are all optional or defaulted so that candidates without content (safety
//! blocks, empty answers) still deserialize.

use serde::{Deserialize, Serialize};
use sliedic_core::GroundingSource;

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub system_instruction: Content,
    pub contents: Vec<Content>,
    /// Empty for knowledge-only requests; the field is then omitted.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<Tool>,
    pub generation_config: GenerationConfig,
}

impl GenerateContentRequest {
    /// Returns `true` when the request asks for Google Search grounding.
    #[must_use]
    pub fn uses_search(&self) -> bool {
        !self.tools.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    #[must_use]
    pub fn text(role: Option<&str>, text: impl Into<String>) -> Self {
        Self {
            role: role.map(str::to_owned),
            parts: vec![Part {
                text: Some(text.into()),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Serializes as `{"googleSearch": {}}`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub google_search: GoogleSearch,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct GoogleSearch {}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub thinking_config: ThinkingConfig,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThinkingConfig {
    pub thinking_budget: u32,
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
    #[serde(default)]
    pub grounding_metadata: Option<GroundingMetadata>,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
    #[serde(default)]
    pub web_search_queries: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebSource>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WebSource {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate; empty when there is none.
    #[must_use]
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }

    /// Web citations of the first candidate that carry both a title and a URI.
    #[must_use]
    pub fn web_sources(&self) -> Vec<GroundingSource> {
        self.candidates
            .first()
            .and_then(|c| c.grounding_metadata.as_ref())
            .map(|meta| {
                meta.grounding_chunks
                    .iter()
                    .filter_map(|chunk| chunk.web.as_ref())
                    .filter_map(|web| match (web.title.as_deref(), web.uri.as_deref()) {
                        (Some(title), Some(uri)) if !title.is_empty() && !uri.is_empty() => {
                            Some(GroundingSource {
                                title: title.to_owned(),
                                uri: uri.to_owned(),
                            })
                        }
                        _ => None,
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Google's standard error body: `{"error": {"code", "message", "status"}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ApiErrorBody {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn response(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).expect("fixture should deserialize")
    }

    #[test]
    fn text_concatenates_parts_of_first_candidate() {
        let resp = response(json!({
            "candidates": [
                { "content": { "role": "model", "parts": [{ "text": "Ahoj " }, { "text": "svet" }] } },
                { "content": { "parts": [{ "text": "ignored" }] } }
            ]
        }));
        assert_eq!(resp.text(), "Ahoj svet");
    }

    #[test]
    fn text_is_empty_without_candidates() {
        assert_eq!(response(json!({})).text(), "");
        assert_eq!(
            response(json!({ "candidates": [{ "finishReason": "SAFETY" }] })).text(),
            ""
        );
    }

    #[test]
    fn web_sources_keep_only_complete_web_chunks() {
        let resp = response(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "x" }] },
                "groundingMetadata": {
                    "webSearchQueries": ["maslo akcia"],
                    "groundingChunks": [
                        { "web": { "uri": "https://lidl.sk/maslo", "title": "lidl.sk" } },
                        { "web": { "uri": "https://tesco.sk" } },
                        { "web": { "title": "bez odkazu" } },
                        { "retrievedContext": { "uri": "gs://x" } },
                        { "web": { "uri": "", "title": "prázdne" } }
                    ]
                }
            }]
        }));
        assert_eq!(
            resp.web_sources(),
            vec![GroundingSource {
                title: "lidl.sk".to_owned(),
                uri: "https://lidl.sk/maslo".to_owned(),
            }]
        );
    }

    #[test]
    fn grounded_request_serializes_search_tool() {
        let request = GenerateContentRequest {
            system_instruction: Content::text(None, "sys"),
            contents: vec![Content::text(Some("user"), "q")],
            tools: vec![Tool {
                google_search: GoogleSearch::default(),
            }],
            generation_config: GenerationConfig {
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["tools"], json!([{ "googleSearch": {} }]));
        assert_eq!(value["systemInstruction"], json!({ "parts": [{ "text": "sys" }] }));
        assert_eq!(value["contents"][0]["role"], "user");
        assert_eq!(
            value["generationConfig"],
            json!({ "thinkingConfig": { "thinkingBudget": 0 } })
        );
        assert!(request.uses_search());
    }

    #[test]
    fn knowledge_only_request_omits_tools() {
        let request = GenerateContentRequest {
            system_instruction: Content::text(None, "sys"),
            contents: vec![Content::text(Some("user"), "q")],
            tools: Vec::new(),
            generation_config: GenerationConfig {
                thinking_config: ThinkingConfig { thinking_budget: 0 },
            },
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("tools").is_none());
        assert!(!request.uses_search());
    }
}
