use thiserror::Error;

/// Failure of a single `generateContent` call.
#[derive(Debug, Error)]
pub enum ApiFailure {
    /// Network or TLS failure from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx response. `code` is the HTTP status; `status` is Google's
    /// canonical status string (`"INVALID_ARGUMENT"`, ...) when the body
    /// carried the standard error envelope, otherwise empty.
    #[error("Gemini API error {code} {status}: {message}")]
    Api {
        code: u16,
        status: String,
        message: String,
    },

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Coarse error category for callers that render different advice per case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchErrorKind {
    MissingCredential,
    InvalidCredential,
    CapabilityRejected,
    RateLimited,
    Transport,
}

/// Classified failure of a whole price search.
///
/// A search either yields a complete `QueryResult` or exactly one of these.
#[derive(Debug, Error)]
pub enum SearchError {
    /// No API key configured; no request was sent.
    #[error("Gemini API key is not configured (set GEMINI_API_KEY)")]
    MissingApiKey,

    /// Google rejected the key. Fallback is skipped since it would fail the same way.
    #[error("Gemini rejected API key {masked_key}: {message}")]
    InvalidApiKey { masked_key: String, message: String },

    /// Search grounding was refused and no fallback attempt was configured.
    #[error("Gemini refused the grounded request: {message}")]
    CapabilityRejected { message: String },

    /// Search grounding was refused and the knowledge-only retry failed too.
    #[error("grounded request failed ({primary}); fallback request failed ({fallback})")]
    FallbackFailed { primary: String, fallback: String },

    #[error("Gemini rate limit or quota exceeded: {message}")]
    RateLimited { message: String },

    #[error("Gemini request failed: {message}")]
    Transport { message: String },
}

impl SearchError {
    #[must_use]
    pub fn kind(&self) -> SearchErrorKind {
        match self {
            SearchError::MissingApiKey => SearchErrorKind::MissingCredential,
            SearchError::InvalidApiKey { .. } => SearchErrorKind::InvalidCredential,
            SearchError::CapabilityRejected { .. } | SearchError::FallbackFailed { .. } => {
                SearchErrorKind::CapabilityRejected
            }
            SearchError::RateLimited { .. } => SearchErrorKind::RateLimited,
            SearchError::Transport { .. } => SearchErrorKind::Transport,
        }
    }
}

/// Masks an API key for display, keeping the first and last four characters.
///
/// Keys of eight characters or fewer are fully masked.
#[must_use]
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "****".to_string();
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}
