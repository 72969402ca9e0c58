//! Price-search pipeline: an ordered list of attempts evaluated until one
//! succeeds or a failure is not worth retrying.
//!
//! | Attempt         | Grounding | Result                                         |
//! |-----------------|-----------|------------------------------------------------|
//! | `Grounded`      | on        | text, web citations, offers                    |
//! | `KnowledgeOnly` | off       | annotated text, no citations, offers           |
//!
//! Only a [`ErrorClass::CapabilityRejected`] failure moves on to the next
//! attempt. Every other class ends the search immediately.

use sliedic_core::{gemini_api_key_from_env, AppConfig, QueryResult};

use crate::classify::{classify, ErrorClass};
use crate::client::{GeminiClient, GenerateContent};
use crate::error::{mask_api_key, ApiFailure, SearchError};
use crate::prompt::{annotate_non_live, build_request, EMPTY_ANSWER_PLACEHOLDER};
use crate::types::{GenerateContentRequest, GenerateContentResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    /// Live answer with Google Search grounding.
    Grounded,
    /// Answer from model knowledge; used when grounding is refused.
    KnowledgeOnly,
}

const WITH_FALLBACK: &[Attempt] = &[Attempt::Grounded, Attempt::KnowledgeOnly];
const WITHOUT_FALLBACK: &[Attempt] = &[Attempt::Grounded];

impl Attempt {
    #[must_use]
    pub fn request(self, term: &str) -> GenerateContentRequest {
        build_request(term, self == Attempt::Grounded)
    }

    /// Assembles the caller-facing result from a successful response.
    #[must_use]
    pub fn into_result(self, response: &GenerateContentResponse) -> QueryResult {
        let mut text = response.text();
        if text.trim().is_empty() {
            text = EMPTY_ANSWER_PLACEHOLDER.to_owned();
        }

        match self {
            Attempt::Grounded => QueryResult::from_text(text, response.web_sources()),
            Attempt::KnowledgeOnly => QueryResult::from_text(annotate_non_live(&text), Vec::new()),
        }
    }
}

/// Where a pipeline gets its API key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credential {
    /// A key supplied up front; `None` means no key is configured.
    Fixed(Option<String>),
    /// Re-read from `GEMINI_API_KEY` (or `API_KEY`) at the start of every
    /// search, so a rotated key applies without a restart.
    Environment,
}

impl Credential {
    /// The key to use for the next search, trimmed; `None` when unset or blank.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        match self {
            Credential::Fixed(key) => key
                .as_deref()
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_owned),
            Credential::Environment => gemini_api_key_from_env(),
        }
    }
}

impl From<Option<String>> for Credential {
    fn from(key: Option<String>) -> Self {
        Credential::Fixed(key)
    }
}

/// Runs price searches against a [`GenerateContent`] backend.
pub struct PricePipeline<B = GeminiClient> {
    backend: B,
    credential: Credential,
    fallback_enabled: bool,
}

impl PricePipeline<GeminiClient> {
    /// Builds a pipeline backed by a [`GeminiClient`] from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ApiFailure`] if the HTTP client cannot be constructed or the
    /// configured base URL is invalid.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiFailure> {
        let client = GeminiClient::from_config(config)?;
        Ok(Self::new(client, Credential::Environment).with_fallback(config.fallback_enabled))
    }
}

impl<B: GenerateContent> PricePipeline<B> {
    /// Creates a pipeline with fallback enabled.
    #[must_use]
    pub fn new(backend: B, credential: impl Into<Credential>) -> Self {
        Self {
            backend,
            credential: credential.into(),
            fallback_enabled: true,
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, enabled: bool) -> Self {
        self.fallback_enabled = enabled;
        self
    }

    #[must_use]
    pub fn attempts(&self) -> &'static [Attempt] {
        if self.fallback_enabled {
            WITH_FALLBACK
        } else {
            WITHOUT_FALLBACK
        }
    }

    /// Searches current prices for `term`.
    ///
    /// The caller is expected to pass a trimmed, non-blank term. Attempts run
    /// strictly one after another.
    ///
    /// # Errors
    ///
    /// - [`SearchError::MissingApiKey`] before any request when no key is set.
    /// - [`SearchError::InvalidApiKey`] when Google rejects the key.
    /// - [`SearchError::RateLimited`] on quota exhaustion.
    /// - [`SearchError::CapabilityRejected`] when grounding is refused and
    ///   fallback is disabled.
    /// - [`SearchError::FallbackFailed`] when grounding is refused and the
    ///   knowledge-only attempt fails as well.
    /// - [`SearchError::Transport`] for network, server, and decoding failures.
    pub async fn search(&self, term: &str) -> Result<QueryResult, SearchError> {
        let api_key = self.credential.current().ok_or(SearchError::MissingApiKey)?;

        let mut failures: Vec<(Attempt, ErrorClass, ApiFailure)> = Vec::new();

        for &attempt in self.attempts() {
            tracing::info!(?attempt, term, "searching prices");
            let request = attempt.request(term);

            match self.backend.generate_content(&api_key, &request).await {
                Ok(response) => {
                    let result = attempt.into_result(&response);
                    tracing::info!(
                        ?attempt,
                        offers = result.offers.len(),
                        sources = result.sources.len(),
                        "price search answered"
                    );
                    return Ok(result);
                }
                Err(err) => {
                    let class = classify(&err);
                    tracing::warn!(?attempt, ?class, error = %err, "price search attempt failed");
                    failures.push((attempt, class, err));
                    if class != ErrorClass::CapabilityRejected {
                        break;
                    }
                }
            }
        }

        Err(Self::classified_error(&api_key, &failures))
    }

    /// Collapses the failed attempts into the single error surfaced to the caller.
    ///
    /// The class of the last failure decides the variant; a capability
    /// rejection followed by any non-credential, non-quota failure is
    /// reported with both messages.
    fn classified_error(api_key: &str, failures: &[(Attempt, ErrorClass, ApiFailure)]) -> SearchError {
        let Some((_, last_class, last_err)) = failures.last() else {
            return SearchError::Transport {
                message: "no request was attempted".to_owned(),
            };
        };
        let message = failure_message(last_err);

        match last_class {
            ErrorClass::InvalidCredential => SearchError::InvalidApiKey {
                masked_key: mask_api_key(api_key),
                message,
            },
            ErrorClass::RateLimited => SearchError::RateLimited { message },
            ErrorClass::CapabilityRejected | ErrorClass::Transport if failures.len() > 1 => {
                SearchError::FallbackFailed {
                    primary: failure_message(&failures[0].2),
                    fallback: message,
                }
            }
            ErrorClass::CapabilityRejected => SearchError::CapabilityRejected { message },
            ErrorClass::Transport => SearchError::Transport { message },
        }
    }
}

/// The most useful human-readable text for a failure: Google's own message
/// when there is one, otherwise the error's display form.
fn failure_message(err: &ApiFailure) -> String {
    match err {
        ApiFailure::Api { message, .. } if !message.is_empty() => message.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
