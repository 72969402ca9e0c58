//! HTTP client for the Gemini `generateContent` REST endpoint.
//!
//! The client carries no credential of its own: the API key is passed per
//! call so the pipeline can refuse to send anything when it is missing.
//! Non-2xx responses are decoded from Google's error envelope into
//! [`ApiFailure::Api`] for classification.

use std::future::Future;
use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use sliedic_core::AppConfig;

use crate::error::ApiFailure;
use crate::types::{ApiErrorEnvelope, GenerateContentRequest, GenerateContentResponse};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Longest raw body excerpt kept in an error message when the body is not
/// Google's JSON error envelope.
const MAX_ERROR_BODY_CHARS: usize = 300;

/// Something that can answer a `generateContent` request.
///
/// Implemented by [`GeminiClient`]; the pipeline is generic over it so its
/// decision table can be driven by a scripted backend in tests.
pub trait GenerateContent {
    fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> impl Future<Output = Result<GenerateContentResponse, ApiFailure>> + Send;
}

/// Client for the Gemini REST API.
///
/// Use [`GeminiClient::new`] for production or [`GeminiClient::with_base_url`]
/// to point at a mock server in tests.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    client: Client,
    model: String,
    endpoint: Url,
}

impl GeminiClient {
    /// Creates a client pointed at the production Gemini API.
    ///
    /// # Errors
    ///
    /// Returns [`ApiFailure::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(model: &str, timeout_secs: u64) -> Result<Self, ApiFailure> {
        Self::with_base_url(DEFAULT_BASE_URL, model, timeout_secs)
    }

    /// Creates a client from the application configuration.
    ///
    /// # Errors
    ///
    /// See [`GeminiClient::with_base_url`].
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiFailure> {
        Self::with_base_url(
            &config.gemini_base_url,
            &config.gemini_model,
            config.request_timeout_secs,
        )
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ApiFailure::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ApiFailure::InvalidBaseUrl`] if
    /// `base_url` is not a valid URL.
    pub fn with_base_url(
        base_url: &str,
        model: &str,
        timeout_secs: u64,
    ) -> Result<Self, ApiFailure> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("sliedic/0.1 (grocery-price-search)")
            .build()?;

        let endpoint = Self::endpoint_url(base_url, model)?;

        Ok(Self {
            client,
            model: model.to_owned(),
            endpoint,
        })
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// `{base}/v1beta/models/{model}:generateContent`.
    fn endpoint_url(base_url: &str, model: &str) -> Result<Url, ApiFailure> {
        let invalid = |reason: String| ApiFailure::InvalidBaseUrl {
            url: base_url.to_owned(),
            reason,
        };

        // Ensure exactly one trailing slash so `join` appends instead of
        // replacing the last path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base = Url::parse(&normalised).map_err(|e| invalid(e.to_string()))?;
        base.join(&format!("v1beta/models/{model}:generateContent"))
            .map_err(|e| invalid(e.to_string()))
    }

    /// Turns a non-2xx response into [`ApiFailure::Api`].
    fn api_failure(status: StatusCode, body: &str) -> ApiFailure {
        let (google_status, message) = match serde_json::from_str::<ApiErrorEnvelope>(body) {
            Ok(envelope) => (envelope.error.status, envelope.error.message),
            Err(_) => (
                String::new(),
                body.trim().chars().take(MAX_ERROR_BODY_CHARS).collect(),
            ),
        };
        ApiFailure::Api {
            code: status.as_u16(),
            status: google_status,
            message,
        }
    }
}

impl GenerateContent for GeminiClient {
    /// Sends one `generateContent` request.
    ///
    /// # Errors
    ///
    /// - [`ApiFailure::Api`] on a non-2xx status.
    /// - [`ApiFailure::Http`] on network failure or timeout.
    /// - [`ApiFailure::Deserialize`] if a 2xx body does not match the
    ///   expected shape.
    async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ApiFailure> {
        tracing::debug!(
            model = %self.model,
            grounded = request.uses_search(),
            "sending generateContent request"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .header(API_KEY_HEADER, api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(Self::api_failure(status, &body));
        }

        serde_json::from_str(&body).map_err(|e| ApiFailure::Deserialize {
            context: format!("generateContent(model={})", self.model),
            source: e,
        })
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
