//! Gemini `generateContent` client and the price-search pipeline.
//!
//! [`PricePipeline::search`] sends a grounded request, and when Google
//! rejects the search tool for the credential, retries once from model
//! knowledge. Failures are reported as a classified [`SearchError`].

pub mod classify;
pub mod client;
pub mod error;
pub mod pipeline;
pub mod prompt;
pub mod types;

pub use classify::{classify, ErrorClass};
pub use client::{GeminiClient, GenerateContent};
pub use error::{mask_api_key, ApiFailure, SearchError, SearchErrorKind};
pub use pipeline::{Attempt, Credential, PricePipeline};
pub use types::{GenerateContentRequest, GenerateContentResponse};
