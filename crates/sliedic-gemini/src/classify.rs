//! Classification of failed Gemini calls.
//!
//! The pipeline decides whether to retry without search grounding purely on
//! the [`ErrorClass`] of the failure. Only [`ErrorClass::CapabilityRejected`]
//! triggers the fallback; a bad key, an exhausted quota, or a transport
//! failure would fail the same way on a second request.

use crate::error::ApiFailure;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// The key is malformed, expired, or unknown to Google.
    InvalidCredential,
    /// The request was refused for what it asked for (search grounding not
    /// available for this key, region, or model).
    CapabilityRejected,
    RateLimited,
    /// Network failure, 5xx, or an undecodable body.
    Transport,
}

/// Message fragments Google uses when the key itself is the problem. These
/// arrive as HTTP 400 `INVALID_ARGUMENT` or 403 `PERMISSION_DENIED`, so they
/// must be checked before the status code.
const INVALID_KEY_FRAGMENTS: &[&str] = &[
    "api_key_invalid",
    "api key not valid",
    "api key expired",
    "api key not found",
    "unregistered callers",
];

/// Classifies one failed call.
///
/// | Condition                                                  | Class                |
/// |------------------------------------------------------------|----------------------|
/// | message names an invalid key, HTTP 401, `UNAUTHENTICATED`  | `InvalidCredential`  |
/// | HTTP 429, `RESOURCE_EXHAUSTED`                             | `RateLimited`        |
/// | other HTTP 400 / 403, `INVALID_ARGUMENT`, `FAILED_PRECONDITION`, `PERMISSION_DENIED` | `CapabilityRejected` |
/// | anything else                                              | `Transport`          |
#[must_use]
pub fn classify(err: &ApiFailure) -> ErrorClass {
    match err {
        ApiFailure::Api {
            code,
            status,
            message,
        } => classify_api(*code, status, message),
        ApiFailure::Http(e) if e.status().is_some_and(|s| s.as_u16() == 429) => {
            ErrorClass::RateLimited
        }
        ApiFailure::Http(_) | ApiFailure::Deserialize { .. } | ApiFailure::InvalidBaseUrl { .. } => {
            ErrorClass::Transport
        }
    }
}

fn classify_api(code: u16, status: &str, message: &str) -> ErrorClass {
    let lower = message.to_lowercase();
    if code == 401
        || status == "UNAUTHENTICATED"
        || INVALID_KEY_FRAGMENTS.iter().any(|f| lower.contains(f))
    {
        return ErrorClass::InvalidCredential;
    }

    if code == 429 || status == "RESOURCE_EXHAUSTED" {
        return ErrorClass::RateLimited;
    }

    if matches!(code, 400 | 403)
        || matches!(
            status,
            "INVALID_ARGUMENT" | "FAILED_PRECONDITION" | "PERMISSION_DENIED"
        )
    {
        return ErrorClass::CapabilityRejected;
    }

    ErrorClass::Transport
}
