use std::path::PathBuf;

use crate::app_config::AppConfig;
use crate::ConfigError;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/";
pub const DEFAULT_APP_PASSWORD: &str = "2244";

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default. The API key is not part of `AppConfig`: the
/// pipeline reads it per search through [`gemini_api_key_from_env`], and a
/// missing key is a search-time error, so `login` and `history` keep
/// working without one.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        parse_flag(&raw).ok_or_else(|| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: format!("expected true/false, got '{raw}'"),
        })
    };


    let gemini_model = or_default("SLIEDIC_GEMINI_MODEL", DEFAULT_GEMINI_MODEL);
    let gemini_base_url = or_default("SLIEDIC_GEMINI_BASE_URL", DEFAULT_GEMINI_BASE_URL);
    let request_timeout_secs = parse_u64("SLIEDIC_REQUEST_TIMEOUT_SECS", "60")?;
    let fallback_enabled = parse_bool("SLIEDIC_FALLBACK_ENABLED", "true")?;
    let app_password = or_default("APP_PASSWORD", DEFAULT_APP_PASSWORD);
    let state_path = lookup("SLIEDIC_STATE_PATH")
        .map_or_else(|_| default_state_path(), PathBuf::from);
    let log_level = or_default("SLIEDIC_LOG_LEVEL", "warn");

    Ok(AppConfig {
        gemini_model,
        gemini_base_url,
        request_timeout_secs,
        fallback_enabled,
        app_password,
        state_path,
        log_level,
    })
}

/// Reads the Gemini key from the process environment as it is right now.
///
/// Used by the pipeline on every search so a rotated key is picked up
/// without restarting.
#[must_use]
pub fn gemini_api_key_from_env() -> Option<String> {
    api_key_from(|key| std::env::var(key))
}

/// `GEMINI_API_KEY`, else `API_KEY`, trimmed. An all-blank value counts as
/// unset.
fn api_key_from<F>(lookup: F) -> Option<String>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    lookup("GEMINI_API_KEY")
        .or_else(|_| lookup("API_KEY"))
        .ok()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `<data_local_dir>/sliedic/state.json`, or `./.sliedic/state.json` when the
/// platform has no data directory.
fn default_state_path() -> PathBuf {
    dirs::data_local_dir()
        .map_or_else(|| PathBuf::from(".sliedic"), |dir| dir.join("sliedic"))
        .join("state.json")
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
