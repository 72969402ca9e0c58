//! Domain types, markdown price-table extraction, and configuration for
//! Cenový Sliedič.
//!
//! Nothing in this crate touches the network; the Gemini client and the
//! query pipeline live in `sliedic-gemini`.

pub mod app_config;
pub mod config;
pub mod offers;
pub mod stores;
pub mod table;

use thiserror::Error;

pub use app_config::AppConfig;
pub use config::{gemini_api_key_from_env, load_app_config, load_app_config_from_env};
pub use offers::{GroundingSource, PriceOffer, QueryResult, NON_LIVE_MARKER};
pub use stores::StoreChain;
pub use table::extract_offers;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
