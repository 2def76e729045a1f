//! Shared domain types and configuration for the linkd alumni-search client.

pub mod api_url;
pub mod app_config;
pub mod config;
pub mod profile;

use thiserror::Error;

pub use api_url::normalize_api_url;
pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use profile::{
    EloPair, LeaderboardEntry, Profile, ProfileSummary, ProfileUpdate, RatingPair,
    RawLinkedinData, VoteOutcome, VoteRequest, VoteResult,
};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
