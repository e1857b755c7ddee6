//! Shared domain types and configuration for the trendpipe workspace.
//!
//! Holds the raw and enriched row shapes exchanged between the ETL job and
//! its callers, the job-run parameter block, and the environment-driven
//! application configuration.

use thiserror::Error;

pub mod app_config;
pub mod config;
pub mod job;
pub mod records;

pub use app_config::{AppConfig, StorageSettings};
pub use config::{load_app_config, load_app_config_from_env};
pub use job::{JobParams, OUTPUT_FILE_NAME};
pub use records::{EnrichedRow, VideoRow};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
