use crate::app_config::{AppConfig, StorageSettings};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if any value is invalid. Every variable has a
/// default, so a bare environment loads successfully.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the
/// process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files, useful for
/// testing or when the caller manages env setup.
///
/// # Errors
///
/// Returns `ConfigError` if any value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// This is the core parsing/validation logic, decoupled from the actual
/// environment so it can be tested with a pure `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_bool = |var: &str, default: &str| -> Result<bool, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<bool>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let log_level = or_default("TRENDPIPE_LOG_LEVEL", "info");
    let job_name = or_default("TRENDPIPE_JOB_NAME", "yt-transform-job");

    let landing_prefix = normalize_prefix(&or_default("TRENDPIPE_LANDING_PREFIX", "landing-zone/"));
    let archive_prefix = normalize_prefix(&or_default("TRENDPIPE_ARCHIVE_PREFIX", "archive-zone/"));
    let output_prefix =
        normalize_prefix(&or_default("TRENDPIPE_OUTPUT_PREFIX", "transformed-zone/"));
    let output_bucket = lookup("TRENDPIPE_OUTPUT_BUCKET").ok();

    let storage = StorageSettings {
        region: or_default("TRENDPIPE_S3_REGION", "us-east-1"),
        endpoint: lookup("TRENDPIPE_S3_ENDPOINT").ok(),
        force_path_style: parse_bool("TRENDPIPE_S3_FORCE_PATH_STYLE", "false")?,
    };

    Ok(AppConfig {
        log_level,
        job_name,
        landing_prefix,
        archive_prefix,
        output_prefix,
        output_bucket,
        storage,
    })
}

/// Normalize a zone prefix to end with exactly one `/`, so object keys can be
/// built by plain concatenation.
fn normalize_prefix(raw: &str) -> String {
    format!("{}/", raw.trim_end_matches('/'))
}
