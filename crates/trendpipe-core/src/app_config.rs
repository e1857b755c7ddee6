//! Application configuration structs.

/// Connection settings for the object storage backend.
///
/// Credentials come from the ambient provider chain (env vars, profile,
/// instance role); they are never part of this struct.
#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub region: String,
    /// Custom endpoint for MinIO-style local stacks.
    pub endpoint: Option<String>,
    /// Path-style addressing, required by most custom endpoints.
    pub force_path_style: bool,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Name reported for transformation job runs.
    pub job_name: String,
    /// Prefix under which raw inputs arrive. Always ends with `/`.
    pub landing_prefix: String,
    /// Prefix holding archival copies of raw inputs. Always ends with `/`.
    pub archive_prefix: String,
    /// Prefix for the transformed output. Always ends with `/`.
    pub output_prefix: String,
    /// Bucket for the transformed output; `None` means the landing bucket.
    pub output_bucket: Option<String>,
    pub storage: StorageSettings,
}
