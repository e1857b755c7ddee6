//! Seam to the external job orchestration service.

use async_trait::async_trait;
use thiserror::Error;

use trendpipe_core::JobParams;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("job launch failed: {0}")]
    Failed(String),
}

/// Starts transformation job runs.
///
/// The orchestration service itself is an external collaborator; the trigger
/// only needs "start this run, give me its identifier". An implementation
/// may dispatch remotely or execute the job in-process.
#[async_trait]
pub trait JobLauncher: Send + Sync {
    /// Start a job run and return its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`LaunchError::Failed`] if the run could not be started.
    async fn start_job_run(&self, params: &JobParams) -> Result<String, LaunchError>;
}
