//! In-process job launcher.
//!
//! Stands in for a managed orchestration service: runs the transformation
//! job on the spot and reports a freshly minted UUID as the run identifier.
//! The run id is returned after the job completes; a remote launcher would
//! return as soon as the run is accepted.

use async_trait::async_trait;
use uuid::Uuid;

use trendpipe_core::JobParams;
use trendpipe_storage::ObjectStore;
use trendpipe_trigger::{JobLauncher, LaunchError};

pub struct EtlJobLauncher<S> {
    store: S,
}

impl<S: ObjectStore> EtlJobLauncher<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

#[async_trait]
impl<S: ObjectStore> JobLauncher for EtlJobLauncher<S> {
    async fn start_job_run(&self, params: &JobParams) -> Result<String, LaunchError> {
        let run_id = Uuid::new_v4().to_string();
        tracing::info!(run_id = %run_id, job = %params.job_name, "executing job run in-process");

        let summary = trendpipe_etl::run_transform_job(&self.store, params)
            .await
            .map_err(|e| LaunchError::Failed(e.to_string()))?;

        tracing::info!(
            run_id = %run_id,
            rows = summary.output_rows,
            key = %summary.output_key,
            "job run finished"
        );
        Ok(run_id)
    }
}
