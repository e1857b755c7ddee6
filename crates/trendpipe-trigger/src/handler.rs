//! The trigger event handler.

use thiserror::Error;

use trendpipe_core::{AppConfig, JobParams};
use trendpipe_storage::{ObjectStore, StorageError};

use crate::event::{StorageEvent, TriggerResponse};
use crate::launcher::{JobLauncher, LaunchError};

#[derive(Debug, Error)]
enum TriggerError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Launch(#[from] LaunchError),
}

/// Handle one file-arrival notification.
///
/// Scans the landing prefix for the input pair; with both present, archives
/// the files and starts a job run, returning 200 with the run id. With
/// either missing, returns a waiting 200 with no side effects. Any failure
/// along the way is logged and mapped to a 500 response; this function
/// never returns an error, so a host retry re-lists and re-evaluates from
/// scratch.
pub async fn handle_storage_event<S, L>(
    store: &S,
    launcher: &L,
    config: &AppConfig,
    event: &StorageEvent,
) -> TriggerResponse
where
    S: ObjectStore + ?Sized,
    L: JobLauncher + ?Sized,
{
    tracing::info!(bucket = %event.bucket, key = %event.key, "file arrived in landing zone");

    match scan_and_launch(store, launcher, config, event).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(bucket = %event.bucket, error = %e, "trigger invocation failed");
            TriggerResponse::error(format!("Error: {e}"))
        }
    }
}

async fn scan_and_launch<S, L>(
    store: &S,
    launcher: &L,
    config: &AppConfig,
    event: &StorageEvent,
) -> Result<TriggerResponse, TriggerError>
where
    S: ObjectStore + ?Sized,
    L: JobLauncher + ?Sized,
{
    let keys = store
        .list_keys(&event.bucket, &config.landing_prefix)
        .await?;

    // Last-seen wins for each kind; keys come back in lexicographic order,
    // so the selection is deterministic.
    let mut csv_key: Option<&str> = None;
    let mut json_key: Option<&str> = None;
    for key in &keys {
        if key.ends_with(".csv") {
            csv_key = Some(key);
        } else if key.ends_with(".json") {
            json_key = Some(key);
        }
    }

    let (Some(csv_key), Some(json_key)) = (csv_key, json_key) else {
        tracing::info!(
            prefix = %config.landing_prefix,
            "input pair incomplete, waiting"
        );
        return Ok(TriggerResponse::waiting());
    };

    let csv_file = base_name(csv_key).to_string();
    let json_file = base_name(json_key).to_string();

    // Archive both inputs under their original base filenames before the
    // job touches them.
    let csv_archive = format!("{}{}", config.archive_prefix, csv_file);
    let json_archive = format!("{}{}", config.archive_prefix, json_file);
    futures::future::try_join(
        store.copy(&event.bucket, csv_key, &csv_archive),
        store.copy(&event.bucket, json_key, &json_archive),
    )
    .await?;
    tracing::info!(csv = %csv_archive, json = %json_archive, "inputs archived");

    let params = JobParams {
        job_name: config.job_name.clone(),
        landing_bucket: event.bucket.clone(),
        landing_prefix: config.landing_prefix.clone(),
        csv_file,
        json_file,
        output_bucket: config
            .output_bucket
            .clone()
            .unwrap_or_else(|| event.bucket.clone()),
        output_prefix: config.output_prefix.clone(),
    };

    let run_id = launcher.start_job_run(&params).await?;
    tracing::info!(run_id = %run_id, job = %params.job_name, "transform job run started");

    Ok(TriggerResponse::started(run_id))
}

/// Base filename of an object key (the part after the last `/`).
fn base_name(key: &str) -> &str {
    key.rsplit('/').next().unwrap_or(key)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use trendpipe_core::{AppConfig, StorageSettings};
    use trendpipe_storage::MemoryObjectStore;

    use super::*;

    struct RecordingLauncher {
        calls: Mutex<Vec<JobParams>>,
        fail: bool,
    }

    impl RecordingLauncher {
        fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl JobLauncher for RecordingLauncher {
        async fn start_job_run(&self, params: &JobParams) -> Result<String, LaunchError> {
            if self.fail {
                return Err(LaunchError::Failed("orchestrator unavailable".to_string()));
            }
            self.calls.lock().unwrap().push(params.clone());
            Ok("run-42".to_string())
        }
    }

    /// Store whose listing always fails, for the 500 path.
    struct BrokenStore;

    #[async_trait]
    impl ObjectStore for BrokenStore {
        async fn list_keys(&self, _: &str, _: &str) -> Result<Vec<String>, StorageError> {
            Err(StorageError::Backend("listing exploded".to_string()))
        }

        async fn get(&self, bucket: &str, key: &str) -> Result<Vec<u8>, StorageError> {
            Err(StorageError::NotFound(format!("{bucket}/{key}")))
        }

        async fn put(
            &self,
            _: &str,
            _: &str,
            _: Vec<u8>,
            _: Option<&str>,
        ) -> Result<(), StorageError> {
            Err(StorageError::Backend("unwritable".to_string()))
        }

        async fn copy(&self, _: &str, _: &str, _: &str) -> Result<(), StorageError> {
            Err(StorageError::Backend("uncopyable".to_string()))
        }
    }

    fn config() -> AppConfig {
        AppConfig {
            log_level: "info".to_string(),
            job_name: "yt-transform-job".to_string(),
            landing_prefix: "landing-zone/".to_string(),
            archive_prefix: "archive-zone/".to_string(),
            output_prefix: "transformed-zone/".to_string(),
            output_bucket: None,
            storage: StorageSettings {
                region: "us-east-1".to_string(),
                endpoint: None,
                force_path_style: false,
            },
        }
    }

    fn event() -> StorageEvent {
        StorageEvent {
            bucket: "yt-data".to_string(),
            key: "landing-zone/USvideos.csv".to_string(),
        }
    }

    #[tokio::test]
    async fn waits_when_only_csv_present() {
        let store = MemoryObjectStore::new();
        store.insert("yt-data", "landing-zone/USvideos.csv", vec![1]);
        let launcher = RecordingLauncher::new();

        let resp = handle_storage_event(&store, &launcher, &config(), &event()).await;

        assert_eq!(resp, TriggerResponse::waiting());
        assert_eq!(launcher.call_count(), 0);
        // No archive copies happened.
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn waits_when_only_json_present() {
        let store = MemoryObjectStore::new();
        store.insert("yt-data", "landing-zone/US_category_id.json", vec![1]);
        let launcher = RecordingLauncher::new();

        let resp = handle_storage_event(&store, &launcher, &config(), &event()).await;

        assert_eq!(resp, TriggerResponse::waiting());
        assert_eq!(launcher.call_count(), 0);
    }

    #[tokio::test]
    async fn archives_pair_and_starts_run_when_both_present() {
        let store = MemoryObjectStore::new();
        store.insert("yt-data", "landing-zone/USvideos.csv", b"rows".to_vec());
        store.insert(
            "yt-data",
            "landing-zone/US_category_id.json",
            b"{}".to_vec(),
        );
        let launcher = RecordingLauncher::new();

        let resp = handle_storage_event(&store, &launcher, &config(), &event()).await;

        assert_eq!(resp.status_code, 200);
        assert_eq!(resp.run_id.as_deref(), Some("run-42"));
        assert!(store.contains("yt-data", "archive-zone/USvideos.csv"));
        assert!(store.contains("yt-data", "archive-zone/US_category_id.json"));
        // Exactly the two archive copies beyond the two originals.
        assert_eq!(store.len(), 4);

        assert_eq!(launcher.call_count(), 1);
        let params = launcher.calls.lock().unwrap()[0].clone();
        assert_eq!(params.job_name, "yt-transform-job");
        assert_eq!(params.landing_bucket, "yt-data");
        assert_eq!(params.csv_file, "USvideos.csv");
        assert_eq!(params.json_file, "US_category_id.json");
        // No output bucket configured: defaults to the event bucket.
        assert_eq!(params.output_bucket, "yt-data");
        assert_eq!(params.output_prefix, "transformed-zone/");
    }

    #[tokio::test]
    async fn selects_lexicographically_last_of_each_kind() {
        let store = MemoryObjectStore::new();
        store.insert("yt-data", "landing-zone/2017-videos.csv", vec![]);
        store.insert("yt-data", "landing-zone/2018-videos.csv", vec![]);
        store.insert("yt-data", "landing-zone/categories.json", vec![]);
        let launcher = RecordingLauncher::new();

        handle_storage_event(&store, &launcher, &config(), &event()).await;

        let params = launcher.calls.lock().unwrap()[0].clone();
        assert_eq!(params.csv_file, "2018-videos.csv");
    }

    #[tokio::test]
    async fn honors_configured_output_bucket() {
        let store = MemoryObjectStore::new();
        store.insert("yt-data", "landing-zone/USvideos.csv", vec![]);
        store.insert("yt-data", "landing-zone/US_category_id.json", vec![]);
        let launcher = RecordingLauncher::new();
        let mut config = config();
        config.output_bucket = Some("analytics".to_string());

        handle_storage_event(&store, &launcher, &config, &event()).await;

        let params = launcher.calls.lock().unwrap()[0].clone();
        assert_eq!(params.output_bucket, "analytics");
    }

    #[tokio::test]
    async fn storage_failure_maps_to_500() {
        let launcher = RecordingLauncher::new();
        let resp = handle_storage_event(&BrokenStore, &launcher, &config(), &event()).await;

        assert_eq!(resp.status_code, 500);
        assert!(resp.message.contains("listing exploded"), "got: {resp:?}");
        assert_eq!(launcher.call_count(), 0);
    }

    #[tokio::test]
    async fn launcher_failure_maps_to_500() {
        let store = MemoryObjectStore::new();
        store.insert("yt-data", "landing-zone/USvideos.csv", vec![]);
        store.insert("yt-data", "landing-zone/US_category_id.json", vec![]);
        let launcher = RecordingLauncher::failing();

        let resp = handle_storage_event(&store, &launcher, &config(), &event()).await;

        assert_eq!(resp.status_code, 500);
        assert!(
            resp.message.contains("orchestrator unavailable"),
            "got: {resp:?}"
        );
    }

    #[tokio::test]
    async fn duplicate_notification_reruns_from_scratch() {
        // No idempotency guard exists: a second event for an already
        // archived pair archives and launches again.
        let store = MemoryObjectStore::new();
        store.insert("yt-data", "landing-zone/USvideos.csv", vec![]);
        store.insert("yt-data", "landing-zone/US_category_id.json", vec![]);
        let launcher = RecordingLauncher::new();

        let first = handle_storage_event(&store, &launcher, &config(), &event()).await;
        let second = handle_storage_event(&store, &launcher, &config(), &event()).await;

        assert_eq!(first.status_code, 200);
        assert_eq!(second.status_code, 200);
        assert_eq!(launcher.call_count(), 2);
    }

    #[test]
    fn base_name_strips_prefix() {
        assert_eq!(base_name("landing-zone/USvideos.csv"), "USvideos.csv");
        assert_eq!(base_name("USvideos.csv"), "USvideos.csv");
        assert_eq!(base_name("a/b/c.json"), "c.json");
    }
}
