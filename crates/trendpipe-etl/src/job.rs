//! The transformation job runner.

use trendpipe_core::JobParams;
use trendpipe_storage::ObjectStore;

use crate::categories::parse_category_lookup;
use crate::enrich::enrich_all;
use crate::error::EtlError;
use crate::tabular::{read_video_rows, write_enriched_csv};

/// Counts reported by a completed job run.
#[derive(Debug, Clone)]
pub struct JobSummary {
    pub input_rows: usize,
    pub categories: usize,
    pub output_rows: usize,
    pub output_key: String,
}

/// Run the full transformation job.
///
/// 1. Read the tabular input from the landing zone and decode its rows.
/// 2. Read the category reference and build the id → title lookup
///    (malformed reference aborts the run; nothing is written).
/// 3. Derive dates, counts, flags, engagement metrics, and the popularity
///    tier, left-joining category names.
/// 4. Write the denormalized CSV to the transformed zone, overwriting any
///    previous output.
///
/// Output row count always equals input row count.
///
/// # Errors
///
/// Returns [`EtlError::Storage`] if an input cannot be read or the output
/// cannot be written, [`EtlError::Csv`] if the tabular input cannot be
/// decoded, and [`EtlError::CategoryParse`] if the reference is malformed.
pub async fn run_transform_job<S>(store: &S, params: &JobParams) -> Result<JobSummary, EtlError>
where
    S: ObjectStore + ?Sized,
{
    tracing::info!(
        job = %params.job_name,
        csv = %params.csv_file,
        json = %params.json_file,
        "transform job started"
    );

    let raw_csv = store.get(&params.landing_bucket, &params.csv_key()).await?;
    let videos = read_video_rows(&raw_csv)?;
    tracing::info!(rows = videos.len(), "video rows loaded");

    let raw_json = store.get(&params.landing_bucket, &params.json_key()).await?;
    let categories = parse_category_lookup(&raw_json)?;
    tracing::info!(categories = categories.len(), "category lookup built");

    let enriched = enrich_all(&videos, &categories);
    let output = write_enriched_csv(&enriched)?;

    let output_key = params.output_key();
    store
        .put(&params.output_bucket, &output_key, output, Some("text/csv"))
        .await?;
    tracing::info!(rows = enriched.len(), key = %output_key, "transform job completed");

    Ok(JobSummary {
        input_rows: videos.len(),
        categories: categories.len(),
        output_rows: enriched.len(),
        output_key,
    })
}
