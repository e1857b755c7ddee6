//! Command line entrypoint for the trendpipe ETL system.

mod launcher;

use clap::{Args, Parser, Subcommand};

use trendpipe_core::{AppConfig, JobParams};
use trendpipe_storage::S3ObjectStore;
use trendpipe_trigger::{handle_storage_event, StorageEvent};

use crate::launcher::EtlJobLauncher;

#[derive(Debug, Parser)]
#[command(name = "trendpipe")]
#[command(about = "Trending-video ETL: transformation job and landing-zone trigger")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run the transformation job for an explicit input pair.
    Transform(TransformArgs),
    /// Handle a landing-zone file-arrival notification.
    Trigger(TriggerArgs),
}

#[derive(Debug, Args)]
struct TransformArgs {
    /// Bucket holding the landing zone.
    #[arg(long)]
    landing_bucket: String,

    /// Tabular input filename inside the landing prefix.
    #[arg(long)]
    csv_file: String,

    /// Category reference filename inside the landing prefix.
    #[arg(long)]
    json_file: String,

    /// Output bucket; falls back to the configured one, then the landing bucket.
    #[arg(long)]
    output_bucket: Option<String>,
}

#[derive(Debug, Args)]
struct TriggerArgs {
    /// Bucket from the storage-event notification.
    #[arg(long)]
    bucket: String,

    /// Object key from the notification.
    #[arg(long)]
    key: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = trendpipe_core::load_app_config()?;
    init_tracing(&config.log_level);

    let cli = Cli::parse();
    let store = S3ObjectStore::connect(&config.storage).await;

    match cli.command {
        Commands::Transform(args) => run_transform(&store, &config, args).await,
        Commands::Trigger(args) => run_trigger(store, &config, args).await,
    }
}

fn init_tracing(level: &str) {
    // RUST_LOG wins over the configured level.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn run_transform(
    store: &S3ObjectStore,
    config: &AppConfig,
    args: TransformArgs,
) -> anyhow::Result<()> {
    let params = JobParams {
        job_name: config.job_name.clone(),
        landing_bucket: args.landing_bucket.clone(),
        landing_prefix: config.landing_prefix.clone(),
        csv_file: args.csv_file,
        json_file: args.json_file,
        output_bucket: args
            .output_bucket
            .or_else(|| config.output_bucket.clone())
            .unwrap_or(args.landing_bucket),
        output_prefix: config.output_prefix.clone(),
    };

    let summary = trendpipe_etl::run_transform_job(store, &params).await?;
    println!(
        "transformed {} rows ({} categories) into {}/{}",
        summary.output_rows, summary.categories, params.output_bucket, summary.output_key
    );
    Ok(())
}

async fn run_trigger(
    store: S3ObjectStore,
    config: &AppConfig,
    args: TriggerArgs,
) -> anyhow::Result<()> {
    let launcher = EtlJobLauncher::new(store.clone());
    let event = StorageEvent {
        bucket: args.bucket,
        key: args.key,
    };

    // The handler absorbs its own failures; the response is the outcome.
    let response = handle_storage_event(&store, &launcher, config, &event).await;
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}
