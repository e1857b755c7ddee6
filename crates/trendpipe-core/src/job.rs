//! Job-run parameters shared between the trigger, the ETL runner, and the CLI.

/// File name of the transformed output, written under the output prefix.
pub const OUTPUT_FILE_NAME: &str = "youtube_data.csv";

/// Parameters for one transformation job run.
///
/// `landing_prefix` and `output_prefix` are expected to end with `/` (the
/// config loader normalizes them); object keys are built by plain
/// concatenation, e.g. `<output_prefix>youtube_data.csv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobParams {
    pub job_name: String,
    pub landing_bucket: String,
    pub landing_prefix: String,
    /// Base filename of the tabular input inside the landing prefix.
    pub csv_file: String,
    /// Base filename of the category reference inside the landing prefix.
    pub json_file: String,
    pub output_bucket: String,
    pub output_prefix: String,
}

impl JobParams {
    /// Full landing-zone key of the tabular input.
    #[must_use]
    pub fn csv_key(&self) -> String {
        format!("{}{}", self.landing_prefix, self.csv_file)
    }

    /// Full landing-zone key of the category reference input.
    #[must_use]
    pub fn json_key(&self) -> String {
        format!("{}{}", self.landing_prefix, self.json_file)
    }

    /// Full key of the transformed output file.
    #[must_use]
    pub fn output_key(&self) -> String {
        format!("{}{}", self.output_prefix, OUTPUT_FILE_NAME)
    }
}
