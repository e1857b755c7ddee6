use thiserror::Error;

use trendpipe_storage::StorageError;

#[derive(Debug, Error)]
pub enum EtlError {
    /// Reading an input or writing the output failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// The tabular input could not be decoded at all.
    #[error("CSV decode error: {0}")]
    Csv(#[from] csv::Error),

    /// The category reference is structurally malformed. Fatal: the run
    /// aborts with no output written.
    #[error("category reference parse error: {0}")]
    CategoryParse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
