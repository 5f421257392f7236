use std::path::PathBuf;
use thiserror::Error;

/// Run-level errors. Per-file ingestion failures are [`IngestError`] and are
/// recovered locally by the engine (skip and continue); everything here
/// terminates the run.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("no CSV files found under {}", .0.display())]
    NoCsvFound(PathBuf),

    #[error("aborted by user: {0}")]
    Aborted(&'static str),
}

/// Per-file ingestion errors. All variants are non-fatal to the run: the
/// engine logs the file and moves on.
#[derive(Error, Debug)]
pub enum IngestError {
    /// Zero-byte file (no header row at all). A file with a header but no
    /// data rows is not empty; it ingests as zero rows.
    #[error("file is empty")]
    Empty,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File name has no underscore before the `_results.csv` suffix, so no
    /// sample group can be derived for its rows.
    #[error("file name has no sample group prefix")]
    NoSampleGroup,

    #[error("malformed CSV: {0}")]
    Parse(#[from] csv::Error),

    #[error("malformed CSV: missing measurement column '{0}'")]
    MissingColumn(String),

    #[error("malformed CSV: non-numeric value '{value}' in column '{column}'")]
    BadMeasurement { column: String, value: String },
}
