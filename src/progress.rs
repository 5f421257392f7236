/// Trait for reporting pipeline progress.
///
/// The CLI implements it with indicatif; tests use [`SilentReporter`].
/// Purely observational: nothing here affects control flow.
/// All methods have default no-op implementations.
pub trait ProgressReporter: Send + Sync {
    fn on_scan_complete(&self, _folders: usize, _total_files: usize) {}
    fn on_ingest_start(&self, _total_files: usize) {}
    /// Invoked after each file completes, whether ingested or skipped.
    fn on_file_done(&self, _processed: usize, _total: usize) {}
    fn on_file_skipped(&self, _file: &str, _reason: &str) {}
    fn on_write_complete(&self, _groups_written: usize, _output_dir: Option<&str>) {}
}

/// No-op progress reporter for silent operation.
pub struct SilentReporter;

impl ProgressReporter for SilentReporter {}
