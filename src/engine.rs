//! Run orchestration: scan → ingest → aggregate → partition → write →
//! summarize, with all interactive collaborators injected.

use crate::aggregate::{self, Table};
use crate::error::{Error, IngestError};
use crate::ingest;
use crate::interact::Interaction;
use crate::output;
use crate::progress::ProgressReporter;
use crate::scanner;
use crate::summary::{self, SummaryRow};
use chrono::Local;
use std::path::PathBuf;
use tracing::{debug, error, info, warn};

pub struct CombineEngine {
    root: PathBuf,
    threshold: u32,
    foci_column: String,
}

#[derive(Debug)]
pub struct CombineResult {
    /// Files attempted, ingested or not.
    pub files_processed: usize,
    /// Files skipped for per-file errors (empty, malformed, no group).
    pub files_skipped: usize,
    /// Sample groups detected from folder names.
    pub groups: Vec<String>,
    /// Groups whose partition was non-empty and written out.
    pub groups_written: Vec<String>,
    /// Groups with no matching rows, reported but not written.
    pub groups_unmatched: Vec<String>,
    /// Created only when at least one group file was written.
    pub output_dir: Option<PathBuf>,
    pub table: Table,
    pub summary: Vec<SummaryRow>,
}

impl CombineEngine {
    pub fn new(root: impl Into<PathBuf>, threshold: u32) -> Self {
        Self {
            root: root.into(),
            threshold,
            foci_column: "NumFoci".to_string(),
        }
    }

    pub fn with_foci_column(mut self, column: &str) -> Self {
        self.foci_column = column.to_string();
        self
    }

    /// Run the full aggregation pipeline:
    /// 1. Scan immediate sub-folders, count CSVs, detect sample groups
    /// 2. Resolve pre-existing output folders (replace/keep/abort)
    /// 3. Confirm the detected groups
    /// 4. Ingest each CSV, skipping per-file failures
    /// 5. Aggregate, partition per group, write per-group combined CSVs
    /// 6. Summarize per group
    ///
    /// Aborts happen before any output folder is created, so there is never a
    /// partially-committed output state.
    pub fn run(
        &self,
        reporter: &dyn ProgressReporter,
        interact: &dyn Interaction,
    ) -> Result<CombineResult, Error> {
        let outcome = scanner::scan(&self.root)?;
        info!(
            "Scanned {}: {} candidate folders, {} CSV files, groups {:?}",
            self.root.display(),
            outcome.candidates.len(),
            outcome.total_files,
            outcome.groups,
        );
        reporter.on_scan_complete(outcome.candidates.len(), outcome.total_files);

        if outcome.total_files == 0 {
            return Err(Error::NoCsvFound(self.root.clone()));
        }

        output::resolve_old_outputs(&outcome.old_outputs, interact)?;

        if !interact.confirm_sample_groups(&outcome.groups) {
            return Err(Error::Aborted("sample list rejected"));
        }

        let (tables, files_processed, files_skipped) =
            self.ingest_all(&outcome, reporter);

        let unified = aggregate::aggregate(tables);
        debug!(
            "Aggregated {} rows across {} columns",
            unified.len(),
            unified.columns().len()
        );

        let mut groups_written: Vec<String> = Vec::new();
        let mut groups_unmatched: Vec<String> = Vec::new();
        let mut output_dir: Option<PathBuf> = None;

        if unified.is_empty() {
            // Every file skipped: nothing to write is a reported condition,
            // not a crash. No output folder is created.
            warn!("No rows ingested; nothing to write");
        } else {
            let now = Local::now();
            for (group, subset) in aggregate::partition_by_group(&unified, &outcome.groups) {
                if subset.is_empty() {
                    warn!("No .csv files with \"{}\" prefix were found", group);
                    groups_unmatched.push(group);
                    continue;
                }
                let folder = match &output_dir {
                    Some(folder) => folder.clone(),
                    None => {
                        let folder = output::prepare_output_folder(&self.root, now)?;
                        output_dir = Some(folder.clone());
                        folder
                    }
                };
                match output::write_group(&folder, &group, &subset) {
                    Ok(path) => {
                        info!(
                            "Created combined results for {}: {} ({} rows)",
                            group,
                            path.display(),
                            subset.len()
                        );
                        groups_written.push(group);
                    }
                    Err(err) => {
                        // Fatal for this write only; siblings already on disk
                        // stay, remaining groups are still attempted.
                        error!("Failed to write group {}: {}", group, err);
                    }
                }
            }
        }

        reporter.on_write_complete(
            groups_written.len(),
            output_dir.as_ref().and_then(|p| p.to_str()),
        );

        let summary = summary::summarize(&unified);

        Ok(CombineResult {
            files_processed,
            files_skipped,
            groups: outcome.groups,
            groups_written,
            groups_unmatched,
            output_dir,
            table: unified,
            summary,
        })
    }

    fn ingest_all(
        &self,
        outcome: &scanner::ScanOutcome,
        reporter: &dyn ProgressReporter,
    ) -> (Vec<Table>, usize, usize) {
        let mut tables: Vec<Table> = Vec::new();
        let mut processed = 0usize;
        let mut skipped = 0usize;

        reporter.on_ingest_start(outcome.total_files);

        for folder in &outcome.candidates {
            for file in &folder.csv_files {
                match ingest::ingest(file, &self.foci_column, self.threshold) {
                    Ok(table) => tables.push(table),
                    Err(IngestError::Empty) => {
                        warn!("{} is empty, skipping", file.display());
                        reporter.on_file_skipped(&file.display().to_string(), "empty");
                        skipped += 1;
                    }
                    Err(err) => {
                        warn!("Error reading {}: {}", file.display(), err);
                        reporter.on_file_skipped(&file.display().to_string(), &err.to_string());
                        skipped += 1;
                    }
                }
                processed += 1;
                reporter.on_file_done(processed, outcome.total_files);
            }
        }

        (tables, processed, skipped)
    }
}
