//! Output-folder management and per-group CSV writing.

use crate::aggregate::Table;
use crate::error::Error;
use crate::interact::{Interaction, ReplaceChoice};
use crate::scanner::OUTPUT_PREFIX;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// Deterministic output-folder name for a run timestamp. Seconds resolution
/// so rapid successive runs cannot silently collide on the same folder.
pub fn output_folder_name(now: DateTime<Local>) -> String {
    format!(
        "{}_({}-{})",
        OUTPUT_PREFIX,
        now.format("%y.%m.%d"),
        now.format("%H.%M.%S")
    )
}

/// Create the timestamped output folder under `root`, parents included.
pub fn prepare_output_folder(root: &Path, now: DateTime<Local>) -> Result<PathBuf, Error> {
    let folder = root.join(output_folder_name(now));
    fs::create_dir_all(&folder)?;
    Ok(folder)
}

/// Write one per-group combined CSV. Only called for non-empty subsets.
pub fn write_group(folder: &Path, group: &str, subset: &Table) -> Result<PathBuf, Error> {
    let path = folder.join(format!("{}_results_combined.csv", group));
    let mut writer = csv::Writer::from_path(&path).map_err(io_cause)?;
    writer.write_record(subset.columns()).map_err(io_cause)?;
    for row in subset.rows() {
        let mut record: Vec<&str> = row.iter().map(String::as_str).collect();
        // Widened tables can hold short rows; pad to the header width.
        record.resize(subset.columns().len(), "");
        writer.write_record(&record).map_err(io_cause)?;
    }
    writer.flush()?;
    Ok(path)
}

fn io_cause(err: csv::Error) -> Error {
    match err.into_kind() {
        csv::ErrorKind::Io(io) => Error::Io(io),
        other => Error::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("CSV write error: {:?}", other),
        )),
    }
}

/// Replacement protocol over pre-existing output folders, run before any
/// ingestion. Each folder is confirmed individually:
///
/// `Replace` asks a second time and deletes recursively on `yes`; a `no`
/// aborts the whole run. `Keep` leaves the folder alone. `Abort` terminates
/// immediately. Nothing is written anywhere on an abort path.
pub fn resolve_old_outputs(
    old_outputs: &[PathBuf],
    interact: &dyn Interaction,
) -> Result<(), Error> {
    for folder in old_outputs {
        let name = folder
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        match interact.replace_choice(&name) {
            ReplaceChoice::Replace => {
                if interact.confirm_delete(&name) {
                    fs::remove_dir_all(folder)?;
                    info!("Removed old output folder {}", name);
                } else {
                    return Err(Error::Aborted("replacement delete cancelled"));
                }
            }
            ReplaceChoice::Keep => {
                info!("Keeping old output folder {}", name);
            }
            ReplaceChoice::Abort => {
                return Err(Error::Aborted("replacement confirmation cancelled"));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_output_folder_name_has_seconds_resolution() {
        let now = Local.with_ymd_and_hms(2024, 1, 1, 10, 0, 42).unwrap();
        assert_eq!(output_folder_name(now), "CombinedResults_(24.01.01-10.00.42)");
    }

    #[test]
    fn test_output_folder_name_carries_reserved_prefix() {
        let now = Local.with_ymd_and_hms(2024, 12, 31, 23, 59, 59).unwrap();
        assert!(output_folder_name(now).starts_with(OUTPUT_PREFIX));
    }
}
