//! Per-file CSV ingestion with derived-column stamping.

use crate::aggregate::Table;
use crate::error::IngestError;
use crate::naming;
use std::fs;
use std::path::Path;

/// Derived column: source file name.
pub const SAMPLE_COL: &str = "Sample";
/// Derived column: group key from the file name.
pub const GROUP_COL: &str = "SampleGroup";
/// Derived column: measurement >= threshold.
pub const POSITIVE_COL: &str = "Positive";

/// Read one CSV into a [`Table`] and stamp `Sample`, `SampleGroup` and
/// `Positive` onto every row. The threshold is an explicit parameter,
/// constant for the whole run.
///
/// Errors are per-file and non-fatal to the run: the caller logs and skips.
/// A pre-existing source column named like a derived column wins; the derived
/// value is not stamped over it.
pub fn ingest(path: &Path, foci_column: &str, threshold: u32) -> Result<Table, IngestError> {
    if fs::metadata(path)?.len() == 0 {
        return Err(IngestError::Empty);
    }

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let group = naming::file_sample_group(&file_name)
        .ok_or(IngestError::NoSampleGroup)?
        .to_string();

    let mut reader = csv::Reader::from_path(path)?;
    let headers: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(IngestError::Empty);
    }

    let mut table = Table::with_columns(headers);
    for record in reader.records() {
        let record = record?;
        table.push_row(record.iter().map(str::to_string).collect());
    }

    let n = table.len();
    stamp_sample_columns(&mut table, &file_name, &group);

    if !table.has_column(POSITIVE_COL) {
        let foci_idx = table
            .column_index(foci_column)
            .ok_or_else(|| IngestError::MissingColumn(foci_column.to_string()))?;
        let mut positive: Vec<String> = Vec::with_capacity(n);
        for row in 0..n {
            let cell = table.value(row, foci_idx);
            let value: f64 = cell
                .trim()
                .parse()
                .map_err(|_| IngestError::BadMeasurement {
                    column: foci_column.to_string(),
                    value: cell.to_string(),
                })?;
            positive.push((value >= f64::from(threshold)).to_string());
        }
        table.add_column(POSITIVE_COL, positive);
    }

    Ok(table)
}

fn stamp_sample_columns(table: &mut Table, file_name: &str, group: &str) {
    let n = table.len();
    table.add_column(SAMPLE_COL, vec![file_name.to_string(); n]);
    table.add_column(GROUP_COL, vec![group.to_string(); n]);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write_csv(dir: &Path, name: &str, content: &str) -> std::path::PathBuf {
        let path = dir.join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_ingest_stamps_derived_columns() {
        let tmp = tempdir().unwrap();
        let path = write_csv(tmp.path(), "A_1_results.csv", "NumFoci,Area\n5,1.2\n10,3.4\n");

        let table = ingest(&path, "NumFoci", 5).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.columns(),
            &["NumFoci", "Area", "Sample", "SampleGroup", "Positive"]
        );
        let sample = table.column_index(SAMPLE_COL).unwrap();
        let group = table.column_index(GROUP_COL).unwrap();
        let positive = table.column_index(POSITIVE_COL).unwrap();
        assert_eq!(table.value(0, sample), "A_1_results.csv");
        assert_eq!(table.value(0, group), "A");
        // Boundary: exactly at threshold is positive.
        assert_eq!(table.value(0, positive), "true");
        assert_eq!(table.value(1, positive), "true");
    }

    #[test]
    fn test_ingest_below_threshold_is_negative() {
        let tmp = tempdir().unwrap();
        let path = write_csv(tmp.path(), "B_1_results.csv", "NumFoci\n2\n");
        let table = ingest(&path, "NumFoci", 5).unwrap();
        let positive = table.column_index(POSITIVE_COL).unwrap();
        assert_eq!(table.value(0, positive), "false");
    }

    #[test]
    fn test_ingest_empty_file_is_distinguished() {
        let tmp = tempdir().unwrap();
        let path = write_csv(tmp.path(), "A_1_results.csv", "");
        assert!(matches!(
            ingest(&path, "NumFoci", 5),
            Err(IngestError::Empty)
        ));
    }

    #[test]
    fn test_ingest_header_only_yields_zero_rows() {
        let tmp = tempdir().unwrap();
        let path = write_csv(tmp.path(), "A_1_results.csv", "NumFoci\n");
        let table = ingest(&path, "NumFoci", 5).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn test_ingest_missing_measurement_column_is_malformed() {
        let tmp = tempdir().unwrap();
        let path = write_csv(tmp.path(), "A_1_results.csv", "Area\n1.0\n");
        assert!(matches!(
            ingest(&path, "NumFoci", 5),
            Err(IngestError::MissingColumn(_))
        ));
    }

    #[test]
    fn test_ingest_non_numeric_measurement_is_malformed() {
        let tmp = tempdir().unwrap();
        let path = write_csv(tmp.path(), "A_1_results.csv", "NumFoci\nabc\n");
        assert!(matches!(
            ingest(&path, "NumFoci", 5),
            Err(IngestError::BadMeasurement { .. })
        ));
    }

    #[test]
    fn test_ingest_file_without_group_prefix_is_skipped() {
        let tmp = tempdir().unwrap();
        let path = write_csv(tmp.path(), "A1_results.csv", "NumFoci\n5\n");
        assert!(matches!(
            ingest(&path, "NumFoci", 5),
            Err(IngestError::NoSampleGroup)
        ));
    }

    #[test]
    fn test_source_column_wins_over_derived() {
        let tmp = tempdir().unwrap();
        let path = write_csv(
            tmp.path(),
            "A_1_results.csv",
            "NumFoci,Sample\n5,original\n",
        );
        let table = ingest(&path, "NumFoci", 5).unwrap();
        let sample = table.column_index(SAMPLE_COL).unwrap();
        assert_eq!(table.value(0, sample), "original");
    }

    #[test]
    fn test_ragged_row_is_malformed() {
        let tmp = tempdir().unwrap();
        let path = write_csv(tmp.path(), "A_1_results.csv", "NumFoci,Area\n5\n");
        assert!(matches!(
            ingest(&path, "NumFoci", 5),
            Err(IngestError::Parse(_))
        ));
    }
}
