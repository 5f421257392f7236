//! Directory scanning: candidate folders, their CSV files, detected sample
//! groups, and any pre-existing output folders from earlier runs.

use crate::naming;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Reserved prefix for output folders. Folders carrying it are never
/// candidates for ingestion.
pub const OUTPUT_PREFIX: &str = "CombinedResults";

/// An immediate sub-folder of the root that may hold per-sample CSVs.
#[derive(Debug)]
pub struct CandidateFolder {
    pub path: PathBuf,
    pub name: String,
    pub csv_files: Vec<PathBuf>,
}

/// Everything the rest of the pipeline needs to know about the root.
#[derive(Debug)]
pub struct ScanOutcome {
    pub candidates: Vec<CandidateFolder>,
    /// Flat CSV count over all candidate folders. Sizes the progress bar.
    pub total_files: usize,
    /// Distinct sample groups detected from folder names, sorted.
    pub groups: Vec<String>,
    /// Pre-existing `CombinedResults*` folders, subject to the replacement
    /// protocol before any ingestion happens.
    pub old_outputs: Vec<PathBuf>,
}

/// Enumerate immediate sub-directories of `root`.
///
/// Exclusions are deliberately asymmetric: `CombinedResults*` folders are
/// excluded everywhere, but hidden folders (leading `.`) are excluded only
/// from group-name detection — their CSVs still count and ingest.
pub fn scan(root: &Path) -> io::Result<ScanOutcome> {
    let mut candidates: Vec<CandidateFolder> = Vec::new();
    let mut groups: Vec<String> = Vec::new();
    let mut old_outputs: Vec<PathBuf> = Vec::new();
    let mut total_files = 0usize;

    let mut entries: Vec<PathBuf> = fs::read_dir(root)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<io::Result<Vec<_>>>()?;
    entries.sort();

    for path in entries {
        if !path.is_dir() {
            continue;
        }
        let name = match path.file_name() {
            Some(n) => n.to_string_lossy().into_owned(),
            None => continue,
        };

        if name.starts_with(OUTPUT_PREFIX) {
            old_outputs.push(path);
            continue;
        }

        if !name.starts_with('.') {
            if let Some(group) = naming::sample_group(&name) {
                if !groups.iter().any(|g| g == group) {
                    groups.push(group.to_string());
                }
            }
        }

        let csv_files = list_csv_files(&path)?;
        total_files += csv_files.len();
        candidates.push(CandidateFolder {
            path,
            name,
            csv_files,
        });
    }

    groups.sort();

    Ok(ScanOutcome {
        candidates,
        total_files,
        groups,
        old_outputs,
    })
}

fn list_csv_files(folder: &Path) -> io::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(folder)? {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let hidden = path
            .file_name()
            .map(|n| n.to_string_lossy().starts_with('.'))
            .unwrap_or(true);
        if hidden {
            continue;
        }
        if path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("csv"))
            .unwrap_or(false)
        {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_scan_excludes_output_folders_from_candidacy() {
        let tmp = tempdir().unwrap();
        fs::create_dir(tmp.path().join("A_1")).unwrap();
        fs::create_dir(tmp.path().join("CombinedResults_(24.01.01-10.00.00)")).unwrap();
        fs::write(tmp.path().join("A_1").join("A_1_results.csv"), "NumFoci\n1\n").unwrap();
        fs::write(
            tmp.path()
                .join("CombinedResults_(24.01.01-10.00.00)")
                .join("A_results_combined.csv"),
            "NumFoci\n1\n",
        )
        .unwrap();

        let outcome = scan(tmp.path()).unwrap();
        assert_eq!(outcome.candidates.len(), 1);
        assert_eq!(outcome.total_files, 1);
        assert_eq!(outcome.groups, vec!["A".to_string()]);
        assert_eq!(outcome.old_outputs.len(), 1);
    }

    #[test]
    fn test_hidden_folder_counted_but_not_a_group() {
        let tmp = tempdir().unwrap();
        fs::create_dir(tmp.path().join(".B_hidden")).unwrap();
        fs::write(
            tmp.path().join(".B_hidden").join("B_1_results.csv"),
            "NumFoci\n2\n",
        )
        .unwrap();

        let outcome = scan(tmp.path()).unwrap();
        // Hidden folders contribute no group name but their CSVs still count.
        assert!(outcome.groups.is_empty());
        assert_eq!(outcome.total_files, 1);
    }

    #[test]
    fn test_folders_without_underscore_detect_no_group() {
        let tmp = tempdir().unwrap();
        fs::create_dir(tmp.path().join("Control")).unwrap();
        let outcome = scan(tmp.path()).unwrap();
        assert!(outcome.groups.is_empty());
        assert_eq!(outcome.candidates.len(), 1);
    }
}
