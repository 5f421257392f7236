//! Sample-group naming convention.
//!
//! Folders and result files follow `<group>_<suffix>`; the group key is the
//! prefix before the first underscore. The same rule is applied to folder
//! names during discovery and to file names during row tagging, so the two
//! can never drift apart.

/// Suffix the imaging pipeline appends to per-sample result files.
pub const RESULTS_SUFFIX: &str = "_results.csv";

/// Group key of a folder or file name: everything before the first `_`.
/// Returns `None` when there is no underscore or the prefix is empty.
pub fn sample_group(name: &str) -> Option<&str> {
    match name.split_once('_') {
        Some((prefix, _)) if !prefix.is_empty() => Some(prefix),
        _ => None,
    }
}

/// Strip the `_results.csv` suffix when present, so the suffix's own
/// underscore never wins the delimiter search.
pub fn strip_results_suffix(name: &str) -> &str {
    name.strip_suffix(RESULTS_SUFFIX).unwrap_or(name)
}

/// Group key for a result file name.
pub fn file_sample_group(file_name: &str) -> Option<&str> {
    sample_group(strip_results_suffix(file_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_is_prefix_before_first_underscore() {
        assert_eq!(sample_group("A_1"), Some("A"));
        assert_eq!(sample_group("Control_rep2_old"), Some("Control"));
        assert_eq!(sample_group("KO12_3"), Some("KO12"));
    }

    #[test]
    fn test_no_underscore_has_no_group() {
        assert_eq!(sample_group("Control"), None);
        assert_eq!(sample_group(""), None);
    }

    #[test]
    fn test_leading_underscore_has_no_group() {
        assert_eq!(sample_group("_rep1"), None);
    }

    #[test]
    fn test_pure_function_is_stable() {
        assert_eq!(sample_group("A_1"), sample_group("A_1"));
    }

    #[test]
    fn test_suffix_stripped_before_delimiter_search() {
        // Without the strip, the suffix's underscore would yield "A" for
        // "A_results.csv" even though the stem has no group prefix of its own.
        assert_eq!(file_sample_group("A_1_results.csv"), Some("A"));
        assert_eq!(file_sample_group("A1_results.csv"), None);
    }

    #[test]
    fn test_suffix_strip_only_where_applicable() {
        assert_eq!(strip_results_suffix("A_1_results.csv"), "A_1");
        assert_eq!(strip_results_suffix("A_1.csv"), "A_1.csv");
        assert_eq!(file_sample_group("A_1.csv"), Some("A"));
    }
}
