//! Per-group summary statistics over the unified table.

use crate::aggregate::Table;
use crate::ingest::{GROUP_COL, POSITIVE_COL};

/// One summary line per sample group present in the table. Groups with zero
/// rows are absent, never present-with-zero, so `total > 0` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    pub group: String,
    pub positive: usize,
    pub total: usize,
    pub pct_positive: f64,
}

/// Summarize per distinct `SampleGroup` value, in order of first appearance.
pub fn summarize(table: &Table) -> Vec<SummaryRow> {
    let (group_idx, positive_idx) = match (
        table.column_index(GROUP_COL),
        table.column_index(POSITIVE_COL),
    ) {
        (Some(g), Some(p)) => (g, p),
        _ => return Vec::new(),
    };

    let mut rows: Vec<SummaryRow> = Vec::new();
    for i in 0..table.len() {
        let group = table.value(i, group_idx);
        let positive = table.value(i, positive_idx) == "true";

        match rows.iter_mut().find(|r| r.group == group) {
            Some(row) => {
                row.total += 1;
                if positive {
                    row.positive += 1;
                }
            }
            None => rows.push(SummaryRow {
                group: group.to_string(),
                positive: positive as usize,
                total: 1,
                pct_positive: 0.0,
            }),
        }
    }

    for row in &mut rows {
        row.pct_positive = round2(100.0 * row.positive as f64 / row.total as f64);
    }
    rows
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table_with(groups_and_positive: &[(&str, bool)]) -> Table {
        let mut t = Table::with_columns(vec![GROUP_COL.to_string(), POSITIVE_COL.to_string()]);
        for (group, positive) in groups_and_positive {
            t.push_row(vec![group.to_string(), positive.to_string()]);
        }
        t
    }

    #[test]
    fn test_pct_positive_three_of_four() {
        let t = table_with(&[("A", true), ("A", true), ("A", true), ("A", false)]);
        let summary = summarize(&t);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].positive, 3);
        assert_eq!(summary[0].total, 4);
        assert_eq!(summary[0].pct_positive, 75.0);
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        let t = table_with(&[("A", true), ("A", false), ("A", false)]);
        let summary = summarize(&t);
        assert_eq!(summary[0].pct_positive, 33.33);
    }

    #[test]
    fn test_first_appearance_order() {
        let t = table_with(&[("B", false), ("A", true), ("B", true)]);
        let summary = summarize(&t);
        assert_eq!(summary[0].group, "B");
        assert_eq!(summary[1].group, "A");
        assert_eq!(summary[0].total, 2);
    }

    #[test]
    fn test_empty_table_summarizes_to_nothing() {
        assert!(summarize(&Table::new()).is_empty());
    }
}
