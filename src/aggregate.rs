//! Row tables and their aggregation.
//!
//! Input CSVs carry whatever columns the imaging pipeline emitted, so the
//! table is header-driven: a column list plus string cells. Concatenation
//! aligns tables by column name, widening with empty cells where a file
//! lacked a column another file had.

use crate::ingest::SAMPLE_COL;

/// An in-memory row table with a dynamic column set. Also serves as the
/// unified table produced by [`aggregate`]; empty is a valid state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_columns(columns: Vec<String>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell value, empty string when the row is short (widened tables).
    pub fn value(&self, row: usize, col: usize) -> &str {
        self.rows[row].get(col).map(String::as_str).unwrap_or("")
    }

    /// Push a row already aligned with this table's columns.
    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    /// Append a whole column. Does nothing if a column of that name already
    /// exists: derived columns never overwrite source columns.
    pub fn add_column(&mut self, name: &str, values: Vec<String>) {
        if self.has_column(name) {
            return;
        }
        debug_assert_eq!(values.len(), self.rows.len());
        self.columns.push(name.to_string());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row.push(value);
        }
    }

    /// Concatenate `other` onto `self`, aligning by column name. New columns
    /// are appended in `other`'s order; pre-existing rows get empty cells for
    /// them, and `other`'s rows get empty cells for columns it lacked.
    pub fn append(&mut self, other: Table) {
        if self.columns.is_empty() {
            *self = other;
            return;
        }

        for col in &other.columns {
            if !self.has_column(col) {
                self.columns.push(col.clone());
                for row in &mut self.rows {
                    row.push(String::new());
                }
            }
        }

        let mapping: Vec<Option<usize>> = self
            .columns
            .iter()
            .map(|c| other.column_index(c))
            .collect();

        for row in other.rows {
            let aligned: Vec<String> = mapping
                .iter()
                .map(|idx| match idx {
                    Some(i) => row.get(*i).cloned().unwrap_or_default(),
                    None => String::new(),
                })
                .collect();
            self.rows.push(aligned);
        }
    }

    /// New table with the same columns and the rows satisfying `keep`.
    pub fn filter<F>(&self, mut keep: F) -> Table
    where
        F: FnMut(usize) -> bool,
    {
        Table {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .enumerate()
                .filter(|(i, _)| keep(*i))
                .map(|(_, r)| r.clone())
                .collect(),
        }
    }
}

/// Concatenate ingested tables in scan order. Zero tables yields an
/// explicitly-empty table, not an error.
pub fn aggregate(tables: Vec<Table>) -> Table {
    let mut unified = Table::new();
    for table in tables {
        unified.append(table);
    }
    unified
}

/// Partition the unified table per known group: a row belongs to a group when
/// its `Sample` field contains the group name as a substring. Legacy
/// semantics, kept deliberately; a group name that is a substring of another
/// group's sample names will over-match.
pub fn partition_by_group(table: &Table, groups: &[String]) -> Vec<(String, Table)> {
    let sample_idx = table.column_index(SAMPLE_COL);

    groups
        .iter()
        .map(|group| {
            let subset = match sample_idx {
                Some(idx) => table.filter(|row| table.value(row, idx).contains(group.as_str())),
                None => Table::with_columns(table.columns().to_vec()),
            };
            (group.clone(), subset)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(columns: &[&str], rows: &[&[&str]]) -> Table {
        let mut t = Table::with_columns(columns.iter().map(|c| c.to_string()).collect());
        for row in rows {
            t.push_row(row.iter().map(|v| v.to_string()).collect());
        }
        t
    }

    #[test]
    fn test_aggregate_preserves_scan_order() {
        let a = table(&["NumFoci", "Sample"], &[&["5", "A_1_results.csv"]]);
        let b = table(&["NumFoci", "Sample"], &[&["2", "B_1_results.csv"]]);
        let unified = aggregate(vec![a, b]);
        assert_eq!(unified.len(), 2);
        assert_eq!(unified.value(0, 0), "5");
        assert_eq!(unified.value(1, 0), "2");
    }

    #[test]
    fn test_aggregate_zero_tables_is_empty_not_error() {
        let unified = aggregate(vec![]);
        assert!(unified.is_empty());
        assert!(unified.columns().is_empty());
    }

    #[test]
    fn test_append_aligns_differing_column_sets() {
        let a = table(&["NumFoci", "Sample"], &[&["5", "A_1_results.csv"]]);
        let b = table(&["Sample", "Area"], &[&["B_1_results.csv", "12.5"]]);
        let unified = aggregate(vec![a, b]);

        assert_eq!(unified.columns(), &["NumFoci", "Sample", "Area"]);
        assert_eq!(unified.value(0, 2), "");
        assert_eq!(unified.value(1, 0), "");
        assert_eq!(unified.value(1, 1), "B_1_results.csv");
        assert_eq!(unified.value(1, 2), "12.5");
    }

    #[test]
    fn test_partition_contains_semantics() {
        let t = table(
            &["Sample"],
            &[
                &["A_1_results.csv"],
                &["A_2_results.csv"],
                &["B_1_results.csv"],
            ],
        );
        let parts = partition_by_group(&t, &["A".to_string(), "B".to_string()]);
        assert_eq!(parts[0].1.len(), 2);
        assert_eq!(parts[1].1.len(), 1);
    }

    #[test]
    fn test_partition_is_idempotent() {
        let t = table(&["Sample"], &[&["A_1_results.csv"], &["A_2_results.csv"]]);
        let groups = vec!["A".to_string()];
        let first = partition_by_group(&t, &groups);
        let again = partition_by_group(&first[0].1, &groups);
        assert_eq!(first[0].1, again[0].1);
    }

    #[test]
    fn test_partition_group_with_no_rows_is_empty_subset() {
        let t = table(&["Sample"], &[&["A_1_results.csv"]]);
        let parts = partition_by_group(&t, &["C".to_string()]);
        assert!(parts[0].1.is_empty());
    }
}
