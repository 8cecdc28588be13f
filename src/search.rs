//! Record search
//!
//! Case-insensitive substring matching over one column or all columns of a
//! set of records. Ids and dates are matched against their text rendering.

use crate::models::{Column, StudentRecord};

/// Return the records whose chosen column (or any column) contains `term`
///
/// Matching ignores case. An empty term matches every record. Results keep
/// the relative order of `records`.
pub fn search(records: &[StudentRecord], term: &str, column: Option<Column>) -> Vec<StudentRecord> {
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|record| matches(record, &needle, column))
        .cloned()
        .collect()
}

/// Check a single record against an already lowercased term
fn matches(record: &StudentRecord, needle: &str, column: Option<Column>) -> bool {
    match column {
        Some(column) => contains(record, column, needle),
        None => Column::ALL
            .iter()
            .any(|&column| contains(record, column, needle)),
    }
}

fn contains(record: &StudentRecord, column: Column, needle: &str) -> bool {
    record.field_text(column).to_lowercase().contains(needle)
}
