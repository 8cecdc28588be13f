//! Backup restoration for Roster
//!
//! Replaces the whole roster with the contents of a backup file.

use std::path::Path;

use tracing::{info, warn};

use crate::error::RosterResult;
use crate::models::StudentId;
use crate::storage::{read_records_required, StudentStore};

/// Replace the roster with the records stored at `path`
///
/// The file is parsed completely before anything changes, so a missing or
/// malformed backup leaves the store exactly as it was. On success the
/// replacement is also written to the store's primary file.
pub fn restore(store: &mut StudentStore, path: &Path) -> RosterResult<RestoreResult> {
    let records = read_records_required(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "restore rejected");
        e
    })?;

    let replaced_count = store.len();
    let restored_count = records.len();
    store.replace_all(records)?;

    info!(path = %path.display(), restored_count, replaced_count, "roster restored");
    Ok(RestoreResult {
        restored_count,
        replaced_count,
    })
}

/// Parse a backup without applying it
pub fn validate_backup(path: &Path) -> RosterResult<ValidationResult> {
    let records = read_records_required(path)?;

    Ok(ValidationResult {
        record_count: records.len(),
        lowest_id: records.iter().map(|r| r.student_id).min(),
        highest_id: records.iter().map(|r| r.student_id).max(),
        active_count: records
            .iter()
            .filter(|r| r.status == crate::models::StudentStatus::Active)
            .count(),
    })
}

/// Result of a restore operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestoreResult {
    /// Number of students now in the roster
    pub restored_count: usize,
    /// Number of students the roster held before the restore
    pub replaced_count: usize,
}

impl RestoreResult {
    /// Get a summary of what was restored
    pub fn summary(&self) -> String {
        format!(
            "Restored {} student(s), replacing {}",
            self.restored_count, self.replaced_count
        )
    }
}

/// Result of validating a backup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    /// Number of students in the backup
    pub record_count: usize,
    /// Smallest student id, if any
    pub lowest_id: Option<StudentId>,
    /// Largest student id, if any
    pub highest_id: Option<StudentId>,
    /// Number of active students
    pub active_count: usize,
}

impl ValidationResult {
    /// Get a summary of the backup contents
    pub fn summary(&self) -> String {
        match (self.lowest_id, self.highest_id) {
            (Some(low), Some(high)) => format!(
                "{} student(s), {} active, ids {}..={}",
                self.record_count, self.active_count, low, high
            ),
            _ => "Empty roster".to_string(),
        }
    }
}
