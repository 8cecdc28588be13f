//! Storage layer for Roster
//!
//! Provides CSV file storage with atomic writes and automatic directory
//! creation, and records every mutation in the audit log.

pub mod file_io;
pub mod students;

pub use file_io::{read_records_required, write_records_atomic};
pub use students::StudentStore;

use serde::Serialize;

use crate::audit::{generate_diff, AuditEntry, AuditLogger, EntityType};
use crate::config::paths::RosterPaths;
use crate::error::RosterResult;

/// Main storage coordinator: the student store plus its audit log
pub struct Storage {
    paths: RosterPaths,
    pub students: StudentStore,
    audit: AuditLogger,
    audit_enabled: bool,
}

impl Storage {
    /// Open storage under the given paths, loading students.csv
    pub fn open(paths: RosterPaths) -> RosterResult<Self> {
        paths.ensure_directories()?;

        Ok(Self {
            students: StudentStore::open(paths.students_file())?,
            audit: AuditLogger::new(paths.audit_log()),
            audit_enabled: true,
            paths,
        })
    }

    /// Turn audit logging on or off
    pub fn with_audit(mut self, enabled: bool) -> Self {
        self.audit_enabled = enabled;
        self
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &RosterPaths {
        &self.paths
    }

    /// Get the audit logger
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }

    /// Record a create operation
    pub fn log_create<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> RosterResult<()> {
        if !self.audit_enabled {
            return Ok(());
        }
        self.audit
            .log(&AuditEntry::create(entity_type, entity_id, entity_name, entity))
    }

    /// Record an update operation; the diff is computed from the two states
    pub fn log_update<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        before: &T,
        after: &T,
    ) -> RosterResult<()> {
        if !self.audit_enabled {
            return Ok(());
        }
        let diff = match (serde_json::to_value(before), serde_json::to_value(after)) {
            (Ok(b), Ok(a)) => generate_diff(&b, &a),
            _ => None,
        };
        self.audit.log(&AuditEntry::update(
            entity_type,
            entity_id,
            entity_name,
            before,
            after,
            diff,
        ))
    }

    /// Record a delete operation
    pub fn log_delete<T: Serialize>(
        &self,
        entity_type: EntityType,
        entity_id: String,
        entity_name: Option<String>,
        entity: &T,
    ) -> RosterResult<()> {
        if !self.audit_enabled {
            return Ok(());
        }
        self.audit
            .log(&AuditEntry::delete(entity_type, entity_id, entity_name, entity))
    }

    /// Record a wholesale restore of the roster
    pub fn log_restore(&self, source: String, record_count: usize) -> RosterResult<()> {
        if !self.audit_enabled {
            return Ok(());
        }
        self.audit.log(&AuditEntry::restore(source, record_count))
    }
}
