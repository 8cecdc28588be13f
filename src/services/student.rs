//! Student service
//!
//! Business logic for student management: required-field and contact
//! validation ahead of the store, and an audit entry for every change.

use std::path::Path;

use tracing::warn;

use crate::audit::EntityType;
use crate::backup::{self, RestoreResult};
use crate::error::{RosterError, RosterResult};
use crate::models::{Column, NewStudent, StudentId, StudentRecord, StudentUpdate};
use crate::search;
use crate::storage::Storage;
use crate::validation::validate_contact;

/// Service for student management
pub struct StudentService<'a> {
    storage: &'a mut Storage,
    check_contact: bool,
}

impl<'a> StudentService<'a> {
    /// Create a new student service that validates contact details
    pub fn new(storage: &'a mut Storage) -> Self {
        Self {
            storage,
            check_contact: true,
        }
    }

    /// Turn email/phone validation on or off
    pub fn with_contact_validation(mut self, enabled: bool) -> Self {
        self.check_contact = enabled;
        self
    }

    /// Add a student
    ///
    /// The id is taken from `explicit_id` when given, otherwise allocated.
    pub fn add(
        &mut self,
        new: NewStudent,
        explicit_id: Option<StudentId>,
    ) -> RosterResult<StudentRecord> {
        new.validate()?;
        if self.check_contact {
            validate_contact(&new.email, &new.phone)?;
        }

        let id = self.storage.students.add(new, explicit_id)?;
        let record = self
            .storage
            .students
            .get(id)
            .ok_or_else(|| RosterError::student_not_found(id.to_string()))?;

        audited(self.storage.log_create(
            EntityType::Student,
            id.to_string(),
            Some(record.full_name()),
            &record,
        ));

        Ok(record)
    }

    /// Update an existing student
    ///
    /// Only the contact fields the update touches are validated.
    pub fn update(&mut self, id: StudentId, update: &StudentUpdate) -> RosterResult<StudentRecord> {
        if update.is_empty() {
            return Err(RosterError::Validation("No changes specified".into()));
        }
        update.validate()?;
        if self.check_contact {
            validate_contact(
                update.email.as_deref().unwrap_or_default(),
                update.phone.as_deref().unwrap_or_default(),
            )?;
        }

        let before = self
            .storage
            .students
            .get(id)
            .ok_or_else(|| RosterError::student_not_found(id.to_string()))?;

        let after = self.storage.students.update(id, update)?;

        audited(self.storage.log_update(
            EntityType::Student,
            id.to_string(),
            Some(after.full_name()),
            &before,
            &after,
        ));

        Ok(after)
    }

    /// Delete a student
    ///
    /// Returns the removed record, or `None` if no student had this id.
    pub fn delete(&mut self, id: StudentId) -> RosterResult<Option<StudentRecord>> {
        let Some(record) = self.storage.students.get(id) else {
            return Ok(None);
        };

        if !self.storage.students.delete(id)? {
            return Ok(None);
        }

        audited(self.storage.log_delete(
            EntityType::Student,
            id.to_string(),
            Some(record.full_name()),
            &record,
        ));

        Ok(Some(record))
    }

    /// Get a student by id
    pub fn get(&self, id: StudentId) -> Option<StudentRecord> {
        self.storage.students.get(id)
    }

    /// Get a student by id, failing if absent
    pub fn find(&self, id: StudentId) -> RosterResult<StudentRecord> {
        self.get(id)
            .ok_or_else(|| RosterError::student_not_found(id.to_string()))
    }

    /// All students in insertion order
    pub fn list(&self) -> Vec<StudentRecord> {
        self.storage.students.list()
    }

    /// Case-insensitive substring search over one column or all of them
    pub fn search(&self, term: &str, column: Option<Column>) -> Vec<StudentRecord> {
        search::search(self.storage.students.records(), term, column)
    }

    /// Students whose stored email or phone fails validation
    ///
    /// Each entry pairs the record with the reason it failed.
    pub fn invalid_contacts(&self) -> Vec<(StudentRecord, String)> {
        self.storage
            .students
            .records()
            .iter()
            .filter_map(|r| match validate_contact(&r.email, &r.phone) {
                Ok(()) => None,
                Err(e) => Some((r.clone(), e.to_string())),
            })
            .collect()
    }

    /// Write the roster to an arbitrary path
    pub fn export(&self, path: &Path) -> RosterResult<()> {
        backup::backup(&self.storage.students, path)
    }

    /// Replace the roster with the contents of `path`
    pub fn import(&mut self, path: &Path) -> RosterResult<RestoreResult> {
        let result = backup::restore(&mut self.storage.students, path)?;
        audited(
            self.storage
                .log_restore(path.display().to_string(), result.restored_count),
        );
        Ok(result)
    }
}

/// Report a failed audit write without failing the operation
///
/// Audit entries are written after the change is persisted; an error here
/// must not be mistaken for a failed mutation.
fn audited(result: RosterResult<()>) {
    if let Err(e) = result {
        warn!(error = %e, "change saved but audit entry not written");
    }
}
