//! Student repository for CSV storage
//!
//! Holds the authoritative in-memory list of students and rewrites
//! students.csv in full after every successful mutation.

use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDate};
use tracing::{debug, info};

use crate::error::{RosterError, RosterResult};
use crate::models::{NewStudent, StudentId, StudentRecord, StudentUpdate};

use super::file_io::{read_records_required, write_records_atomic};

/// Repository for student persistence
///
/// Records are kept in insertion order; that order is also the row order of
/// the persisted file.
#[derive(Debug)]
pub struct StudentStore {
    path: PathBuf,
    records: Vec<StudentRecord>,
}

impl StudentStore {
    /// Open the store backed by `path`
    ///
    /// A missing file is initialized with an empty collection and written
    /// straight away. An existing file that can't be read or parsed is an
    /// error.
    pub fn open(path: impl Into<PathBuf>) -> RosterResult<Self> {
        let mut store = Self {
            path: path.into(),
            records: Vec::new(),
        };
        store.load()?;
        Ok(store)
    }

    /// (Re)load students from disk, replacing the in-memory collection
    pub fn load(&mut self) -> RosterResult<()> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no student file, initializing empty roster");
            self.records.clear();
            return self.save();
        }

        self.records = read_records_required(&self.path)?;
        debug!(path = %self.path.display(), count = self.records.len(), "loaded students");
        Ok(())
    }

    /// Save students to disk
    pub fn save(&self) -> RosterResult<()> {
        write_records_atomic(&self.path, &self.records)
    }

    /// Path of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Add a student, stamping today's date as the enrollment date
    ///
    /// Returns the id the record was stored under.
    pub fn add(&mut self, new: NewStudent, explicit_id: Option<StudentId>) -> RosterResult<StudentId> {
        self.add_enrolled_on(new, explicit_id, Local::now().date_naive())
    }

    /// Add a student with an explicit enrollment date
    pub fn add_enrolled_on(
        &mut self,
        new: NewStudent,
        explicit_id: Option<StudentId>,
        enrollment_date: NaiveDate,
    ) -> RosterResult<StudentId> {
        let id = match explicit_id {
            Some(id) => {
                if self.contains(id) {
                    return Err(RosterError::duplicate_student(id.to_string()));
                }
                id
            }
            None => self.next_id()?,
        };

        self.records
            .push(StudentRecord::from_new(id, new, enrollment_date));

        if let Err(e) = self.save() {
            self.records.pop();
            return Err(e);
        }

        debug!(id = %id, "added student");
        Ok(id)
    }

    /// Apply a partial update to an existing student
    ///
    /// Returns the record as stored after the update.
    pub fn update(&mut self, id: StudentId, update: &StudentUpdate) -> RosterResult<StudentRecord> {
        let index = self
            .position(id)
            .ok_or_else(|| RosterError::student_not_found(id.to_string()))?;

        let before = self.records[index].clone();
        self.records[index].apply(update);

        if let Err(e) = self.save() {
            self.records[index] = before;
            return Err(e);
        }

        debug!(id = %id, "updated student");
        Ok(self.records[index].clone())
    }

    /// Delete a student
    ///
    /// Returns whether a record was removed; a missing id is not an error.
    pub fn delete(&mut self, id: StudentId) -> RosterResult<bool> {
        let Some(index) = self.position(id) else {
            return Ok(false);
        };

        let removed = self.records.remove(index);

        if let Err(e) = self.save() {
            self.records.insert(index, removed);
            return Err(e);
        }

        debug!(id = %id, "deleted student");
        Ok(true)
    }

    /// Replace the whole collection and persist it
    ///
    /// The previous collection is kept if the new one has duplicate ids or
    /// can't be written.
    pub fn replace_all(&mut self, records: Vec<StudentRecord>) -> RosterResult<()> {
        let mut ids: Vec<StudentId> = records.iter().map(|r| r.student_id).collect();
        ids.sort_unstable();
        if let Some(pair) = ids.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(RosterError::duplicate_student(pair[0].to_string()));
        }

        let previous = std::mem::replace(&mut self.records, records);

        if let Err(e) = self.save() {
            self.records = previous;
            return Err(e);
        }

        info!(count = self.records.len(), "replaced student collection");
        Ok(())
    }

    /// Snapshot of all students in insertion order
    pub fn list(&self) -> Vec<StudentRecord> {
        self.records.clone()
    }

    /// Borrow the students without copying
    pub fn records(&self) -> &[StudentRecord] {
        &self.records
    }

    /// Get a student by id
    pub fn get(&self, id: StudentId) -> Option<StudentRecord> {
        self.records.iter().find(|r| r.student_id == id).cloned()
    }

    /// Whether a student with this id exists
    pub fn contains(&self, id: StudentId) -> bool {
        self.position(id).is_some()
    }

    /// Count students
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Id the next record gets when none is supplied: 1 for an empty store,
    /// otherwise one past the largest id.
    pub fn next_id(&self) -> RosterResult<StudentId> {
        match self.records.iter().map(|r| r.student_id).max() {
            None => Ok(StudentId::FIRST),
            Some(max) => max
                .next()
                .ok_or_else(|| RosterError::Validation("Student id space exhausted".into())),
        }
    }

    fn position(&self, id: StudentId) -> Option<usize> {
        self.records.iter().position(|r| r.student_id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, StudentStatus};
    use std::fs;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, StudentStore) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("students.csv");
        let store = StudentStore::open(path).unwrap();
        (temp_dir, store)
    }

    fn ada() -> NewStudent {
        NewStudent::new("Ada", "Lovelace", NaiveDate::from_ymd_opt(1815, 12, 10).unwrap())
            .with_gender(Gender::Female)
            .with_email("a@b.com")
            .with_phone("1234567890")
            .with_address("London")
    }

    fn alan() -> NewStudent {
        NewStudent::new("Alan", "Turing", NaiveDate::from_ymd_opt(1912, 6, 23).unwrap())
            .with_gender(Gender::Male)
    }

    #[test]
    fn test_open_missing_file_creates_it() {
        let (temp_dir, store) = create_test_store();
        assert!(store.is_empty());
        assert!(temp_dir.path().join("students.csv").exists());
    }

    #[test]
    fn test_open_corrupt_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("students.csv");
        fs::write(&path, "this is not a roster\n\"unterminated").unwrap();

        let err = StudentStore::open(&path).unwrap_err();
        assert!(matches!(err, RosterError::Storage(_)));
        // The corrupt file is left alone
        assert!(fs::read_to_string(&path).unwrap().starts_with("this is not"));
    }

    #[test]
    fn test_id_allocation() {
        let (_temp_dir, mut store) = create_test_store();

        assert_eq!(store.add(ada(), None).unwrap(), StudentId::new(1));
        assert_eq!(store.add(alan(), Some(StudentId::new(10))).unwrap(), StudentId::new(10));
        assert_eq!(store.add(ada(), None).unwrap(), StudentId::new(11));
        assert_eq!(store.add(alan(), Some(StudentId::new(5))).unwrap(), StudentId::new(5));
        assert_eq!(store.add(ada(), None).unwrap(), StudentId::new(12));
    }

    #[test]
    fn test_enrollment_date_is_today() {
        let (_temp_dir, mut store) = create_test_store();
        let id = store.add(ada(), None).unwrap();
        let record = store.get(id).unwrap();
        assert_eq!(record.enrollment_date, Local::now().date_naive());
        assert_eq!(record.status, StudentStatus::Active);
    }

    #[test]
    fn test_duplicate_id_rejected_without_changes() {
        let (temp_dir, mut store) = create_test_store();
        store.add(ada(), None).unwrap();

        let file = temp_dir.path().join("students.csv");
        let before_file = fs::read_to_string(&file).unwrap();
        let before = store.list();

        let err = store.add(alan(), Some(StudentId::new(1))).unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(store.list(), before);
        assert_eq!(fs::read_to_string(&file).unwrap(), before_file);
    }

    #[test]
    fn test_update_only_changes_supplied_fields() {
        let (_temp_dir, mut store) = create_test_store();
        let id = store.add(ada(), None).unwrap();
        let before = store.get(id).unwrap();

        let update = StudentUpdate {
            phone: Some("+11234567890".into()),
            status: Some(StudentStatus::Inactive),
            ..Default::default()
        };
        let after = store.update(id, &update).unwrap();

        assert_eq!(after.phone, "+11234567890");
        assert_eq!(after.status, StudentStatus::Inactive);
        assert_eq!(after.student_id, before.student_id);
        assert_eq!(after.enrollment_date, before.enrollment_date);
        assert_eq!(after.first_name, before.first_name);
        assert_eq!(after.email, before.email);
        assert_eq!(after.address, before.address);
        assert_eq!(store.get(id).unwrap(), after);
    }

    #[test]
    fn test_update_missing_student() {
        let (_temp_dir, mut store) = create_test_store();
        let err = store
            .update(StudentId::new(99), &StudentUpdate::new())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete() {
        let (_temp_dir, mut store) = create_test_store();
        let a = store.add(ada(), None).unwrap();
        let b = store.add(alan(), None).unwrap();
        let c = store.add(ada(), None).unwrap();

        assert!(store.delete(b).unwrap());
        let ids: Vec<_> = store.list().iter().map(|r| r.student_id).collect();
        assert_eq!(ids, vec![a, c]);

        assert!(!store.delete(b).unwrap());
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_list_is_a_snapshot() {
        let (_temp_dir, mut store) = create_test_store();
        let id = store.add(ada(), None).unwrap();

        let mut snapshot = store.list();
        snapshot[0].first_name = "Changed".into();
        snapshot.clear();

        assert_eq!(store.get(id).unwrap().first_name, "Ada");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_save_and_reload_preserves_order_and_fields() {
        let (temp_dir, mut store) = create_test_store();
        store.add(alan(), Some(StudentId::new(7))).unwrap();
        store.add(ada().with_address("Flat 2\nLondon"), Some(StudentId::new(3))).unwrap();
        store.add(ada(), None).unwrap();

        let reloaded = StudentStore::open(temp_dir.path().join("students.csv")).unwrap();
        assert_eq!(reloaded.list(), store.list());

        let ids: Vec<u32> = reloaded.list().iter().map(|r| r.student_id.get()).collect();
        assert_eq!(ids, vec![7, 3, 8]);
    }

    #[test]
    fn test_replace_all() {
        let (_temp_dir, mut store) = create_test_store();
        store.add(ada(), None).unwrap();

        let mut other = StudentStore::open(store.path().with_file_name("other.csv")).unwrap();
        other.add(alan(), Some(StudentId::new(40))).unwrap();

        store.replace_all(other.list()).unwrap();
        assert_eq!(store.list(), other.list());
        assert!(store.get(StudentId::new(1)).is_none());
    }

    #[test]
    fn test_replace_all_rejects_duplicate_ids() {
        let (_temp_dir, mut store) = create_test_store();
        store.add(ada(), None).unwrap();
        let before = store.list();

        let mut doubled = store.list();
        doubled.extend(store.list());

        assert!(store.replace_all(doubled).unwrap_err().is_duplicate());
        assert_eq!(store.list(), before);
    }

    #[test]
    fn test_independent_stores() {
        let (_t1, mut first) = create_test_store();
        let (_t2, second) = create_test_store();

        first.add(ada(), None).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 0);
    }
}
