//! File I/O utilities with atomic writes
//!
//! Reads and writes student record files in CSV form. Writes go to a temp
//! file that is renamed over the target, so a file is either completely
//! written or not modified at all.

use std::collections::HashSet;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tempfile::NamedTempFile;
use tracing::debug;

use crate::error::RosterError;
use crate::models::{Column, StudentRecord};

/// Columns every record file must carry; the rest may be missing in files
/// written by older versions of the schema.
const REQUIRED_COLUMNS: [Column; 5] = [
    Column::StudentId,
    Column::FirstName,
    Column::LastName,
    Column::DateOfBirth,
    Column::EnrollmentDate,
];

/// Read student records from a CSV file, returning an error if it doesn't exist
///
/// Parsing is all-or-nothing: a bad header, a malformed row or a duplicated
/// id fails the whole read.
pub fn read_records_required<P: AsRef<Path>>(path: P) -> Result<Vec<StudentRecord>, RosterError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(RosterError::Io(format!("File not found: {}", path.display())));
    }

    let file = File::open(path)
        .map_err(|e| RosterError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    read_records_from(BufReader::new(file))
        .map_err(|e| RosterError::Storage(format!("Failed to parse {}: {}", path.display(), e)))
}

/// Read student records from any CSV source
pub fn read_records_from<R: Read>(reader: R) -> Result<Vec<StudentRecord>, RosterError> {
    let mut reader = csv::ReaderBuilder::new().has_headers(true).from_reader(reader);

    check_headers(reader.headers()?)?;

    let mut records = Vec::new();
    let mut seen = HashSet::new();

    for (row, result) in reader.deserialize::<StudentRecord>().enumerate() {
        let record = result.map_err(|e| RosterError::Csv(format!("row {}: {}", row + 1, e)))?;
        if !seen.insert(record.student_id) {
            return Err(RosterError::Csv(format!(
                "row {}: duplicate student_id {}",
                row + 1,
                record.student_id
            )));
        }
        records.push(record);
    }

    Ok(records)
}

/// Reject unknown or missing columns
fn check_headers(headers: &csv::StringRecord) -> Result<(), RosterError> {
    if headers.is_empty() {
        return Err(RosterError::Csv("missing header row".into()));
    }

    let known = Column::headers();
    for header in headers.iter() {
        if !known.contains(&header) {
            return Err(RosterError::Csv(format!("unknown column '{}'", header)));
        }
    }

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column.header()) {
            return Err(RosterError::Csv(format!(
                "missing column '{}'",
                column.header()
            )));
        }
    }

    Ok(())
}

/// Write student records to any CSV sink, header first
pub fn write_records_to<W: Write>(writer: W, records: &[StudentRecord]) -> Result<(), RosterError> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(writer);

    // Written explicitly so an empty collection still gets its header row
    writer.write_record(Column::headers())?;
    for record in records {
        writer.serialize(record)?;
    }

    writer
        .flush()
        .map_err(|e| RosterError::Io(format!("Failed to flush data: {}", e)))?;
    Ok(())
}

/// Write student records to a file atomically (write to temp, then rename)
///
/// The temp file gets a unique name in the target's directory, so no other
/// file there is ever touched.
pub fn write_records_atomic<P: AsRef<Path>>(
    path: P,
    records: &[StudentRecord],
) -> Result<(), RosterError> {
    let path = path.as_ref();

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(|e| {
        RosterError::Io(format!(
            "Failed to create directory {}: {}",
            parent.display(),
            e
        ))
    })?;

    // Same directory as the target so the rename stays on one filesystem.
    // Dropping an unpersisted temp file deletes it.
    let temp = NamedTempFile::new_in(parent)
        .map_err(|e| RosterError::Io(format!("Failed to create temp file: {}", e)))?;

    write_temp(&temp, records)?;

    temp.persist(path)
        .map_err(|e| RosterError::Io(format!("Failed to rename temp file: {}", e.error)))?;

    debug!(path = %path.display(), count = records.len(), "wrote record file");
    Ok(())
}

fn write_temp(temp: &NamedTempFile, records: &[StudentRecord]) -> Result<(), RosterError> {
    let mut writer = BufWriter::new(temp.as_file());
    write_records_to(&mut writer, records)?;

    writer
        .flush()
        .map_err(|e| RosterError::Io(format!("Failed to flush data: {}", e)))?;

    temp.as_file()
        .sync_all()
        .map_err(|e| RosterError::Io(format!("Failed to sync data: {}", e)))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, NewStudent, StudentId, StudentStatus};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn sample(id: u32) -> StudentRecord {
        let new = NewStudent::new("Ada", "Lovelace", NaiveDate::from_ymd_opt(1815, 12, 10).unwrap())
            .with_gender(Gender::Female)
            .with_email("a@b.com")
            .with_phone("1234567890")
            .with_address("12 St James's Square,\nLondon \"UK\"");
        StudentRecord::from_new(
            StudentId::new(id),
            new,
            NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
        )
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("students.csv");

        let mut second = sample(7);
        second.gender = None;
        second.status = StudentStatus::Inactive;
        let records = vec![sample(3), second];

        write_records_atomic(&path, &records).unwrap();
        let loaded = read_records_required(&path).unwrap();

        assert_eq!(loaded, records);
    }

    #[test]
    fn test_empty_collection_writes_header() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("students.csv");

        write_records_atomic(&path, &[]).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents.trim_end(),
            "student_id,first_name,last_name,gender,date_of_birth,email,phone,address,enrollment_date,status"
        );
        assert!(read_records_required(&path).unwrap().is_empty());
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("students.csv");

        write_records_atomic(&path, &[sample(1)]).unwrap();

        assert!(path.exists());
        let names: Vec<_> = fs::read_dir(temp_dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("students.csv")]);
    }

    #[test]
    fn test_atomic_write_leaves_neighbouring_files_alone() {
        let temp_dir = TempDir::new().unwrap();
        let primary = temp_dir.path().join("students.csv");
        let export = temp_dir.path().join("students.bak");
        let bystander = temp_dir.path().join("students.csv.tmp");
        fs::write(&bystander, "keep me").unwrap();

        write_records_atomic(&primary, &[sample(1)]).unwrap();
        write_records_atomic(&export, &[sample(2)]).unwrap();

        assert_eq!(fs::read_to_string(&bystander).unwrap(), "keep me");
        assert_eq!(read_records_required(&primary).unwrap(), vec![sample(1)]);
        assert_eq!(read_records_required(&export).unwrap(), vec![sample(2)]);
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("dir").join("students.csv");

        write_records_atomic(&path, &[sample(1)]).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_read_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_records_required(temp_dir.path().join("nope.csv")).unwrap_err();
        assert!(matches!(err, RosterError::Io(_)));
    }

    #[test]
    fn test_corrupt_files_are_storage_errors() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("bad.csv");

        let cases = [
            "",
            "not,a,roster\n1,2,3\n",
            "student_id,first_name,last_name,gender,date_of_birth,email,phone,address,enrollment_date,status\n\
             abc,Ada,Lovelace,Female,1815-12-10,,,,2024-09-01,Active\n",
            "student_id,first_name,last_name,gender,date_of_birth,email,phone,address,enrollment_date,status\n\
             1,Ada,Lovelace,Female,10/12/1815,,,,2024-09-01,Active\n",
            "student_id,first_name,last_name,gender,date_of_birth,email,phone,address,enrollment_date,status\n\
             1,Ada,Lovelace,Female,1815-12-10,,,,2024-09-01,Active\n\
             1,Alan,Turing,Male,1912-06-23,,,,2024-09-01,Active\n",
        ];

        for contents in cases {
            fs::write(&path, contents).unwrap();
            let err = read_records_required(&path).unwrap_err();
            assert!(matches!(err, RosterError::Storage(_)), "{:?}", contents);
        }
    }

    #[test]
    fn test_reads_file_without_gender_and_status_columns() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("old.csv");
        fs::write(
            &path,
            "student_id,first_name,last_name,date_of_birth,email,phone,address,enrollment_date\n\
             4,Grace,Hopper,1906-12-09,g@navy.mil,1234567890,Arlington,2024-01-15\n",
        )
        .unwrap();

        let records = read_records_required(&path).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].student_id, StudentId::new(4));
        assert_eq!(records[0].gender, None);
        assert_eq!(records[0].status, StudentStatus::Active);
    }
}
