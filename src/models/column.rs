//! Column definitions for the student schema
//!
//! The persisted file's header and the search/update column selectors are
//! both expressed in terms of `Column`.

use std::fmt;
use std::str::FromStr;

use crate::error::RosterError;

/// A column of the student schema, in schema order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    StudentId,
    FirstName,
    LastName,
    Gender,
    DateOfBirth,
    Email,
    Phone,
    Address,
    EnrollmentDate,
    Status,
}

impl Column {
    /// All columns in the order they appear in the persisted file
    pub const ALL: [Column; 10] = [
        Column::StudentId,
        Column::FirstName,
        Column::LastName,
        Column::Gender,
        Column::DateOfBirth,
        Column::Email,
        Column::Phone,
        Column::Address,
        Column::EnrollmentDate,
        Column::Status,
    ];

    /// Header name used in the persisted file
    pub fn header(&self) -> &'static str {
        match self {
            Column::StudentId => "student_id",
            Column::FirstName => "first_name",
            Column::LastName => "last_name",
            Column::Gender => "gender",
            Column::DateOfBirth => "date_of_birth",
            Column::Email => "email",
            Column::Phone => "phone",
            Column::Address => "address",
            Column::EnrollmentDate => "enrollment_date",
            Column::Status => "status",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Column::StudentId => "ID",
            Column::FirstName => "First Name",
            Column::LastName => "Last Name",
            Column::Gender => "Gender",
            Column::DateOfBirth => "Date of Birth",
            Column::Email => "Email",
            Column::Phone => "Phone",
            Column::Address => "Address",
            Column::EnrollmentDate => "Enrollment Date",
            Column::Status => "Status",
        }
    }

    /// Whether the column can be changed after the record is created
    pub fn is_mutable(&self) -> bool {
        !matches!(self, Column::StudentId | Column::EnrollmentDate)
    }

    /// Header names of every column, in schema order
    pub fn headers() -> Vec<&'static str> {
        Self::ALL.iter().map(Column::header).collect()
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.header())
    }
}

impl FromStr for Column {
    type Err = RosterError;

    /// Accepts header names (`first_name`), labels (`First Name`) and the
    /// short `id` alias, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace([' ', '-'], "_");
        if normalized == "id" {
            return Ok(Column::StudentId);
        }

        Self::ALL
            .iter()
            .copied()
            .find(|column| {
                column.header() == normalized
                    || column.label().to_lowercase().replace(' ', "_") == normalized
            })
            .ok_or_else(|| RosterError::Validation(format!("Unknown column: '{}'", s.trim())))
    }
}
