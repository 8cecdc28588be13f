//! Student model
//!
//! A student record as held by the store and persisted as one CSV row, plus
//! the requests used to create and update records.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::column::Column;
use super::ids::StudentId;
use crate::error::{RosterError, RosterResult};

/// Date format used for every date column
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Student gender
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

impl FromStr for Gender {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(RosterError::Validation(format!("Invalid gender: '{}'", other))),
        }
    }
}

/// Enrollment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum StudentStatus {
    #[default]
    Active,
    Inactive,
}

impl fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StudentStatus::Active => write!(f, "Active"),
            StudentStatus::Inactive => write!(f, "Inactive"),
        }
    }
}

impl FromStr for StudentStatus {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" => Ok(StudentStatus::Active),
            "inactive" => Ok(StudentStatus::Inactive),
            other => Err(RosterError::Validation(format!("Invalid status: '{}'", other))),
        }
    }
}

/// A student record
///
/// Field order matches the persisted file's column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentRecord {
    pub student_id: StudentId,
    pub first_name: String,
    pub last_name: String,
    /// Older roster files have no gender column
    #[serde(default)]
    pub gender: Option<Gender>,
    pub date_of_birth: NaiveDate,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub enrollment_date: NaiveDate,
    #[serde(default)]
    pub status: StudentStatus,
}

impl StudentRecord {
    /// Build a record from an add request
    pub fn from_new(student_id: StudentId, new: NewStudent, enrollment_date: NaiveDate) -> Self {
        Self {
            student_id,
            first_name: new.first_name,
            last_name: new.last_name,
            gender: new.gender,
            date_of_birth: new.date_of_birth,
            email: new.email,
            phone: new.phone,
            address: new.address,
            enrollment_date,
            status: new.status,
        }
    }

    /// "First Last"
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Text rendering of a single column, as used by search and display
    pub fn field_text(&self, column: Column) -> String {
        match column {
            Column::StudentId => self.student_id.to_string(),
            Column::FirstName => self.first_name.clone(),
            Column::LastName => self.last_name.clone(),
            Column::Gender => self.gender.map(|g| g.to_string()).unwrap_or_default(),
            Column::DateOfBirth => self.date_of_birth.format(DATE_FORMAT).to_string(),
            Column::Email => self.email.clone(),
            Column::Phone => self.phone.clone(),
            Column::Address => self.address.clone(),
            Column::EnrollmentDate => self.enrollment_date.format(DATE_FORMAT).to_string(),
            Column::Status => self.status.to_string(),
        }
    }

    /// Apply an update request, leaving unspecified fields untouched
    pub fn apply(&mut self, update: &StudentUpdate) {
        if let Some(first_name) = &update.first_name {
            self.first_name = first_name.clone();
        }
        if let Some(last_name) = &update.last_name {
            self.last_name = last_name.clone();
        }
        if let Some(gender) = update.gender {
            self.gender = gender;
        }
        if let Some(date_of_birth) = update.date_of_birth {
            self.date_of_birth = date_of_birth;
        }
        if let Some(email) = &update.email {
            self.email = email.clone();
        }
        if let Some(phone) = &update.phone {
            self.phone = phone.clone();
        }
        if let Some(address) = &update.address {
            self.address = address.clone();
        }
        if let Some(status) = update.status {
            self.status = status;
        }
    }
}

impl fmt::Display for StudentRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {}", self.student_id, self.full_name())
    }
}

/// Request to add a new student
///
/// The id and enrollment date are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<Gender>,
    pub date_of_birth: NaiveDate,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub status: StudentStatus,
}

impl NewStudent {
    /// Create a request with the required fields; the rest start empty
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_of_birth: NaiveDate,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            gender: None,
            date_of_birth,
            email: String::new(),
            phone: String::new(),
            address: String::new(),
            status: StudentStatus::Active,
        }
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = Some(gender);
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = phone.into();
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = address.into();
        self
    }

    pub fn with_status(mut self, status: StudentStatus) -> Self {
        self.status = status;
        self
    }

    /// Check required fields
    pub fn validate(&self) -> RosterResult<()> {
        if self.first_name.trim().is_empty() {
            return Err(RosterError::Validation("First name cannot be empty".into()));
        }
        if self.last_name.trim().is_empty() {
            return Err(RosterError::Validation("Last name cannot be empty".into()));
        }
        Ok(())
    }
}

/// Partial update of a student record
///
/// Each `Some` field overwrites the stored value. The id and enrollment date
/// have no slot here and can never be changed through an update.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    /// `Some(None)` clears the gender
    pub gender: Option<Option<Gender>>,
    pub date_of_birth: Option<NaiveDate>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub status: Option<StudentStatus>,
}

impl StudentUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an update from named column/value pairs
    ///
    /// Unknown column names, immutable columns and values that don't parse
    /// for their column are rejected.
    pub fn from_pairs<I, K, V>(pairs: I) -> RosterResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut update = Self::new();
        for (name, value) in pairs {
            let column: Column = name.as_ref().parse()?;
            update.set(column, value.as_ref())?;
        }
        Ok(update)
    }

    /// Set a single column from its text form
    pub fn set(&mut self, column: Column, value: &str) -> RosterResult<()> {
        match column {
            Column::StudentId | Column::EnrollmentDate => {
                return Err(RosterError::Validation(format!(
                    "Column '{}' cannot be updated",
                    column
                )));
            }
            Column::FirstName => self.first_name = Some(value.to_string()),
            Column::LastName => self.last_name = Some(value.to_string()),
            Column::Gender => {
                self.gender = Some(if value.trim().is_empty() {
                    None
                } else {
                    Some(value.parse()?)
                });
            }
            Column::DateOfBirth => self.date_of_birth = Some(parse_date(value)?),
            Column::Email => self.email = Some(value.to_string()),
            Column::Phone => self.phone = Some(value.to_string()),
            Column::Address => self.address = Some(value.to_string()),
            Column::Status => self.status = Some(value.parse()?),
        }
        Ok(())
    }

    /// Whether the update changes nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Check that supplied required fields are not blank
    pub fn validate(&self) -> RosterResult<()> {
        if matches!(&self.first_name, Some(name) if name.trim().is_empty()) {
            return Err(RosterError::Validation("First name cannot be empty".into()));
        }
        if matches!(&self.last_name, Some(name) if name.trim().is_empty()) {
            return Err(RosterError::Validation("Last name cannot be empty".into()));
        }
        Ok(())
    }
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(value: &str) -> RosterResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|e| {
        RosterError::Validation(format!("Invalid date '{}' (expected YYYY-MM-DD): {}", value, e))
    })
}
