//! Student CLI commands
//!
//! Implements CLI commands for student management.

use clap::Subcommand;
use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::display::student::{format_date, format_student_details, format_student_list};
use crate::error::{RosterError, RosterResult};
use crate::models::{parse_date, Column, NewStudent, StudentId, StudentUpdate};
use crate::services::StudentService;
use crate::storage::Storage;
use crate::validation::{validate_email, validate_phone};

/// Student subcommands
#[derive(Subcommand)]
pub enum StudentCommands {
    /// Add a new student
    Add {
        /// First name
        #[arg(long)]
        first_name: String,
        /// Last name
        #[arg(long)]
        last_name: String,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: String,
        /// Gender (male, female)
        #[arg(short, long)]
        gender: Option<String>,
        /// Email address
        #[arg(short, long)]
        email: Option<String>,
        /// Phone number
        #[arg(short, long)]
        phone: Option<String>,
        /// Postal address
        #[arg(short, long)]
        address: Option<String>,
        /// Enrollment status (active, inactive)
        #[arg(short, long)]
        status: Option<String>,
        /// Use this id instead of allocating the next one
        #[arg(long)]
        id: Option<u32>,
        /// Store email and phone without checking them
        #[arg(long)]
        skip_validation: bool,
    },
    /// Update fields of an existing student
    Update {
        /// Student ID
        id: StudentId,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        /// Gender (male, female, or empty to clear)
        #[arg(short, long)]
        gender: Option<String>,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: Option<String>,
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        phone: Option<String>,
        #[arg(short, long)]
        address: Option<String>,
        /// Enrollment status (active, inactive)
        #[arg(short, long)]
        status: Option<String>,
        /// Set any column by name, e.g. --set "Last Name=Byron"
        #[arg(long = "set", value_name = "COLUMN=VALUE")]
        assignments: Vec<String>,
        /// Store email and phone without checking them
        #[arg(long)]
        skip_validation: bool,
    },
    /// Delete a student
    Delete {
        /// Student ID
        id: StudentId,
    },
    /// List all students
    List,
    /// Show student details
    Show {
        /// Student ID
        id: StudentId,
    },
    /// Search students by substring, ignoring case
    Search {
        /// Text to look for
        term: String,
        /// Restrict the search to one column (e.g. email, "Last Name")
        #[arg(short, long)]
        column: Option<String>,
    },
    /// Write all students to a file
    Export {
        /// Destination path
        path: PathBuf,
    },
    /// Replace all students with the contents of a file
    Import {
        /// Source path
        path: PathBuf,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
    /// Check contact details
    ///
    /// With no arguments, checks every stored student.
    Validate {
        #[arg(short, long)]
        email: Option<String>,
        #[arg(short, long)]
        phone: Option<String>,
    },
}

/// Handle a student command
pub fn handle_student_command(
    storage: &mut Storage,
    settings: &Settings,
    cmd: StudentCommands,
) -> RosterResult<()> {
    let date_format = settings.date_format.as_str();

    match cmd {
        StudentCommands::Add {
            first_name,
            last_name,
            dob,
            gender,
            email,
            phone,
            address,
            status,
            id,
            skip_validation,
        } => {
            let mut new = NewStudent::new(first_name, last_name, parse_date(&dob)?)
                .with_email(email.unwrap_or_default())
                .with_phone(phone.unwrap_or_default())
                .with_address(address.unwrap_or_default());
            if let Some(gender) = gender {
                new = new.with_gender(gender.parse()?);
            }
            if let Some(status) = status {
                new = new.with_status(status.parse()?);
            }

            let mut service = StudentService::new(storage)
                .with_contact_validation(settings.validate_contact && !skip_validation);
            let record = service.add(new, id.map(StudentId::new))?;

            println!("Added student: {}", record.full_name());
            println!("  ID: {}", record.student_id);
            println!(
                "  Enrolled: {}",
                format_date(record.enrollment_date, date_format)
            );
        }

        StudentCommands::Update {
            id,
            first_name,
            last_name,
            gender,
            dob,
            email,
            phone,
            address,
            status,
            assignments,
            skip_validation,
        } => {
            let mut update = StudentUpdate::new();
            let named = [
                (Column::FirstName, first_name),
                (Column::LastName, last_name),
                (Column::Gender, gender),
                (Column::DateOfBirth, dob),
                (Column::Email, email),
                (Column::Phone, phone),
                (Column::Address, address),
                (Column::Status, status),
            ];
            for (column, value) in named {
                if let Some(value) = value {
                    update.set(column, &value)?;
                }
            }
            for assignment in &assignments {
                let (column, value) = parse_assignment(assignment)?;
                update.set(column.parse()?, value)?;
            }

            if update.is_empty() {
                println!("No changes specified. Use --set COLUMN=VALUE or a field flag.");
                return Ok(());
            }

            let mut service = StudentService::new(storage)
                .with_contact_validation(settings.validate_contact && !skip_validation);
            let record = service.update(id, &update)?;

            println!("Updated student: {}", record);
        }

        StudentCommands::Delete { id } => {
            let mut service = StudentService::new(storage);
            match service.delete(id)? {
                Some(record) => println!("Deleted student: {}", record),
                None => println!("No student with ID {}", id),
            }
        }

        StudentCommands::List => {
            let service = StudentService::new(storage);
            print!("{}", format_student_list(&service.list(), date_format));
        }

        StudentCommands::Show { id } => {
            let service = StudentService::new(storage);
            let record = service.find(id)?;
            print!("{}", format_student_details(&record, date_format));
        }

        StudentCommands::Search { term, column } => {
            let column: Option<Column> = column.as_deref().map(str::parse::<Column>).transpose()?;
            let service = StudentService::new(storage);
            print!(
                "{}",
                format_student_list(&service.search(&term, column), date_format)
            );
        }

        StudentCommands::Export { path } => {
            let service = StudentService::new(storage);
            service.export(&path)?;
            println!(
                "Exported {} student(s) to {}",
                service.list().len(),
                path.display()
            );
        }

        StudentCommands::Import { path, force } => {
            if !force {
                println!("WARNING: This will replace ALL current students!");
                println!("To proceed, run again with --force flag:");
                println!("  roster import {} --force", path.display());
                return Ok(());
            }

            let mut service = StudentService::new(storage);
            let result = service.import(&path)?;
            println!("{}", result.summary());
        }

        StudentCommands::Validate { email, phone } => {
            if email.is_none() && phone.is_none() {
                return validate_stored(storage);
            }

            let mut failures = Vec::new();
            if let Some(email) = email {
                if validate_email(&email) {
                    println!("Email '{}' is valid", email);
                } else {
                    failures.push(format!("email '{}'", email));
                }
            }
            if let Some(phone) = phone {
                if validate_phone(&phone) {
                    println!("Phone '{}' is valid", phone);
                } else {
                    failures.push(format!("phone '{}'", phone));
                }
            }

            if !failures.is_empty() {
                return Err(RosterError::Validation(format!(
                    "Invalid {}",
                    failures.join(", ")
                )));
            }
        }
    }

    Ok(())
}

/// Check every stored student's contact details
fn validate_stored(storage: &mut Storage) -> RosterResult<()> {
    let service = StudentService::new(storage);
    let invalid = service.invalid_contacts();

    if invalid.is_empty() {
        println!("All {} student(s) have valid contact details.", service.list().len());
        return Ok(());
    }

    for (record, reason) in &invalid {
        println!("  {}: {}", record, reason);
    }
    Err(RosterError::Validation(format!(
        "{} student(s) have invalid contact details",
        invalid.len()
    )))
}

/// Split `COLUMN=VALUE`; the value may itself contain `=`
fn parse_assignment(assignment: &str) -> RosterResult<(&str, &str)> {
    assignment.split_once('=').ok_or_else(|| {
        RosterError::Validation(format!(
            "Invalid assignment '{}' (expected COLUMN=VALUE)",
            assignment
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_assignment() {
        assert_eq!(parse_assignment("email=a@b.com").unwrap(), ("email", "a@b.com"));
        assert_eq!(parse_assignment("address=a=b").unwrap(), ("address", "a=b"));
        assert_eq!(parse_assignment("gender=").unwrap(), ("gender", ""));
        assert!(parse_assignment("email").unwrap_err().is_validation());
    }
}
