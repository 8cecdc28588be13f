//! Student display formatting
//!
//! Formats students for terminal output in table and detail views.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::models::{StudentRecord, DATE_FORMAT};

fn width_of<F>(records: &[StudentRecord], header: &str, field: F) -> usize
where
    F: Fn(&StudentRecord) -> String,
{
    records
        .iter()
        .map(|r| field(r).chars().count())
        .max()
        .unwrap_or(0)
        .max(header.chars().count())
}

/// Render a date with a user-chosen format, falling back to ISO dates when
/// the format can't be rendered
pub fn format_date(date: NaiveDate, date_format: &str) -> String {
    let mut text = String::new();
    match write!(text, "{}", date.format(date_format)) {
        Ok(()) => text,
        Err(_) => date.format(DATE_FORMAT).to_string(),
    }
}

/// Addresses may span lines; tables show them on one
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Format a list of students as a table
pub fn format_student_list(records: &[StudentRecord], date_format: &str) -> String {
    if records.is_empty() {
        return "No students found.".to_string();
    }

    let id_width = width_of(records, "ID", |r| r.student_id.to_string());
    let name_width = width_of(records, "Name", |r| r.full_name());
    let dob_width = width_of(records, "Born", |r| format_date(r.date_of_birth, date_format));
    let email_width = width_of(records, "Email", |r| r.email.clone());
    let phone_width = width_of(records, "Phone", |r| r.phone.clone());

    let mut output = String::new();
    output.push_str(&format!(
        "{:>id_width$}  {:<name_width$}  {:<dob_width$}  {:<email_width$}  {:<phone_width$}  {}\n",
        "ID", "Name", "Born", "Email", "Phone", "Status",
    ));

    output.push_str(&format!(
        "{:->id_width$}  {:-<name_width$}  {:-<dob_width$}  {:-<email_width$}  {:-<phone_width$}  {:-<8}\n",
        "", "", "", "", "", "",
    ));

    for record in records {
        output.push_str(&format!(
            "{:>id_width$}  {:<name_width$}  {:<dob_width$}  {:<email_width$}  {:<phone_width$}  {}\n",
            record.student_id.to_string(),
            record.full_name(),
            format_date(record.date_of_birth, date_format),
            record.email,
            record.phone,
            record.status,
        ));
    }

    output.push_str(&format!("\n{} student(s)\n", records.len()));
    output
}

/// Format a single student's details
pub fn format_student_details(record: &StudentRecord, date_format: &str) -> String {
    let or_dash = |value: &str| {
        if value.is_empty() {
            "-".to_string()
        } else {
            value.to_string()
        }
    };

    let mut output = String::new();

    output.push_str(&format!("Student: {}\n", record.full_name()));
    output.push_str(&format!("  ID:             {}\n", record.student_id));
    output.push_str(&format!(
        "  Gender:         {}\n",
        record
            .gender
            .map(|g| g.to_string())
            .unwrap_or_else(|| "-".to_string())
    ));
    output.push_str(&format!(
        "  Date of Birth:  {}\n",
        format_date(record.date_of_birth, date_format)
    ));
    output.push_str(&format!("  Status:         {}\n", record.status));
    output.push_str(&format!(
        "  Enrolled:       {}\n",
        format_date(record.enrollment_date, date_format)
    ));
    output.push('\n');
    output.push_str(&format!("  Email:          {}\n", or_dash(&record.email)));
    output.push_str(&format!("  Phone:          {}\n", or_dash(&record.phone)));
    output.push_str(&format!(
        "  Address:        {}\n",
        or_dash(&single_line(&record.address))
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Gender, NewStudent, StudentId};
    use chrono::NaiveDate;

    fn ada() -> StudentRecord {
        StudentRecord::from_new(
            StudentId::new(12),
            NewStudent::new("Ada", "Lovelace", NaiveDate::from_ymd_opt(1815, 12, 10).unwrap())
                .with_gender(Gender::Female)
                .with_email("ada@example.com")
                .with_address("12 St James's Square\nLondon"),
            NaiveDate::from_ymd_opt(2024, 9, 1).unwrap(),
        )
    }

    #[test]
    fn test_empty_list() {
        assert_eq!(format_student_list(&[], "%Y-%m-%d"), "No students found.");
    }

    #[test]
    fn test_list_table() {
        let output = format_student_list(&[ada()], "%Y-%m-%d");
        let lines: Vec<&str> = output.lines().collect();

        assert!(lines[0].starts_with("ID  Name"));
        assert!(lines[1].starts_with("--  ----"));
        assert!(lines[2].starts_with("12  Ada Lovelace  1815-12-10  ada@example.com"));
        assert!(lines[2].ends_with("Active"));
        assert!(output.ends_with("1 student(s)\n"));
    }

    #[test]
    fn test_unrenderable_date_format_falls_back() {
        let list = format_student_list(&[ada()], "%Q");
        assert!(list.contains("1815-12-10"));

        let details = format_student_details(&ada(), "%Q");
        assert!(details.contains("Date of Birth:  1815-12-10"));
        assert!(details.contains("Enrolled:       2024-09-01"));
    }

    #[test]
    fn test_details_use_date_format() {
        let output = format_student_details(&ada(), "%d/%m/%Y");

        assert!(output.contains("Student: Ada Lovelace"));
        assert!(output.contains("Date of Birth:  10/12/1815"));
        assert!(output.contains("Enrolled:       01/09/2024"));
        assert!(output.contains("Gender:         Female"));
        assert!(output.contains("Phone:          -"));
        assert!(output.contains("Address:        12 St James's Square London"));
    }
}
