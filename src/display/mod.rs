//! Display formatting for terminal output
//!
//! Provides utilities for formatting students as tables and detail views.

pub mod student;

pub use student::{format_date, format_student_details, format_student_list};
