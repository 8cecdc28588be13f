//! Core data models for Roster
//!
//! This module contains the data structures that represent the roster
//! domain: student records, their identifiers and schema columns, and the
//! add/update requests.

pub mod column;
pub mod ids;
pub mod student;

pub use column::Column;
pub use ids::StudentId;
pub use student::{
    parse_date, Gender, NewStudent, StudentRecord, StudentStatus, StudentUpdate, DATE_FORMAT,
};
