//! Audit logging system for Roster
//!
//! Records all create, update, delete and restore operations with
//! before/after values in an append-only audit log.
//!
//! # Architecture
//!
//! - `AuditEntry`: a single entry with timestamp, operation, entity
//!   information, and optional before/after values.
//! - `AuditLogger`: appends entries to the audit log file as line-delimited
//!   JSON (JSONL) and reads them back.
//! - `generate_diff`: summarizes changed fields between two record states.
//!
//! # Example
//!
//! ```rust,ignore
//! use roster::audit::{AuditEntry, AuditLogger, EntityType};
//!
//! let logger = AuditLogger::new(audit_log_path);
//! let entry = AuditEntry::create(
//!     EntityType::Student,
//!     record.student_id.to_string(),
//!     Some(record.full_name()),
//!     &record,
//! );
//! logger.log(&entry)?;
//! ```

mod diff;
mod entry;
mod logger;

pub use diff::generate_diff;
pub use entry::{AuditEntry, EntityType, Operation};
pub use logger::AuditLogger;
