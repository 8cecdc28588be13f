//! Service layer for Roster
//!
//! The service layer provides business logic on top of the storage layer,
//! handling validation and audit logging.

pub mod student;

pub use student::StudentService;
