//! Roster - Terminal-based student roster manager
//!
//! This library provides the core functionality for the Roster application:
//! a small store of student records persisted to a CSV file, with field
//! validation, substring search, backups and an audit trail.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Student record, update request and column definitions
//! - `validation`: Email and phone syntax checks
//! - `search`: Case-insensitive substring search over records
//! - `storage`: CSV file storage layer
//! - `services`: Business logic layer
//! - `audit`: Audit logging system
//! - `backup`: Backup and restore
//! - `display`: Terminal output formatting
//! - `cli`: Command handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use roster::config::paths::RosterPaths;
//! use roster::storage::Storage;
//!
//! let paths = RosterPaths::new()?;
//! let mut storage = Storage::open(paths)?;
//! let students = storage.students.list();
//! ```

pub mod audit;
pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod search;
pub mod services;
pub mod storage;
pub mod validation;

pub use error::{RosterError, RosterResult};
