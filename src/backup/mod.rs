//! Backup system for Roster
//!
//! Provides wholesale snapshot and replace of the roster, plus rolling
//! backups with a retention count.
//!
//! # Architecture
//!
//! - `backup` / `restore`: write the roster to any path, or replace the
//!   roster with the contents of one. A restore never merges.
//! - `BackupManager`: timestamped backups in the backup directory
//!   (`backup-YYYYMMDD-HHMMSS-mmm.csv`), listed newest first and pruned to
//!   the configured count.
//!
//! Backups use the same CSV format as the primary students file, so any
//! backup can also be opened directly as a roster.
//!
//! # Example
//!
//! ```rust,ignore
//! use roster::backup::{backup, restore, BackupManager};
//!
//! backup(&storage.students, Path::new("roster-2025.csv"))?;
//!
//! let manager = BackupManager::new(paths.backup_dir(), settings.backup_retention.clone());
//! let (path, _pruned) = manager.create_backup_with_retention(&storage.students)?;
//!
//! let result = restore(&mut storage.students, &path)?;
//! println!("{}", result.summary());
//! ```

mod manager;
mod restore;

pub use manager::{backup, BackupInfo, BackupManager};
pub use restore::{restore, validate_backup, RestoreResult, ValidationResult};
