//! Backup manager for Roster
//!
//! Writes snapshots of the roster to arbitrary paths, and keeps rolling
//! timestamped backups in the backup directory under a retention count.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use tracing::{debug, info};

use crate::config::settings::BackupRetention;
use crate::error::{RosterError, RosterResult};
use crate::storage::{write_records_atomic, StudentStore};

/// Metadata about a managed backup
#[derive(Debug, Clone)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// When the backup was created
    pub created_at: DateTime<Utc>,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Write the full roster to `path`
///
/// The primary file and the in-memory collection are untouched.
pub fn backup(store: &StudentStore, path: &Path) -> RosterResult<()> {
    write_records_atomic(path, store.records()).map_err(|e| match e {
        RosterError::Io(msg) => RosterError::Io(format!(
            "Failed to write backup {}: {}",
            path.display(),
            msg
        )),
        other => other,
    })?;
    info!(path = %path.display(), count = store.len(), "backup written");
    Ok(())
}

/// Manages timestamped backups in the backup directory
pub struct BackupManager {
    backup_dir: PathBuf,
    retention: BackupRetention,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(backup_dir: PathBuf, retention: BackupRetention) -> Self {
        Self {
            backup_dir,
            retention,
        }
    }

    /// Create a timestamped backup of the roster
    ///
    /// Returns the path to the created backup file.
    pub fn create_backup(&self, store: &StudentStore) -> RosterResult<PathBuf> {
        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            RosterError::Io(format!("Failed to create backup directory: {}", e))
        })?;

        let now = Utc::now();
        let filename = format!(
            "backup-{}-{:03}.csv",
            now.format("%Y%m%d-%H%M%S"),
            now.timestamp_subsec_millis()
        );
        let backup_path = self.backup_dir.join(filename);

        backup(store, &backup_path)?;
        Ok(backup_path)
    }

    /// List all managed backups, newest first
    pub fn list_backups(&self) -> RosterResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir).map_err(|e| {
            RosterError::Io(format!("Failed to read backup directory: {}", e))
        })? {
            let entry = entry.map_err(|e| {
                RosterError::Io(format!("Failed to read directory entry: {}", e))
            })?;

            if let Some(info) = parse_backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        Ok(backups)
    }

    /// Delete the oldest backups beyond the retention count
    pub fn enforce_retention(&self) -> RosterResult<Vec<PathBuf>> {
        let mut deleted = Vec::new();

        for backup in self
            .list_backups()?
            .into_iter()
            .skip(self.retention.keep as usize)
        {
            fs::remove_file(&backup.path)
                .map_err(|e| RosterError::Io(format!("Failed to delete old backup: {}", e)))?;
            debug!(path = %backup.path.display(), "pruned backup");
            deleted.push(backup.path);
        }

        Ok(deleted)
    }

    /// Create a backup and then enforce retention policy
    pub fn create_backup_with_retention(
        &self,
        store: &StudentStore,
    ) -> RosterResult<(PathBuf, Vec<PathBuf>)> {
        let backup_path = self.create_backup(store)?;
        let deleted = self.enforce_retention()?;
        Ok((backup_path, deleted))
    }

    /// Get backup directory path
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Get the retention policy
    pub fn retention(&self) -> &BackupRetention {
        &self.retention
    }

    /// Get a specific backup by filename
    pub fn get_backup(&self, filename: &str) -> Option<BackupInfo> {
        parse_backup_info(&self.backup_dir.join(filename))
    }

    /// Get the most recent backup
    pub fn get_latest_backup(&self) -> RosterResult<Option<BackupInfo>> {
        Ok(self.list_backups()?.into_iter().next())
    }
}

/// Parse backup info from a managed backup file name
fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_string_lossy().to_string();
    let stamp = filename.strip_prefix("backup-")?.strip_suffix(".csv")?;
    let created_at = parse_backup_timestamp(stamp)?;
    let size_bytes = fs::metadata(path).ok()?.len();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        created_at,
        size_bytes,
    })
}

/// Parse `YYYYMMDD-HHMMSS-mmm` from a backup file name
fn parse_backup_timestamp(stamp: &str) -> Option<DateTime<Utc>> {
    let mut parts = stamp.split('-');
    let date_part = parts.next()?;
    let time_part = parts.next()?;
    let millis: u32 = parts.next()?.parse().ok()?;
    if parts.next().is_some() || date_part.len() != 8 || time_part.len() != 6 {
        return None;
    }

    let date = NaiveDate::from_ymd_opt(
        date_part[0..4].parse().ok()?,
        date_part[4..6].parse().ok()?,
        date_part[6..8].parse().ok()?,
    )?;
    let time = NaiveTime::from_hms_milli_opt(
        time_part[0..2].parse().ok()?,
        time_part[2..4].parse().ok()?,
        time_part[4..6].parse().ok()?,
        millis,
    )?;

    Some(DateTime::from_naive_utc_and_offset(
        NaiveDateTime::new(date, time),
        Utc,
    ))
}
