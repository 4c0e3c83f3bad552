//! Timestamped copies of a config file taken before it is mutated.
//!
//! Backups sit next to the original as `<path>.backup.<epoch-millis>` and
//! are never deleted here; pruning is the `backups prune` command's job.

use crate::error::{Result, ShipaiError};
use chrono::{DateTime, TimeZone, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const BACKUP_INFIX: &str = ".backup.";

/// A backup file found on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFile {
    pub path: PathBuf,
    pub timestamp_millis: i64,
}

impl BackupFile {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp_millis).single()
    }
}

/// Copy `path` byte-for-byte to `<path>.backup.<millis>` and return the copy's path.
pub fn backup(path: &Path) -> Result<PathBuf> {
    if !path.is_file() {
        return Err(ShipaiError::file(
            "back up",
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "source file does not exist"),
        ));
    }

    let mut millis = Utc::now().timestamp_millis();
    let mut target = backup_path(path, millis);
    // Two backups inside one millisecond must not share a name
    while target.exists() {
        millis += 1;
        target = backup_path(path, millis);
    }

    fs::copy(path, &target).map_err(|e| ShipaiError::file("back up", path, e))?;
    debug!(source = %path.display(), backup = %target.display(), "created backup");
    Ok(target)
}

pub fn backup_path(path: &Path, millis: i64) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(format!("{}{}", BACKUP_INFIX, millis));
    PathBuf::from(name)
}

/// List backups of `path`, oldest first.
pub fn list_backups(path: &Path) -> Result<Vec<BackupFile>> {
    let (Some(dir), Some(file_name)) = (path.parent(), path.file_name()) else {
        return Ok(Vec::new());
    };
    let prefix = format!("{}{}", file_name.to_string_lossy(), BACKUP_INFIX);

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(ShipaiError::file("read directory", dir, e)),
    };

    let mut backups = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| ShipaiError::file("read directory", dir, e))?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        let Some(stamp) = name.strip_prefix(&prefix) else {
            continue;
        };
        if let Ok(timestamp_millis) = stamp.parse::<i64>() {
            backups.push(BackupFile {
                path: entry.path(),
                timestamp_millis,
            });
        }
    }

    backups.sort_by_key(|b| b.timestamp_millis);
    Ok(backups)
}

/// Delete backups of `path` created before `cutoff`. Returns the deleted files.
pub fn prune_backups(path: &Path, cutoff: DateTime<Utc>) -> Result<Vec<BackupFile>> {
    let cutoff_millis = cutoff.timestamp_millis();
    let mut removed = Vec::new();

    for backup in list_backups(path)? {
        if backup.timestamp_millis >= cutoff_millis {
            continue;
        }
        fs::remove_file(&backup.path).map_err(|e| ShipaiError::file("remove", &backup.path, e))?;
        debug!(backup = %backup.path.display(), "pruned backup");
        removed.push(backup);
    }

    Ok(removed)
}
