use crate::cli::BackupCommands;
use crate::config::Config;
use crate::editor::backup::{list_backups, prune_backups, BackupFile};
use crate::editor::locate_existing;
use crate::error::Result;
use crate::project::Project;
use chrono::{DateTime, Duration, Utc};
use std::path::Path;

pub fn execute(project: &Project, config: &Config, command: &BackupCommands) -> Result<()> {
    let config_file = locate_existing(config.default_assistant, project.root())?;
    match command {
        BackupCommands::List => list(&config_file.path),
        BackupCommands::Prune {
            older_than_days,
            dry_run,
        } => {
            let days = older_than_days.unwrap_or(config.backup_retention_days);
            prune(&config_file.path, cutoff(Utc::now(), days), *dry_run)
        }
    }
}

/// Backups created before the returned instant are outside the retention window.
pub fn cutoff(now: DateTime<Utc>, days: u32) -> DateTime<Utc> {
    now - Duration::days(i64::from(days))
}

fn list(config_path: &Path) -> Result<()> {
    let backups = list_backups(config_path)?;
    if backups.is_empty() {
        println!("No backups of {}.", config_path.display());
        return Ok(());
    }

    println!("{:<60} {:>20}", "BACKUP", "CREATED");
    println!("{}", "-".repeat(81));
    for backup in &backups {
        println!("{:<60} {:>20}", backup.path.display(), created(backup));
    }
    Ok(())
}

fn prune(config_path: &Path, cutoff: DateTime<Utc>, dry_run: bool) -> Result<()> {
    let removed: Vec<BackupFile> = if dry_run {
        list_backups(config_path)?
            .into_iter()
            .filter(|b| b.timestamp_millis < cutoff.timestamp_millis())
            .collect()
    } else {
        prune_backups(config_path, cutoff)?
    };

    if removed.is_empty() {
        println!("No backups older than {}.", cutoff.format("%Y-%m-%d"));
        return Ok(());
    }

    let verb = if dry_run { "Would delete" } else { "Deleted" };
    for backup in &removed {
        println!("  {} {}", verb, backup.path.display());
    }
    println!("{} {} backup(s)", verb, removed.len());
    Ok(())
}

fn created(backup: &BackupFile) -> String {
    backup
        .created_at()
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::backup::backup_path;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cutoff() {
        let now = Utc::now();
        assert_eq!(now - cutoff(now, 30), Duration::days(30));
    }

    #[test]
    fn test_prune_dry_run_keeps_files() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("CLAUDE.md");
        fs::write(&config_path, "# Project\n").unwrap();

        let old = backup_path(&config_path, 1_000);
        fs::write(&old, "old").unwrap();

        prune(&config_path, Utc::now(), true).unwrap();
        assert!(old.exists());

        prune(&config_path, Utc::now(), false).unwrap();
        assert!(!old.exists());
    }
}
