//! Installed agents, reconstructed from the config file itself.

use super::block;
use crate::error::{Result, ShipaiError};
use chrono::NaiveDate;
use serde::Serialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstalledAgentInfo {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub version: String,
    pub installed_at: NaiveDate,
}

impl From<block::ScannedBlock> for InstalledAgentInfo {
    fn from(scanned: block::ScannedBlock) -> Self {
        Self {
            id: scanned.id,
            name: scanned.name,
            category: scanned.category,
            version: scanned.version,
            installed_at: scanned.installed_on,
        }
    }
}

/// Agents installed in the file at `config_path`, in file order.
///
/// A missing file means nothing is installed and yields an empty list.
pub fn list_installed(config_path: &Path) -> Result<Vec<InstalledAgentInfo>> {
    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(ShipaiError::file("read", config_path, e)),
    };

    Ok(list_in(&content))
}

pub fn list_in(content: &str) -> Vec<InstalledAgentInfo> {
    block::scan(content).into_iter().map(Into::into).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        let installed = list_installed(&dir.path().join("CLAUDE.md")).unwrap();
        assert!(installed.is_empty());
    }

    #[test]
    fn test_reads_current_disk_state() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("CLAUDE.md");

        fs::write(&path, "<!-- Agent: a -->\n# Alpha\n<!-- End Agent: a -->\n").unwrap();
        assert_eq!(list_installed(&path).unwrap()[0].name, "Alpha");

        fs::write(&path, "nothing here\n").unwrap();
        assert!(list_installed(&path).unwrap().is_empty());
    }

    #[test]
    fn test_unreadable_path_is_an_error() {
        let dir = TempDir::new().unwrap();
        // A directory cannot be read as a file
        let err = list_installed(dir.path()).unwrap_err();
        assert!(err.is_io());
    }
}
