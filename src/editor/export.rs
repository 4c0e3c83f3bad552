//! Whole-file snapshots moved between projects by `export` and `import`.
//!
//! ```json
//! {
//!   "exportedAt": "2026-10-19T08:00:00Z",
//!   "version": "1.0.0",
//!   "configType": "claude-code",
//!   "content": "# Claude Code Configuration\n...",
//!   "sourcePath": "/work/app/CLAUDE.md"
//! }
//! ```

use super::assistant::AssistantType;
use super::locator::ConfigFile;
use crate::error::{Result, ShipaiError};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Format version written into new exports.
pub const EXPORT_FORMAT_VERSION: &str = "1.0.0";

pub const DEFAULT_EXPORT_FILE: &str = "agent-config-export.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigExport {
    pub exported_at: DateTime<Utc>,
    pub version: String,
    pub config_type: AssistantType,
    pub content: String,
    pub source_path: PathBuf,
}

impl ConfigExport {
    /// Snapshot the current content of `config_file`.
    pub fn capture(config_file: &ConfigFile) -> Result<Self> {
        let content = fs::read_to_string(&config_file.path)
            .map_err(|e| ShipaiError::file("read", &config_file.path, e))?;
        Ok(Self {
            exported_at: Utc::now(),
            version: EXPORT_FORMAT_VERSION.to_string(),
            config_type: config_file.assistant,
            content,
            source_path: config_file.path.clone(),
        })
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json + "\n").map_err(|e| ShipaiError::file("write", path, e))
    }

    /// Read and validate an export file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path).map_err(|e| ShipaiError::file("read", path, e))?;
        let export: Self = serde_json::from_str(&json)
            .map_err(|e| ShipaiError::InvalidExport(format!("{}: {}", path.display(), e)))?;
        export.validate()?;
        Ok(export)
    }

    fn validate(&self) -> Result<()> {
        let version = semver::Version::parse(&self.version).map_err(|_| {
            ShipaiError::InvalidExport(format!("version '{}' is not valid semver", self.version))
        })?;
        let supported = semver::Version::parse(EXPORT_FORMAT_VERSION)
            .map_err(|e| ShipaiError::InvalidExport(e.to_string()))?;
        if version.major != supported.major {
            return Err(ShipaiError::InvalidExport(format!(
                "format version {} is not supported (expected {}.x)",
                self.version, supported.major
            )));
        }
        if self.content.trim().is_empty() {
            return Err(ShipaiError::InvalidExport("content is empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn claude_file(dir: &TempDir, content: &str) -> ConfigFile {
        let path = dir.path().join("CLAUDE.md");
        fs::write(&path, content).unwrap();
        ConfigFile {
            path,
            assistant: AssistantType::ClaudeCode,
            exists: true,
        }
    }

    #[test]
    fn test_capture_save_load() {
        let dir = TempDir::new().unwrap();
        let file = claude_file(&dir, "# Rules\n");
        let export = ConfigExport::capture(&file).unwrap();
        assert_eq!(export.content, "# Rules\n");
        assert_eq!(export.config_type, AssistantType::ClaudeCode);

        let out = dir.path().join(DEFAULT_EXPORT_FILE);
        export.save(&out).unwrap();
        let json = fs::read_to_string(&out).unwrap();
        assert!(json.contains("\"configType\": \"claude-code\""));
        assert!(json.contains("\"exportedAt\""));
        assert!(json.contains("\"sourcePath\""));

        assert_eq!(ConfigExport::load(&out).unwrap(), export);
    }

    #[test]
    fn test_capture_missing_file_fails() {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile {
            path: dir.path().join("CLAUDE.md"),
            assistant: AssistantType::ClaudeCode,
            exists: false,
        };
        assert!(ConfigExport::capture(&file).unwrap_err().is_io());
    }

    #[test]
    fn test_load_rejects_bad_exports() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("export.json");

        fs::write(&path, "{\"content\": \"x\"}").unwrap();
        assert!(matches!(
            ConfigExport::load(&path),
            Err(ShipaiError::InvalidExport(_))
        ));

        let empty = r#"{"exportedAt":"2026-01-01T00:00:00Z","version":"1.0.0","configType":"cursor","content":"  ","sourcePath":"x"}"#;
        fs::write(&path, empty).unwrap();
        assert!(matches!(
            ConfigExport::load(&path),
            Err(ShipaiError::InvalidExport(_))
        ));

        let future = r#"{"exportedAt":"2026-01-01T00:00:00Z","version":"2.0.0","configType":"cursor","content":"x","sourcePath":"x"}"#;
        fs::write(&path, future).unwrap();
        assert!(matches!(
            ConfigExport::load(&path),
            Err(ShipaiError::InvalidExport(_))
        ));
    }
}
