use crate::error::{Result, ShipaiError};
use std::path::{Path, PathBuf};
use std::process::Command;

/// The project whose assistant config files are edited.
#[derive(Debug, Clone)]
pub struct Project {
    root: PathBuf,
}

impl Project {
    /// Detect the current project
    pub fn detect() -> Result<Self> {
        Ok(Self {
            root: Self::get_project_root()?,
        })
    }

    /// Use an explicit directory as the project root
    pub fn at(path: &Path) -> Result<Self> {
        if !path.is_dir() {
            return Err(ShipaiError::ProjectDetection(format!(
                "Not a directory: {}",
                path.display()
            )));
        }
        let root = path.canonicalize().map_err(|e| {
            ShipaiError::ProjectDetection(format!("Failed to resolve {}: {}", path.display(), e))
        })?;
        Ok(Self { root })
    }

    /// Explicit directory when given, detection otherwise
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::at(path),
            None => Self::detect(),
        }
    }

    /// Get the project root directory
    /// Priority: git worktree/repo root (via --show-toplevel), then current directory
    fn get_project_root() -> Result<PathBuf> {
        if let Ok(output) = Command::new("git")
            .args(["rev-parse", "--show-toplevel"])
            .output()
        {
            if output.status.success() {
                let root = String::from_utf8_lossy(&output.stdout).trim().to_string();
                let root_path = PathBuf::from(root);

                // Canonicalize to resolve any .. or symlinks
                if let Ok(canonical) = root_path.canonicalize() {
                    return Ok(canonical);
                }
            }
        }

        // Fallback to current directory
        std::env::current_dir().map_err(|e| {
            ShipaiError::ProjectDetection(format!("Failed to get current directory: {}", e))
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_at_existing_directory() {
        let dir = TempDir::new().unwrap();
        let project = Project::at(dir.path()).unwrap();
        assert_eq!(project.root(), dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_at_missing_directory() {
        let dir = TempDir::new().unwrap();
        let err = Project::at(&dir.path().join("missing")).unwrap_err();
        assert!(matches!(err, ShipaiError::ProjectDetection(_)));
    }

    #[test]
    fn test_resolve_prefers_explicit_path() {
        let dir = TempDir::new().unwrap();
        let project = Project::resolve(Some(dir.path())).unwrap();
        assert_eq!(project.root(), dir.path().canonicalize().unwrap());
    }

    #[test]
    fn test_detect_returns_absolute_root() {
        let project = Project::detect().unwrap();
        assert!(project.root().is_absolute());
    }
}
