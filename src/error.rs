use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShipaiError {
    #[error("Unknown assistant type: {0}. Supported: claude-code, cursor, windsurf, codeium, continue")]
    UnknownAssistant(String),

    #[error("Agent not found in catalog: {0}")]
    AgentNotFound(String),

    #[error("Failed to {action} {path}: {source}")]
    FileAccess {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Config serialize error: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Project detection failed: {0}")]
    ProjectDetection(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Invalid export file: {0}")]
    InvalidExport(String),
}

impl ShipaiError {
    pub(crate) fn file(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ShipaiError::FileAccess {
            action,
            path: path.into(),
            source,
        }
    }

    /// True for errors raised at the filesystem boundary.
    pub fn is_io(&self) -> bool {
        matches!(self, ShipaiError::FileAccess { .. } | ShipaiError::Io(_))
    }
}

pub type Result<T> = std::result::Result<T, ShipaiError>;
