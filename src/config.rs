use crate::editor::AssistantType;
use crate::error::{Result, ShipaiError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".shipai.toml";

/// Effective user preferences, passed explicitly to every command.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Config {
    pub default_assistant: AssistantType,
    pub auto_backup: bool,
    pub backup_retention_days: u32,
    pub default_category: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_assistant: AssistantType::PRIMARY,
            auto_backup: true,
            backup_retention_days: default_retention_days(),
            default_category: None,
        }
    }
}

fn default_retention_days() -> u32 {
    30
}

/// One source of settings. Unset fields leave lower layers alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_assistant: Option<AssistantType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_backup: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_retention_days: Option<u32>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_category: Option<String>,
}

/// Keys accepted by `config set`.
pub const SETTABLE_KEYS: &[&str] = &[
    "default_assistant",
    "auto_backup",
    "backup_retention_days",
    "default_category",
];

impl ConfigLayer {
    /// Set one key from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "default_assistant" => self.default_assistant = Some(value.parse()?),
            "auto_backup" => self.auto_backup = Some(parse_bool(key, value)?),
            "backup_retention_days" => {
                let days: u32 = value.parse().map_err(|_| {
                    ShipaiError::InvalidConfig(format!(
                        "backup_retention_days must be a whole number of days, got '{}'",
                        value
                    ))
                })?;
                if days == 0 {
                    return Err(ShipaiError::InvalidConfig(
                        "backup_retention_days must be at least 1".to_string(),
                    ));
                }
                self.backup_retention_days = Some(days);
            }
            "default_category" => {
                self.default_category = (!value.is_empty()).then(|| value.to_string())
            }
            _ => {
                return Err(ShipaiError::InvalidConfig(format!(
                    "Unknown config key '{}'. Valid keys: {}",
                    key,
                    SETTABLE_KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ShipaiError::InvalidConfig(format!(
            "{} must be true or false, got '{}'",
            key, value
        ))),
    }
}

/// Where a settings layer is persisted.
pub trait ConfigStore {
    /// Load the layer; a store with nothing saved yields an empty layer.
    fn load(&self) -> Result<ConfigLayer>;

    fn save(&self, layer: &ConfigLayer) -> Result<()>;

    fn location(&self) -> String;
}

/// A TOML file on disk.
#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.shipai.toml`
    pub fn global() -> Option<Self> {
        home_dir().map(|home| Self::new(home.join(CONFIG_FILE_NAME)))
    }

    /// `<project>/.shipai.toml`
    pub fn project(project_root: &Path) -> Self {
        Self::new(project_root.join(CONFIG_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ConfigStore for FileConfigStore {
    fn load(&self) -> Result<ConfigLayer> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(ConfigLayer::default())
            }
            Err(e) => return Err(ShipaiError::file("read", &self.path, e)),
        };
        let layer: ConfigLayer = toml::from_str(&contents)?;
        Ok(layer)
    }

    fn save(&self, layer: &ConfigLayer) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| ShipaiError::file("create directory", parent, e))?;
        }
        let contents = toml::to_string_pretty(layer)?;
        fs::write(&self.path, contents).map_err(|e| ShipaiError::file("write", &self.path, e))
    }

    fn location(&self) -> String {
        self.path.display().to_string()
    }
}

impl Config {
    /// Load configuration with precedence:
    /// 1. CLI flags (applied later via with_cli_overrides)
    /// 2. Environment variables
    /// 3. Project config (.shipai.toml in project root)
    /// 4. Global config (~/.shipai.toml)
    /// 5. Built-in defaults
    pub fn load(project_root: &Path) -> Result<Self> {
        let global = FileConfigStore::global();
        let project = FileConfigStore::project(project_root);

        let mut stores: Vec<&dyn ConfigStore> = Vec::new();
        if let Some(global) = &global {
            stores.push(global);
        }
        stores.push(&project);

        Self::from_stores(stores)?.merge_env()
    }

    /// Fold layers from lowest to highest precedence.
    pub fn from_stores<'a>(stores: impl IntoIterator<Item = &'a dyn ConfigStore>) -> Result<Self> {
        let mut config = Self::default();
        for store in stores {
            let layer = store.load().map_err(|e| match e {
                ShipaiError::ConfigParse(err) => ShipaiError::InvalidConfig(format!(
                    "{}: {}",
                    store.location(),
                    err
                )),
                other => other,
            })?;
            config.apply(layer);
        }
        Ok(config)
    }

    pub fn apply(&mut self, layer: ConfigLayer) {
        if let Some(assistant) = layer.default_assistant {
            self.default_assistant = assistant;
        }
        if let Some(auto_backup) = layer.auto_backup {
            self.auto_backup = auto_backup;
        }
        if let Some(days) = layer.backup_retention_days {
            self.backup_retention_days = days;
        }
        if layer.default_category.is_some() {
            self.default_category = layer.default_category;
        }
    }

    /// Apply environment variable overrides
    fn merge_env(mut self) -> Result<Self> {
        if let Ok(assistant) = std::env::var("SHIPAI_ASSISTANT") {
            self.default_assistant = assistant.parse()?;
        }
        if let Ok(value) = std::env::var("SHIPAI_AUTO_BACKUP") {
            self.auto_backup = parse_bool("SHIPAI_AUTO_BACKUP", &value)?;
        }
        Ok(self)
    }

    /// Apply global CLI flags
    pub fn with_cli_overrides(mut self, assistant: Option<AssistantType>, no_backup: bool) -> Self {
        if let Some(assistant) = assistant {
            self.default_assistant = assistant;
        }
        if no_backup {
            self.auto_backup = false;
        }
        self
    }
}

/// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}
