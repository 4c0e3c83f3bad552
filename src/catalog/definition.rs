//! Data structures for parsing the agent catalog TOML.

use crate::editor::AssistantType;
use serde::{Deserialize, Serialize};

/// A prompt template that can be installed into a config file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentDefinition {
    /// Stable slug; the key used to find the agent's block.
    pub id: String,
    pub name: String,
    /// Category slug
    pub category: String,
    pub description: String,

    #[serde(default)]
    pub key_features: Vec<String>,

    #[serde(default)]
    pub use_cases: Vec<String>,

    pub prompt: String,

    #[serde(default)]
    pub supported_assistants: Vec<AssistantType>,

    #[serde(default)]
    pub featured: bool,

    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    crate::editor::block::DEFAULT_VERSION.to_string()
}

impl AgentDefinition {
    /// Case-insensitive match against name, description, features and use cases.
    pub fn matches(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.name.to_lowercase().contains(&query)
            || self.description.to_lowercase().contains(&query)
            || self
                .key_features
                .iter()
                .any(|f| f.to_lowercase().contains(&query))
            || self
                .use_cases
                .iter()
                .any(|u| u.to_lowercase().contains(&query))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Top-level shape of `catalog/agents.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogFile {
    #[serde(default)]
    pub categories: Vec<Category>,

    #[serde(default)]
    pub agents: Vec<AgentDefinition>,
}
