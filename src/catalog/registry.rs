//! The bundled agent catalog.

use super::definition::{AgentDefinition, CatalogFile, Category};
use crate::editor::block;
use crate::error::{Result, ShipaiError};
use std::collections::{HashMap, HashSet};

/// Pseudo category that selects every agent.
pub const ALL_CATEGORIES: &str = "all";

/// Read-only catalog of installable agents.
pub struct AgentCatalog {
    agents: Vec<AgentDefinition>,
    index: HashMap<String, usize>,
    categories: Vec<Category>,
}

impl AgentCatalog {
    /// Load the catalog embedded in the binary
    pub fn load() -> Result<Self> {
        Self::from_toml(include_str!("../../catalog/agents.toml"))
    }

    pub fn from_toml(toml_content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(toml_content)
            .map_err(|e| ShipaiError::Catalog(format!("Failed to parse agent catalog: {}", e)))?;
        Self::new(file.agents, file.categories)
    }

    pub fn new(agents: Vec<AgentDefinition>, categories: Vec<Category>) -> Result<Self> {
        let mut index = HashMap::new();
        for (position, agent) in agents.iter().enumerate() {
            validate_agent(agent)?;
            if index.insert(agent.id.clone(), position).is_some() {
                return Err(ShipaiError::Catalog(format!(
                    "Duplicate agent id '{}'",
                    agent.id
                )));
            }
        }

        Ok(Self {
            agents,
            index,
            categories,
        })
    }

    /// Get an agent by ID
    pub fn get(&self, id: &str) -> Option<&AgentDefinition> {
        self.index.get(id).map(|&i| &self.agents[i])
    }

    /// Look up an agent, failing when it is not in the catalog.
    pub fn require(&self, id: &str) -> Result<&AgentDefinition> {
        self.get(id)
            .ok_or_else(|| ShipaiError::AgentNotFound(id.to_string()))
    }

    /// All agents, featured first, then by name.
    pub fn all(&self) -> Vec<&AgentDefinition> {
        let mut agents: Vec<_> = self.agents.iter().collect();
        agents.sort_by(|a, b| {
            b.featured
                .cmp(&a.featured)
                .then_with(|| a.name.cmp(&b.name))
        });
        agents
    }

    pub fn by_category(&self, category: &str) -> Vec<&AgentDefinition> {
        if category == ALL_CATEGORIES {
            return self.all();
        }
        self.all()
            .into_iter()
            .filter(|a| a.category == category)
            .collect()
    }

    pub fn featured(&self) -> Vec<&AgentDefinition> {
        self.all().into_iter().filter(|a| a.featured).collect()
    }

    pub fn search(&self, query: &str, category: Option<&str>) -> Vec<&AgentDefinition> {
        self.by_category(category.unwrap_or(ALL_CATEGORIES))
            .into_iter()
            .filter(|a| a.matches(query))
            .collect()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Display name for a category slug, falling back to the slug.
    pub fn category_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .map(|c| c.name.as_str())
            .unwrap_or(id)
    }
}

/// Validate that an agent definition is complete and installable
fn validate_agent(agent: &AgentDefinition) -> Result<()> {
    if !block::is_valid_id(&agent.id) {
        return Err(ShipaiError::Catalog(format!(
            "Agent id '{}' may only contain letters, digits, '-' and '_'",
            agent.id
        )));
    }
    if agent.name.trim().is_empty() {
        return Err(ShipaiError::Catalog(format!(
            "Agent '{}' name cannot be empty",
            agent.id
        )));
    }
    if agent.prompt.trim().is_empty() {
        return Err(ShipaiError::Catalog(format!(
            "Agent '{}' prompt cannot be empty",
            agent.id
        )));
    }
    if semver::Version::parse(&agent.version).is_err() {
        return Err(ShipaiError::Catalog(format!(
            "Agent '{}' version '{}' is not valid semver",
            agent.id, agent.version
        )));
    }
    Ok(())
}

/// Distinct category slugs used by `agents`, in first-seen order.
pub fn categories_in<'a>(agents: impl IntoIterator<Item = &'a AgentDefinition>) -> Vec<&'a str> {
    let mut seen = HashSet::new();
    agents
        .into_iter()
        .map(|a| a.category.as_str())
        .filter(|c| seen.insert(*c))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
[[categories]]
id = "development"
name = "Development"

[[agents]]
id = "zeta"
name = "Zeta"
category = "development"
description = "Last alphabetically"
prompt = "z"

[[agents]]
id = "alpha"
name = "Alpha"
category = "development"
description = "First alphabetically"
key_features = ["Schema review"]
prompt = "a"

[[agents]]
id = "star"
name = "Star"
category = "debugging"
description = "Featured one"
use_cases = ["Hunting heisenbugs"]
prompt = "s"
featured = true
version = "2.1.0"
"#;

    #[test]
    fn test_load_bundled_catalog() {
        let catalog = AgentCatalog::load().unwrap();
        assert!(catalog.get("safety-guardian").is_some());
        assert!(catalog.get("nonexistent").is_none());
        assert!(!catalog.categories().is_empty());
    }

    #[test]
    fn test_all_sorts_featured_then_name() {
        let catalog = AgentCatalog::from_toml(SAMPLE).unwrap();
        let ids: Vec<&str> = catalog.all().iter().map(|a| a.id.as_str()).collect();
        assert_eq!(ids, vec!["star", "alpha", "zeta"]);
    }

    #[test]
    fn test_default_version() {
        let catalog = AgentCatalog::from_toml(SAMPLE).unwrap();
        assert_eq!(catalog.get("alpha").unwrap().version, "1.0.0");
        assert_eq!(catalog.get("star").unwrap().version, "2.1.0");
    }

    #[test]
    fn test_by_category_and_all() {
        let catalog = AgentCatalog::from_toml(SAMPLE).unwrap();
        assert_eq!(catalog.by_category("development").len(), 2);
        assert_eq!(catalog.by_category(ALL_CATEGORIES).len(), 3);
        assert!(catalog.by_category("missing").is_empty());
    }

    #[test]
    fn test_search_fields() {
        let catalog = AgentCatalog::from_toml(SAMPLE).unwrap();
        assert_eq!(catalog.search("SCHEMA", None)[0].id, "alpha");
        assert_eq!(catalog.search("heisenbug", None)[0].id, "star");
        assert!(catalog.search("heisenbug", Some("development")).is_empty());
    }

    #[test]
    fn test_category_name_fallback() {
        let catalog = AgentCatalog::from_toml(SAMPLE).unwrap();
        assert_eq!(catalog.category_name("development"), "Development");
        assert_eq!(catalog.category_name("debugging"), "debugging");
    }

    #[test]
    fn test_rejects_duplicate_ids() {
        let toml = r#"
[[agents]]
id = "a"
name = "A"
category = "x"
description = ""
prompt = "p"

[[agents]]
id = "a"
name = "A again"
category = "x"
description = ""
prompt = "p"
"#;
        assert!(AgentCatalog::from_toml(toml).is_err());
    }

    #[test]
    fn test_rejects_marker_breaking_id() {
        let toml = r#"
[[agents]]
id = "bad id"
name = "Bad"
category = "x"
description = ""
prompt = "p"
"#;
        assert!(AgentCatalog::from_toml(toml).is_err());
    }

    #[test]
    fn test_categories_in() {
        let catalog = AgentCatalog::from_toml(SAMPLE).unwrap();
        assert_eq!(
            categories_in(catalog.all()),
            vec!["debugging", "development"]
        );
    }
}
