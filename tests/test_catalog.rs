use shipai::catalog::{AgentCatalog, ALL_CATEGORIES};
use shipai::editor::{block, list_installed, AssistantType};
use std::collections::HashSet;

#[test]
fn test_bundled_catalog_loads() {
    let catalog = AgentCatalog::load().unwrap();
    assert!(!catalog.all().is_empty());
    assert!(!catalog.categories().is_empty());
}

#[test]
fn test_every_agent_belongs_to_a_known_category() {
    let catalog = AgentCatalog::load().unwrap();
    let known: HashSet<&str> = catalog.categories().iter().map(|c| c.id.as_str()).collect();
    for agent in catalog.all() {
        assert!(
            known.contains(agent.category.as_str()),
            "{} has unknown category {}",
            agent.id,
            agent.category
        );
    }
}

#[test]
fn test_every_agent_round_trips_through_a_block() {
    let catalog = AgentCatalog::load().unwrap();
    for agent in catalog.all() {
        let encoded = block::encode(agent);
        let scanned = block::scan(&encoded);
        assert_eq!(scanned.len(), 1, "{} did not scan back", agent.id);
        assert_eq!(scanned[0].id, agent.id);
        assert_eq!(scanned[0].name, agent.name);
        assert_eq!(scanned[0].version, agent.version);
        assert_eq!(scanned[0].category.as_deref(), Some(agent.category.as_str()));
    }
}

#[test]
fn test_featured_agents_come_first() {
    let catalog = AgentCatalog::load().unwrap();
    let all = catalog.all();
    let first_plain = all.iter().position(|a| !a.featured).unwrap_or(all.len());
    assert!(all[first_plain..].iter().all(|a| !a.featured));
    assert_eq!(catalog.featured().len(), first_plain);
}

#[test]
fn test_search_is_case_insensitive_and_scoped() {
    let catalog = AgentCatalog::load().unwrap();

    let hits = catalog.search("SAFETY", None);
    assert!(hits.iter().any(|a| a.id == "safety-guardian"));

    let scoped = catalog.search("safety", Some("debugging"));
    assert!(scoped.iter().all(|a| a.category == "debugging"));

    assert_eq!(
        catalog.by_category(ALL_CATEGORIES).len(),
        catalog.all().len()
    );
}

#[test]
fn test_supported_assistants_parse() {
    let catalog = AgentCatalog::load().unwrap();
    let guardian = catalog.require("safety-guardian").unwrap();
    assert!(guardian
        .supported_assistants
        .contains(&AssistantType::ClaudeCode));
}

#[test]
fn test_unknown_agent_is_an_error() {
    let catalog = AgentCatalog::load().unwrap();
    assert!(catalog.get("does-not-exist").is_none());
    assert!(catalog.require("does-not-exist").is_err());
    assert!(list_installed(std::path::Path::new("/nonexistent/CLAUDE.md"))
        .unwrap()
        .is_empty());
}
