use crate::catalog::registry::categories_in;
use crate::catalog::{AgentCatalog, AgentDefinition, ALL_CATEGORIES};
use crate::commands::helpers::print_json;
use crate::config::Config;
use crate::error::Result;

pub fn execute(
    catalog: &AgentCatalog,
    config: &Config,
    category: Option<&str>,
    featured: bool,
    json: bool,
) -> Result<()> {
    let category = category
        .or(config.default_category.as_deref())
        .unwrap_or(ALL_CATEGORIES);

    let agents: Vec<&AgentDefinition> = catalog
        .by_category(category)
        .into_iter()
        .filter(|a| !featured || a.featured)
        .collect();

    if json {
        return print_json(&agents);
    }

    if agents.is_empty() {
        println!("No agents found.");
        return Ok(());
    }

    print_grouped(catalog, &agents);
    println!("{} agent(s). Install with: shipai install <id>", agents.len());
    Ok(())
}

/// Print agents under their category headings.
pub fn print_grouped(catalog: &AgentCatalog, agents: &[&AgentDefinition]) {
    for slug in categories_in(agents.iter().copied()) {
        println!("{}:", catalog.category_name(slug));
        for agent in agents.iter().filter(|a| a.category == slug) {
            let star = if agent.featured { "★" } else { " " };
            println!("  {} {:<28} {}", star, agent.id, agent.description);
        }
        println!();
    }
}
