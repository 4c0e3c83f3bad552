use crate::catalog::AgentCatalog;
use crate::commands::helpers::print_json;
use crate::commands::list::print_grouped;
use crate::error::Result;

pub fn execute(
    catalog: &AgentCatalog,
    query: &str,
    category: Option<&str>,
    json: bool,
) -> Result<()> {
    let agents = catalog.search(query, category);

    if json {
        return print_json(&agents);
    }

    if agents.is_empty() {
        println!("No agents match '{}'.", query);
        return Ok(());
    }

    print_grouped(catalog, &agents);
    println!("{} match(es) for '{}'", agents.len(), query);
    Ok(())
}
