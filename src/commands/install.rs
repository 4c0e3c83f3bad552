use crate::catalog::{AgentCatalog, AgentDefinition};
use crate::cli::MutationFlags;
use crate::commands::helpers;
use crate::config::Config;
use crate::editor::{install_batch, list_installed};
use crate::error::{Result, ShipaiError};
use crate::project::Project;
use tracing::debug;

pub fn execute(
    project: &Project,
    config: &Config,
    catalog: &AgentCatalog,
    ids: &[String],
    category: Option<&str>,
    force: bool,
    flags: &MutationFlags,
) -> Result<()> {
    let (agents, unknown) = select_agents(catalog, ids, category);

    for id in &unknown {
        println!("  ✗ {}: not found in catalog", id);
    }
    if agents.is_empty() {
        return Err(match unknown.first() {
            Some(id) => ShipaiError::AgentNotFound(id.clone()),
            None => ShipaiError::Catalog(format!(
                "No agents in category '{}'",
                category.unwrap_or_default()
            )),
        });
    }

    let config_file = helpers::target_file(project, config, flags.dry_run)?;
    debug!(path = %config_file.path.display(), exists = config_file.exists, "resolved config file");

    if force && !flags.yes && !flags.dry_run {
        let installed = list_installed(&config_file.path)?;
        let replacing = agents
            .iter()
            .filter(|a| installed.iter().any(|i| i.id == a.id))
            .count();
        if replacing > 0
            && !helpers::confirm(&format!(
                "Replace {} installed agent(s) in {}?",
                replacing,
                config_file.path.display()
            ))?
        {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!(
        "Installing {} agent(s) for {}...",
        agents.len(),
        helpers::assistant_name(config)
    );
    let options = helpers::batch_options(config, flags.dry_run, force);
    let result = install_batch(&config_file, &agents, &options)?;
    helpers::print_batch_result(&result, flags.dry_run);
    Ok(())
}

/// Resolve requested ids against the catalog, keeping request order.
/// Returns the definitions found and the ids that were not.
fn select_agents(
    catalog: &AgentCatalog,
    ids: &[String],
    category: Option<&str>,
) -> (Vec<AgentDefinition>, Vec<String>) {
    if let Some(category) = category {
        let agents = catalog.by_category(category).into_iter().cloned().collect();
        return (agents, Vec::new());
    }

    let mut agents = Vec::new();
    let mut unknown = Vec::new();
    for id in ids {
        match catalog.get(id) {
            Some(agent) if !agents.iter().any(|a: &AgentDefinition| a.id == agent.id) => {
                agents.push(agent.clone())
            }
            Some(_) => {}
            None => unknown.push(id.clone()),
        }
    }
    (agents, unknown)
}
