use crate::catalog::AgentCatalog;
use crate::commands::helpers::{self, print_json};
use crate::config::Config;
use crate::editor::{list_installed, locate_existing, InstalledAgentInfo};
use crate::error::Result;
use crate::project::Project;
use serde::Serialize;
use std::path::PathBuf;

const OTHER_CATEGORY: &str = "Other";

#[derive(Debug, Serialize)]
struct StatusReport {
    assistant: String,
    config_path: PathBuf,
    exists: bool,
    agents: Vec<InstalledAgentInfo>,
}

pub fn execute(project: &Project, config: &Config, catalog: &AgentCatalog, json: bool) -> Result<()> {
    let config_file = locate_existing(config.default_assistant, project.root())?;
    let agents = list_installed(&config_file.path)?;

    if json {
        return print_json(&StatusReport {
            assistant: config.default_assistant.to_string(),
            config_path: config_file.path,
            exists: config_file.exists,
            agents,
        });
    }

    println!("Assistant: {}", helpers::assistant_name(config));
    if !config_file.exists {
        println!("Config file: {} (not created yet)", config_file.path.display());
    } else {
        println!("Config file: {}", config_file.path.display());
    }
    println!();

    if agents.is_empty() {
        println!("No agents installed.");
        return Ok(());
    }

    for (group, members) in group_by_category(catalog, &agents) {
        println!("{}:", group);
        for agent in members {
            println!(
                "  {:<28} v{:<8} installed {}",
                agent.id, agent.version, agent.installed_at
            );
        }
        println!();
    }
    println!("{} agent(s) installed", agents.len());
    Ok(())
}

/// Group installed agents by catalog category name, in first-seen order.
/// Agents missing from the catalog land in `Other`.
fn group_by_category<'a>(
    catalog: &'a AgentCatalog,
    agents: &'a [InstalledAgentInfo],
) -> Vec<(&'a str, Vec<&'a InstalledAgentInfo>)> {
    let mut groups: Vec<(&str, Vec<&InstalledAgentInfo>)> = Vec::new();
    for agent in agents {
        let group = catalog
            .get(&agent.id)
            .map(|def| catalog.category_name(&def.category))
            .unwrap_or(OTHER_CATEGORY);
        match groups.iter_mut().find(|(name, _)| *name == group) {
            Some((_, members)) => members.push(agent),
            None => groups.push((group, vec![agent])),
        }
    }
    groups
}
