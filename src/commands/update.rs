use crate::catalog::{AgentCatalog, AgentDefinition};
use crate::cli::MutationFlags;
use crate::commands::helpers;
use crate::config::Config;
use crate::editor::{install_batch, list_installed, locate_existing, InstalledAgentInfo};
use crate::error::Result;
use crate::project::Project;
use semver::Version;
use std::cmp::Ordering;

/// How an installed block's version compares to the catalog's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VersionChange {
    Upgrade,
    Same,
    Downgrade,
    /// One side is not valid semver.
    Unknown,
}

pub fn compare_versions(installed: &str, available: &str) -> VersionChange {
    match (Version::parse(installed), Version::parse(available)) {
        (Ok(installed), Ok(available)) => match available.cmp(&installed) {
            Ordering::Greater => VersionChange::Upgrade,
            Ordering::Equal => VersionChange::Same,
            Ordering::Less => VersionChange::Downgrade,
        },
        _ => VersionChange::Unknown,
    }
}

pub fn execute(
    project: &Project,
    config: &Config,
    catalog: &AgentCatalog,
    ids: &[String],
    all: bool,
    flags: &MutationFlags,
) -> Result<()> {
    let config_file = locate_existing(config.default_assistant, project.root())?;
    let installed = list_installed(&config_file.path)?;
    if installed.is_empty() {
        println!("No agents installed in {}.", config_file.path.display());
        return Ok(());
    }

    let mut agents: Vec<AgentDefinition> = Vec::new();
    for (id, info, definition) in plan(catalog, &installed, ids, all) {
        match (info, definition) {
            (Some(info), Some(definition)) => {
                let change = match compare_versions(&info.version, &definition.version) {
                    VersionChange::Upgrade => "upgrade",
                    VersionChange::Same => "refresh",
                    VersionChange::Downgrade => "downgrade",
                    VersionChange::Unknown => "replace",
                };
                println!(
                    "  {} {}: {} -> {}",
                    change, info.id, info.version, definition.version
                );
                agents.push(definition.clone());
            }
            (None, Some(_)) => println!("  - {} is not installed", id),
            (Some(_), None) => println!("  - {} is not in the catalog", id),
            (None, None) => println!("  ✗ {}: not found", id),
        }
    }

    if agents.is_empty() {
        println!("Nothing to update.");
        return Ok(());
    }

    let options = helpers::batch_options(config, flags.dry_run, true);
    let result = install_batch(&config_file, &agents, &options)?;
    println!();
    helpers::print_batch_result(&result, flags.dry_run);
    Ok(())
}

type PlanEntry<'a> = (
    &'a str,
    Option<&'a InstalledAgentInfo>,
    Option<&'a AgentDefinition>,
);

/// Pair each targeted id with its installed block and catalog entry.
fn plan<'a>(
    catalog: &'a AgentCatalog,
    installed: &'a [InstalledAgentInfo],
    ids: &'a [String],
    all: bool,
) -> Vec<PlanEntry<'a>> {
    if all {
        return installed
            .iter()
            .map(|info| (info.id.as_str(), Some(info), catalog.get(&info.id)))
            .collect();
    }

    ids.iter()
        .map(|id| {
            let info = installed.iter().find(|i| &i.id == id);
            (id.as_str(), info, catalog.get(id))
        })
        .collect()
}
