use crate::cli::MutationFlags;
use crate::commands::helpers;
use crate::config::Config;
use crate::editor::{list_installed, locate_existing, remove_batch};
use crate::error::Result;
use crate::project::Project;

pub fn execute(
    project: &Project,
    config: &Config,
    ids: &[String],
    all: bool,
    flags: &MutationFlags,
) -> Result<()> {
    let config_file = locate_existing(config.default_assistant, project.root())?;
    if !config_file.exists {
        println!(
            "No {} config file found in {}. Nothing to remove.",
            helpers::assistant_name(config),
            project.root().display()
        );
        return Ok(());
    }

    let ids: Vec<String> = if all {
        list_installed(&config_file.path)?
            .into_iter()
            .map(|a| a.id)
            .collect()
    } else {
        ids.to_vec()
    };

    if ids.is_empty() {
        println!("No agents installed in {}.", config_file.path.display());
        return Ok(());
    }

    if !flags.yes && !flags.dry_run {
        println!("Agents to remove from {}:", config_file.path.display());
        for id in &ids {
            println!("  - {}", id);
        }
        if !helpers::confirm("Remove these agents?")? {
            println!("Aborted.");
            return Ok(());
        }
    }

    let options = helpers::batch_options(config, flags.dry_run, true);
    let result = remove_batch(&config_file, &ids, &options)?;
    helpers::print_batch_result(&result, flags.dry_run);
    Ok(())
}
