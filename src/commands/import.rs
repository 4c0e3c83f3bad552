use crate::cli::MutationFlags;
use crate::commands::helpers;
use crate::config::Config;
use crate::editor::{locate_existing, replace_content, AssistantType, ConfigExport};
use crate::error::Result;
use crate::project::Project;
use std::path::Path;

/// Replace the config file with an export's content. The export's assistant
/// is used unless `--assistant` was given.
pub fn execute(
    project: &Project,
    config: &Config,
    assistant: Option<AssistantType>,
    file: &Path,
    flags: &MutationFlags,
) -> Result<()> {
    let export = ConfigExport::load(file)?;
    let assistant = assistant.unwrap_or(export.config_type);

    // The whole file is replaced, so a missing one is written directly
    let config_file = locate_existing(assistant, project.root())?;

    if config_file.exists
        && !flags.yes
        && !flags.dry_run
        && !helpers::confirm(&format!(
            "Replace {} with the content exported on {}?",
            config_file.path.display(),
            export.exported_at.format("%Y-%m-%d %H:%M")
        ))?
    {
        println!("Aborted.");
        return Ok(());
    }

    let options = helpers::batch_options(config, flags.dry_run, true);
    let result = replace_content(&config_file, &export.content, &options)?;

    if flags.dry_run {
        println!(
            "Dry run: {} would be replaced from {}",
            config_file.path.display(),
            file.display()
        );
        return Ok(());
    }
    if let Some(backup) = &result.backup_path {
        println!("Backup: {}", backup.display());
    }
    if result.written {
        println!(
            "Imported {} into {}",
            file.display(),
            result.config_path.display()
        );
    } else {
        println!("{} already matches the export", result.config_path.display());
    }
    Ok(())
}
