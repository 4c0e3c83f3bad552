use crate::commands::helpers;
use crate::config::Config;
use crate::editor::{locate_existing, ConfigExport};
use crate::error::Result;
use crate::project::Project;
use std::path::Path;
use tracing::info;

pub fn execute(project: &Project, config: &Config, file: &Path) -> Result<()> {
    let config_file = locate_existing(config.default_assistant, project.root())?;
    if !config_file.exists {
        println!("No {} config file found to export.", helpers::assistant_name(config));
        return Ok(());
    }

    let export = ConfigExport::capture(&config_file)?;
    export.save(file)?;
    info!(from = %config_file.path.display(), to = %file.display(), "config exported");

    println!(
        "Exported {} ({} bytes) to {}",
        config_file.path.display(),
        export.content.len(),
        file.display()
    );
    Ok(())
}
