use crate::cli::ConfigCommands;
use crate::commands::helpers;
use crate::config::{Config, ConfigLayer, ConfigStore, FileConfigStore};
use crate::error::{Result, ShipaiError};
use crate::project::Project;

pub fn execute(project: &Project, config: &Config, command: &ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Show => show(config),
        ConfigCommands::Set { key, value, local } => {
            set(&store_for(project, *local)?, key, value)
        }
        ConfigCommands::Reset { local, yes } => reset(&store_for(project, *local)?, *yes),
        ConfigCommands::Path => path(project),
    }
}

fn store_for(project: &Project, local: bool) -> Result<FileConfigStore> {
    if local {
        return Ok(FileConfigStore::project(project.root()));
    }
    FileConfigStore::global().ok_or_else(|| {
        ShipaiError::InvalidConfig(
            "HOME is not set; use --local to write the project config".to_string(),
        )
    })
}

fn show(config: &Config) -> Result<()> {
    println!("Effective Configuration:");
    println!("(CLI > Environment > Project config > Global config > Defaults)\n");

    println!("  default_assistant: {}", config.default_assistant);
    println!("  auto_backup: {}", config.auto_backup);
    println!("  backup_retention_days: {}", config.backup_retention_days);
    println!(
        "  default_category: {}",
        config.default_category.as_deref().unwrap_or("(none)")
    );
    Ok(())
}

fn set(store: &dyn ConfigStore, key: &str, value: &str) -> Result<()> {
    let mut layer = store.load()?;
    layer.set(key, value)?;
    store.save(&layer)?;
    println!("✓ Set {} = {} in {}", key, value, store.location());
    Ok(())
}

fn reset(store: &dyn ConfigStore, yes: bool) -> Result<()> {
    if !yes && !helpers::confirm(&format!("Reset configuration in {}?", store.location()))? {
        println!("Aborted.");
        return Ok(());
    }
    store.save(&ConfigLayer::default())?;
    println!("✓ Configuration reset: {}", store.location());
    Ok(())
}

fn path(project: &Project) -> Result<()> {
    match FileConfigStore::global() {
        Some(global) => print_path("Global config", global.path()),
        None => println!("  Global config: HOME is not set"),
    }
    print_path("Project config", FileConfigStore::project(project.root()).path());
    Ok(())
}

fn print_path(label: &str, path: &std::path::Path) {
    if path.exists() {
        println!("  {}: {}", label, path.display());
    } else {
        println!("  {}: {} - not found (optional)", label, path.display());
    }
}
