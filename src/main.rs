#![forbid(unsafe_code)]

use anyhow::Result;
use clap::Parser;

use shipai::catalog::AgentCatalog;
use shipai::cli::{Cli, Commands, ConfigCommands};
use shipai::config::Config;
use shipai::project::Project;
use shipai::{commands, logging};

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let project = Project::resolve(cli.project.as_deref())?;
    tracing::debug!(root = %project.root().display(), "project resolved");

    // Editing the config files must work even when they fail to load
    if let Commands::Config { command } = &cli.command {
        if !matches!(command, ConfigCommands::Show) {
            commands::config::execute(&project, &Config::default(), command)?;
            return Ok(());
        }
    }

    let config = Config::load(project.root())?.with_cli_overrides(cli.assistant, cli.no_backup);
    tracing::debug!(?config, "configuration loaded");

    let catalog = AgentCatalog::load()?;

    match &cli.command {
        Commands::List {
            category,
            featured,
            json,
        } => {
            commands::list::execute(&catalog, &config, category.as_deref(), *featured, *json)?;
        }
        Commands::Search {
            query,
            category,
            json,
        } => {
            commands::search::execute(&catalog, query, category.as_deref(), *json)?;
        }
        Commands::Install {
            agents,
            category,
            force,
            flags,
        } => {
            commands::install::execute(
                &project,
                &config,
                &catalog,
                agents,
                category.as_deref(),
                *force,
                flags,
            )?;
        }
        Commands::Uninstall { agents, all, flags } => {
            commands::uninstall::execute(&project, &config, agents, *all, flags)?;
        }
        Commands::Update { agents, all, flags } => {
            commands::update::execute(&project, &config, &catalog, agents, *all, flags)?;
        }
        Commands::Status { json } => {
            commands::status::execute(&project, &config, &catalog, *json)?;
        }
        Commands::Export { file } => {
            commands::export::execute(&project, &config, file)?;
        }
        Commands::Import { file, flags } => {
            commands::import::execute(&project, &config, cli.assistant, file, flags)?;
        }
        Commands::Config { command } => {
            commands::config::execute(&project, &config, command)?;
        }
        Commands::Backups { command } => {
            commands::backups::execute(&project, &config, command)?;
        }
    }

    Ok(())
}
