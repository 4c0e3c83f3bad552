use crate::editor::export::DEFAULT_EXPORT_FILE;
use crate::editor::AssistantType;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod flags;
pub use flags::MutationFlags;

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show effective configuration after merging all sources
    Show,

    /// Set a configuration value
    Set {
        /// Key to set (default_assistant, auto_backup, backup_retention_days, default_category)
        key: String,

        /// New value
        value: String,

        /// Write to the project's .shipai.toml instead of ~/.shipai.toml
        #[arg(long = "local")]
        local: bool,
    },

    /// Reset configuration to defaults
    Reset {
        /// Reset the project's .shipai.toml instead of ~/.shipai.toml
        #[arg(long = "local")]
        local: bool,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Print the configuration file paths
    Path,
}

#[derive(Subcommand, Debug)]
pub enum BackupCommands {
    /// List backups of the assistant config file
    List,

    /// Delete backups older than the retention window
    Prune {
        /// Override backup_retention_days
        #[arg(long = "older-than-days")]
        older_than_days: Option<u32>,

        /// Show what would be deleted without deleting
        #[arg(long)]
        dry_run: bool,
    },
}

#[derive(Parser, Debug)]
#[command(name = "shipai")]
#[command(about = "Install AI agent prompts into your assistant's config file", long_about = None)]
#[command(version)]
#[command(after_help = "\
EXAMPLES:
  shipai list --featured                 Browse featured agents
  shipai install safety-guardian         Add an agent to CLAUDE.md
  shipai install -a cursor api-builder   Add an agent to .cursorrules
  shipai status                          Show what is installed
  shipai uninstall safety-guardian       Remove it again
  shipai export -f agents.json           Snapshot the config file

Agents live between <!-- Agent: id --> and <!-- End Agent: id --> markers;
everything outside the markers is left alone.")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Assistant whose config file to edit (default from config)
    #[arg(short = 'a', long = "assistant", value_enum, global = true)]
    pub assistant: Option<AssistantType>,

    /// Project directory (default: git root or current directory)
    #[arg(short = 'p', long = "project", global = true)]
    pub project: Option<PathBuf>,

    /// Do not back up the config file before changing it
    #[arg(long = "no-backup", global = true)]
    pub no_backup: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List all available agents
    #[command(alias = "ls")]
    List {
        /// Filter by category
        #[arg(short = 'c', long)]
        category: Option<String>,

        /// Show only featured agents
        #[arg(short = 'f', long)]
        featured: bool,

        /// Output as JSON
        #[arg(short = 'j', long)]
        json: bool,
    },

    /// Search agents by name, description, or keywords
    Search {
        /// Text to look for
        query: String,

        /// Search within a specific category
        #[arg(short = 'c', long)]
        category: Option<String>,

        /// Output as JSON
        #[arg(short = 'j', long)]
        json: bool,
    },

    /// Install one or more agents
    #[command(alias = "add")]
    Install {
        /// Agent ids to install
        #[arg(required_unless_present = "category")]
        agents: Vec<String>,

        /// Install every agent in a category
        #[arg(short = 'c', long, conflicts_with = "agents")]
        category: Option<String>,

        /// Reinstall agents that are already present
        #[arg(long)]
        force: bool,

        #[command(flatten)]
        flags: MutationFlags,
    },

    /// Remove one or more installed agents
    #[command(alias = "rm")]
    Uninstall {
        /// Agent ids to remove
        #[arg(required_unless_present = "all")]
        agents: Vec<String>,

        /// Remove every installed agent
        #[arg(long, conflicts_with = "agents")]
        all: bool,

        #[command(flatten)]
        flags: MutationFlags,
    },

    /// Refresh installed agents from the catalog
    Update {
        /// Agent ids to update
        #[arg(required_unless_present = "all")]
        agents: Vec<String>,

        /// Update every installed agent
        #[arg(long, conflicts_with = "agents")]
        all: bool,

        #[command(flatten)]
        flags: MutationFlags,
    },

    /// Show installed agents
    Status {
        /// Output as JSON
        #[arg(short = 'j', long)]
        json: bool,
    },

    /// Save the assistant config file to a JSON export
    Export {
        /// Export file to write
        #[arg(short = 'f', long, default_value = DEFAULT_EXPORT_FILE)]
        file: PathBuf,
    },

    /// Replace the assistant config file with the content of an export
    Import {
        /// Export file to read
        #[arg(short = 'f', long, default_value = DEFAULT_EXPORT_FILE)]
        file: PathBuf,

        #[command(flatten)]
        flags: MutationFlags,
    },

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Manage config file backups
    Backups {
        #[command(subcommand)]
        command: BackupCommands,
    },
}
