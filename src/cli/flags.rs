use clap::Args;

/// Flags shared by the commands that rewrite the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct MutationFlags {
    /// Show what would change without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Skip confirmation prompt
    #[arg(short = 'y', long)]
    pub yes: bool,
}
