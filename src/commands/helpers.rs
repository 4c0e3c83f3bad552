use crate::config::Config;
use crate::editor::{locate_existing, locate_or_create, AssistantSpec, BatchOptions, BatchResult};
use crate::editor::{ConfigFile, OutcomeStatus};
use crate::error::Result;
use crate::project::Project;
use serde::Serialize;
use std::io::{self, BufRead, Write};

/// Ask a yes/no question on stdin. Anything but `y`/`yes` is a no.
pub fn confirm(question: &str) -> Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().lock().read_line(&mut input)?;
    Ok(is_yes(&input))
}

fn is_yes(input: &str) -> bool {
    let input = input.trim().to_lowercase();
    input == "y" || input == "yes"
}

/// Pretty-print any serializable value as JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Config file for the configured assistant, created for the primary assistant
/// unless `dry_run` is set.
pub fn target_file(project: &Project, config: &Config, dry_run: bool) -> Result<ConfigFile> {
    if dry_run {
        locate_existing(config.default_assistant, project.root())
    } else {
        locate_or_create(config.default_assistant, project.root())
    }
}

pub fn batch_options(config: &Config, dry_run: bool, replace_existing: bool) -> BatchOptions {
    BatchOptions {
        backup: config.auto_backup,
        dry_run,
        replace_existing,
    }
}

pub fn assistant_name(config: &Config) -> &'static str {
    AssistantSpec::lookup(config.default_assistant)
        .map(|spec| spec.name)
        .unwrap_or("assistant")
}

/// Print one line per agent outcome plus a summary.
pub fn print_batch_result(result: &BatchResult, dry_run: bool) {
    for outcome in &result.outcomes {
        let line = match &outcome.status {
            OutcomeStatus::Added => format!("  ✓ {} installed", outcome.id),
            OutcomeStatus::Replaced => format!("  ✓ {} updated", outcome.id),
            OutcomeStatus::Removed => format!("  ✓ {} removed", outcome.id),
            OutcomeStatus::SkippedExisting => {
                format!("  - {} already installed (use --force to reinstall)", outcome.id)
            }
            OutcomeStatus::SkippedNotFound => format!("  - {} is not installed", outcome.id),
            OutcomeStatus::Failed(reason) => format!("  ✗ {}: {}", outcome.id, reason),
        };
        println!("{}", line);
    }

    println!();
    if dry_run {
        println!(
            "Dry run: {} change(s) would be made to {}",
            result.changed(),
            result.config_path.display()
        );
        return;
    }

    if let Some(backup) = &result.backup_path {
        println!("Backup: {}", backup.display());
    }
    if result.written {
        println!(
            "Updated {} ({} change(s))",
            result.config_path.display(),
            result.changed()
        );
    } else {
        println!("No changes to {}", result.config_path.display());
    }
}
