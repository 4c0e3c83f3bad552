//! Batched read-modify-write of a config file.
//!
//! One batch is one cycle: read the file, back it up once if it has
//! content, thread the content through every per-agent operation in caller
//! order, then write the result back. Backup and write failures abort the
//! whole batch; a bad agent is recorded in its outcome and the rest of the
//! batch carries on.
//!
//! A file that does not exist yet starts from its assistant's boilerplate.
//! Writes follow symlinks, so `CLAUDE.md -> AGENTS.md` keeps the link and
//! updates `AGENTS.md`.

use super::assistant::AssistantSpec;
use super::backup;
use super::block;
use super::locator::ConfigFile;
use crate::catalog::AgentDefinition;
use crate::error::{Result, ShipaiError};
use serde::Serialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Back up non-empty files before writing.
    pub backup: bool,
    /// Compute outcomes without touching the disk.
    pub dry_run: bool,
    /// Replace blocks that already exist. When false they are skipped.
    pub replace_existing: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            backup: true,
            dry_run: false,
            replace_existing: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case", tag = "status", content = "reason")]
pub enum OutcomeStatus {
    Added,
    Replaced,
    Removed,
    SkippedNotFound,
    SkippedExisting,
    Failed(String),
}

impl OutcomeStatus {
    pub fn is_change(&self) -> bool {
        matches!(
            self,
            OutcomeStatus::Added | OutcomeStatus::Replaced | OutcomeStatus::Removed
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentOutcome {
    pub id: String,
    #[serde(flatten)]
    pub status: OutcomeStatus,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchResult {
    pub config_path: PathBuf,
    pub outcomes: Vec<AgentOutcome>,
    pub backup_path: Option<PathBuf>,
    /// Whether the file was rewritten.
    pub written: bool,
}

impl BatchResult {
    pub fn changed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status.is_change()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &AgentOutcome> {
        self.outcomes
            .iter()
            .filter(|o| matches!(o.status, OutcomeStatus::Failed(_)))
    }
}

/// Install or update `agents` in `config_file`, in order.
pub fn install_batch(
    config_file: &ConfigFile,
    agents: &[AgentDefinition],
    options: &BatchOptions,
) -> Result<BatchResult> {
    run_batch(config_file, agents, options, |content, agent| {
        if !block::is_valid_id(&agent.id) {
            return (None, OutcomeStatus::Failed(format!("invalid agent id '{}'", agent.id)));
        }

        let existed = block::contains(content, &agent.id);
        if existed && !options.replace_existing {
            return (None, OutcomeStatus::SkippedExisting);
        }

        let updated = block::upsert(content, agent);
        let status = if existed {
            OutcomeStatus::Replaced
        } else {
            OutcomeStatus::Added
        };
        (Some(updated), status)
    })
}

/// Remove the blocks for `ids` from `config_file`.
pub fn remove_batch(
    config_file: &ConfigFile,
    ids: &[String],
    options: &BatchOptions,
) -> Result<BatchResult> {
    run_batch(config_file, ids, options, |content, id| {
        if !block::is_valid_id(id) {
            return (None, OutcomeStatus::Failed(format!("invalid agent id '{}'", id)));
        }
        if !block::contains(content, id) {
            return (None, OutcomeStatus::SkippedNotFound);
        }
        (Some(block::remove(content, id)), OutcomeStatus::Removed)
    })
}

trait BatchItem {
    fn id(&self) -> &str;
}

impl BatchItem for AgentDefinition {
    fn id(&self) -> &str {
        &self.id
    }
}

impl BatchItem for String {
    fn id(&self) -> &str {
        self
    }
}

fn run_batch<T, F>(
    config_file: &ConfigFile,
    items: &[T],
    options: &BatchOptions,
    mut apply: F,
) -> Result<BatchResult>
where
    T: BatchItem,
    F: FnMut(&str, &T) -> (Option<String>, OutcomeStatus),
{
    let path = &config_file.path;
    debug!(path = %path.display(), items = items.len(), dry_run = options.dry_run, "starting batch");

    let original = match read_content(path)? {
        Some(content) => content,
        // A file created by this batch starts from the assistant's boilerplate
        None => AssistantSpec::lookup(config_file.assistant)?
            .boilerplate
            .to_string(),
    };

    let backup_path = take_backup(path, &original, options)?;

    let mut content = original.clone();
    let mut outcomes = Vec::with_capacity(items.len());
    for item in items {
        let (updated, status) = apply(&content, item);
        match &status {
            OutcomeStatus::Failed(reason) => warn!(id = item.id(), %reason, "agent skipped"),
            status => debug!(id = item.id(), ?status, "applied"),
        }
        if let Some(updated) = updated {
            content = updated;
        }
        outcomes.push(AgentOutcome {
            id: item.id().to_string(),
            status,
        });
    }

    let written = !options.dry_run && content != original;
    if written {
        write_content(path, &content)?;
        info!(path = %path.display(), changed = outcomes.iter().filter(|o| o.status.is_change()).count(), "config file updated");
    }

    Ok(BatchResult {
        config_path: path.clone(),
        outcomes,
        backup_path,
        written,
    })
}

/// Replace the whole file with `content`, as `import` does.
///
/// Goes through the same backup and atomic write as an agent batch; the
/// result carries no per-agent outcomes.
pub fn replace_content(
    config_file: &ConfigFile,
    content: &str,
    options: &BatchOptions,
) -> Result<BatchResult> {
    let path = &config_file.path;
    debug!(path = %path.display(), dry_run = options.dry_run, "replacing config file");

    let original = read_content(path)?.unwrap_or_default();
    let backup_path = take_backup(path, &original, options)?;

    let written = !options.dry_run && content != original;
    if written {
        write_content(path, content)?;
        info!(path = %path.display(), "config file replaced");
    }

    Ok(BatchResult {
        config_path: path.clone(),
        outcomes: Vec::new(),
        backup_path,
        written,
    })
}

/// Current file content, `None` when the file does not exist yet.
fn read_content(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(ShipaiError::file("read", path, e)),
    }
}

fn take_backup(path: &Path, original: &str, options: &BatchOptions) -> Result<Option<PathBuf>> {
    if options.backup && !options.dry_run && !original.is_empty() && path.exists() {
        Ok(Some(backup::backup(path)?))
    } else {
        Ok(None)
    }
}

/// Replace the file through a sibling temp file so a crash never leaves it half written.
fn write_content(path: &Path, content: &str) -> Result<()> {
    let target = write_target(path)?;
    let dir = match target.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(|e| ShipaiError::file("create directory", dir, e))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .map_err(|e| ShipaiError::file("create temp file in", dir, e))?;
    tmp.write_all(content.as_bytes())
        .map_err(|e| ShipaiError::file("write", &target, e))?;
    if !content.ends_with('\n') {
        tmp.write_all(b"\n")
            .map_err(|e| ShipaiError::file("write", &target, e))?;
    }

    if let Ok(metadata) = fs::metadata(&target) {
        // Keep the original file mode
        if let Err(e) = fs::set_permissions(tmp.path(), metadata.permissions()) {
            warn!(path = %target.display(), error = %e, "could not preserve file mode");
        }
    }

    tmp.persist(&target)
        .map_err(|e| ShipaiError::file("write", &target, e.error))?;
    Ok(())
}

/// The file a write lands on. Symlinks are followed so the link survives and
/// the file it names gets the new content.
fn write_target(path: &Path) -> Result<PathBuf> {
    let is_link = fs::symlink_metadata(path)
        .map(|m| m.file_type().is_symlink())
        .unwrap_or(false);
    if !is_link {
        return Ok(path.to_path_buf());
    }

    match fs::canonicalize(path) {
        Ok(real) => Ok(real),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            // Dangling link: the file it names is created, its directory must exist
            let link = fs::read_link(path).map_err(|e| ShipaiError::file("read link", path, e))?;
            let link = match path.parent() {
                Some(parent) if link.is_relative() => parent.join(link),
                _ => link,
            };
            let (Some(parent), Some(name)) = (link.parent(), link.file_name()) else {
                return Err(ShipaiError::file(
                    "resolve symlink",
                    path,
                    std::io::Error::new(std::io::ErrorKind::InvalidInput, "link names no file"),
                ));
            };
            let parent = fs::canonicalize(parent)
                .map_err(|e| ShipaiError::file("resolve symlink", path, e))?;
            Ok(parent.join(name))
        }
        Err(e) => Err(ShipaiError::file("resolve symlink", path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editor::{installed, AssistantType};
    use tempfile::TempDir;

    fn agent(id: &str) -> AgentDefinition {
        AgentDefinition {
            id: id.to_string(),
            name: format!("Agent {}", id),
            category: "development".to_string(),
            description: "test agent".to_string(),
            key_features: vec![],
            use_cases: vec![],
            prompt: "Do the thing.".to_string(),
            supported_assistants: vec![],
            featured: false,
            version: "1.0.0".to_string(),
        }
    }

    fn config_file(dir: &TempDir, content: Option<&str>) -> ConfigFile {
        let path = dir.path().join("CLAUDE.md");
        if let Some(content) = content {
            fs::write(&path, content).unwrap();
        }
        ConfigFile {
            path,
            assistant: AssistantType::ClaudeCode,
            exists: content.is_some(),
        }
    }

    #[test]
    fn test_install_reports_added_then_replaced() {
        let dir = TempDir::new().unwrap();
        let file = config_file(&dir, Some("## Installed Agents\n"));

        let first = install_batch(&file, &[agent("a")], &BatchOptions::default()).unwrap();
        assert_eq!(first.outcomes[0].status, OutcomeStatus::Added);
        assert!(first.written);

        let second = install_batch(&file, &[agent("a")], &BatchOptions::default()).unwrap();
        assert_eq!(second.outcomes[0].status, OutcomeStatus::Replaced);
        assert_eq!(installed::list_installed(&file.path).unwrap().len(), 1);
    }

    #[test]
    fn test_one_backup_per_batch() {
        let dir = TempDir::new().unwrap();
        let file = config_file(&dir, Some("# Existing\n"));

        let agents: Vec<_> = ["a", "b", "c", "d"].iter().map(|id| agent(id)).collect();
        let result = install_batch(&file, &agents, &BatchOptions::default()).unwrap();

        assert!(result.backup_path.is_some());
        assert_eq!(backup::list_backups(&file.path).unwrap().len(), 1);
        assert_eq!(
            fs::read_to_string(result.backup_path.unwrap()).unwrap(),
            "# Existing\n"
        );
    }

    #[test]
    fn test_empty_file_is_not_backed_up() {
        let dir = TempDir::new().unwrap();
        let file = config_file(&dir, Some(""));

        let result = install_batch(&file, &[agent("a")], &BatchOptions::default()).unwrap();
        assert!(result.backup_path.is_none());
        assert!(backup::list_backups(&file.path).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_is_created_on_write() {
        let dir = TempDir::new().unwrap();
        let file = config_file(&dir, None);

        let result = install_batch(&file, &[agent("a")], &BatchOptions::default()).unwrap();
        assert!(result.written);
        assert!(result.backup_path.is_none());
        let content = fs::read_to_string(&file.path).unwrap();
        assert!(content.starts_with("# Claude Code Configuration"));
        let heading = content.find("## Installed Agents").unwrap();
        assert!(heading < content.find("<!-- Agent: a -->").unwrap());
        assert!(content.ends_with("<!-- End Agent: a -->\n"));
    }

    #[test]
    fn test_new_secondary_file_gets_boilerplate() {
        let dir = TempDir::new().unwrap();
        let file = ConfigFile {
            path: dir.path().join(".windsurfrules"),
            assistant: AssistantType::Windsurf,
            exists: false,
        };

        install_batch(&file, &[agent("a")], &BatchOptions::default()).unwrap();
        let content = fs::read_to_string(&file.path).unwrap();
        assert!(content.starts_with("# Windsurf AI Assistant Rules"));
        assert!(content.contains("<!-- Agent: a -->"));
    }

    #[test]
    fn test_missing_file_stays_missing_when_nothing_changes() {
        let dir = TempDir::new().unwrap();
        let file = config_file(&dir, None);

        let result = remove_batch(&file, &["a".to_string()], &BatchOptions::default()).unwrap();
        assert!(!result.written);
        assert!(!file.path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_write_follows_symlink() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("AGENTS.md");
        fs::write(&real, "## Installed Agents\n").unwrap();
        let link = dir.path().join("CLAUDE.md");
        std::os::unix::fs::symlink("AGENTS.md", &link).unwrap();
        let file = ConfigFile {
            path: link.clone(),
            assistant: AssistantType::ClaudeCode,
            exists: true,
        };

        install_batch(&file, &[agent("a")], &BatchOptions::default()).unwrap();

        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert!(fs::read_to_string(&real).unwrap().contains("<!-- Agent: a -->"));
        let backups = backup::list_backups(&link).unwrap();
        assert_eq!(backups.len(), 1);
        assert_eq!(fs::read_to_string(&backups[0].path).unwrap(), "## Installed Agents\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_creates_its_target() {
        let dir = TempDir::new().unwrap();
        let link = dir.path().join("CLAUDE.md");
        std::os::unix::fs::symlink("AGENTS.md", &link).unwrap();
        let file = ConfigFile {
            path: link.clone(),
            assistant: AssistantType::ClaudeCode,
            exists: false,
        };

        install_batch(&file, &[agent("a")], &BatchOptions::default()).unwrap();
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert!(fs::read_to_string(dir.path().join("AGENTS.md"))
            .unwrap()
            .contains("<!-- Agent: a -->"));
    }

    #[test]
    fn test_backup_failure_aborts_batch() {
        let dir = TempDir::new().unwrap();
        // Leaves no room in the file name for the ".backup.<millis>" suffix
        let path = dir.path().join(format!("{}.md", "c".repeat(240)));
        fs::write(&path, "# Existing\n").unwrap();
        let file = ConfigFile {
            path: path.clone(),
            assistant: AssistantType::ClaudeCode,
            exists: true,
        };

        let err = install_batch(&file, &[agent("a")], &BatchOptions::default()).unwrap_err();
        assert!(err.is_io());
        assert_eq!(fs::read_to_string(&path).unwrap(), "# Existing\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_write_failure_aborts_batch() {
        let dir = TempDir::new().unwrap();
        let link = dir.path().join("CLAUDE.md");
        let target = dir.path().join("missing").join("AGENTS.md");
        std::os::unix::fs::symlink(&target, &link).unwrap();
        let file = ConfigFile {
            path: link.clone(),
            assistant: AssistantType::ClaudeCode,
            exists: false,
        };

        let err = install_batch(&file, &[agent("a")], &BatchOptions::default()).unwrap_err();
        assert!(err.is_io());
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
        assert!(!target.exists());
        assert!(!dir.path().join("missing").exists());
    }

    #[test]
    fn test_replace_content_backs_up_once() {
        let dir = TempDir::new().unwrap();
        let file = config_file(&dir, Some("# Old\n"));

        let result = replace_content(&file, "# New\n", &BatchOptions::default()).unwrap();
        assert!(result.written);
        assert!(result.outcomes.is_empty());
        assert_eq!(fs::read_to_string(&file.path).unwrap(), "# New\n");
        let saved = result.backup_path.unwrap();
        assert_eq!(fs::read_to_string(saved).unwrap(), "# Old\n");
        assert_eq!(backup::list_backups(&file.path).unwrap().len(), 1);
    }

    #[test]
    fn test_invalid_id_does_not_abort_batch() {
        let dir = TempDir::new().unwrap();
        let file = config_file(&dir, Some("## Agents\n"));

        let agents = vec![agent("a"), agent("bad id"), agent("c")];
        let result = install_batch(&file, &agents, &BatchOptions::default()).unwrap();

        assert_eq!(result.outcomes[0].status, OutcomeStatus::Added);
        assert!(matches!(result.outcomes[1].status, OutcomeStatus::Failed(_)));
        assert_eq!(result.outcomes[2].status, OutcomeStatus::Added);
        assert_eq!(result.failed().count(), 1);

        let ids: Vec<String> = installed::list_installed(&file.path)
            .unwrap()
            .into_iter()
            .map(|a| a.id)
            .collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_skip_existing_when_not_replacing() {
        let dir = TempDir::new().unwrap();
        let file = config_file(&dir, Some("## Agents\n"));
        install_batch(&file, &[agent("a")], &BatchOptions::default()).unwrap();

        let options = BatchOptions {
            replace_existing: false,
            ..BatchOptions::default()
        };
        let result = install_batch(&file, &[agent("a"), agent("b")], &options).unwrap();
        assert_eq!(result.outcomes[0].status, OutcomeStatus::SkippedExisting);
        assert_eq!(result.outcomes[1].status, OutcomeStatus::Added);
    }

    #[test]
    fn test_remove_batch_outcomes() {
        let dir = TempDir::new().unwrap();
        let file = config_file(&dir, Some("## Agents\n"));
        install_batch(&file, &[agent("a"), agent("b")], &BatchOptions::default()).unwrap();

        let ids = vec!["a".to_string(), "ghost".to_string()];
        let result = remove_batch(&file, &ids, &BatchOptions::default()).unwrap();
        assert_eq!(result.outcomes[0].status, OutcomeStatus::Removed);
        assert_eq!(result.outcomes[1].status, OutcomeStatus::SkippedNotFound);

        let left = installed::list_installed(&file.path).unwrap();
        assert_eq!(left.len(), 1);
        assert_eq!(left[0].id, "b");
    }

    #[test]
    fn test_noop_remove_leaves_file_untouched() {
        let dir = TempDir::new().unwrap();
        let original = "# Notes\n\n\n\nhand edited   \n";
        let file = config_file(&dir, Some(original));

        let options = BatchOptions {
            backup: false,
            ..BatchOptions::default()
        };
        let result = remove_batch(&file, &["ghost".to_string()], &options).unwrap();
        assert!(!result.written);
        assert_eq!(fs::read_to_string(&file.path).unwrap(), original);
    }

    #[test]
    fn test_dry_run_touches_nothing() {
        let dir = TempDir::new().unwrap();
        let file = config_file(&dir, Some("# Existing\n"));

        let options = BatchOptions {
            dry_run: true,
            ..BatchOptions::default()
        };
        let result = install_batch(&file, &[agent("a")], &options).unwrap();
        assert_eq!(result.outcomes[0].status, OutcomeStatus::Added);
        assert!(!result.written);
        assert!(result.backup_path.is_none());
        assert_eq!(fs::read_to_string(&file.path).unwrap(), "# Existing\n");
    }

    #[test]
    fn test_unreadable_file_aborts_batch() {
        let dir = TempDir::new().unwrap();
        // A directory at the config path fails to read before any mutation
        let path = dir.path().join("CLAUDE.md");
        fs::create_dir(&path).unwrap();
        let file = ConfigFile {
            path,
            assistant: AssistantType::ClaudeCode,
            exists: true,
        };

        let err = install_batch(&file, &[agent("a")], &BatchOptions::default()).unwrap_err();
        assert!(err.is_io());
    }
}
