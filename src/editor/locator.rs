//! Find (or create) the config file an assistant reads.

use super::assistant::{AssistantSpec, AssistantType};
use crate::error::{Result, ShipaiError};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

/// An assistant's config file, as seen at lookup time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub path: PathBuf,
    pub assistant: AssistantType,
    pub exists: bool,
}

/// Resolve the config file for `assistant` under `project_root`.
///
/// The first existing candidate path wins. When none exists, the primary
/// assistant's file is created with its boilerplate; other assistants get
/// `exists = false` and the would-be path, and nothing is written.
pub fn locate_or_create(assistant: AssistantType, project_root: &Path) -> Result<ConfigFile> {
    let spec = AssistantSpec::lookup(assistant)?;

    if let Some(found) = locate(spec, project_root) {
        return Ok(found);
    }

    let path = project_root.join(spec.default_path());
    if !assistant.is_primary() {
        return Ok(ConfigFile {
            path,
            assistant,
            exists: false,
        });
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| ShipaiError::file("create directory", parent, e))?;
    }

    // create_new so a file racing into existence is never clobbered
    match fs::OpenOptions::new().write(true).create_new(true).open(&path) {
        Ok(mut file) => {
            use std::io::Write;
            file.write_all(spec.boilerplate.as_bytes())
                .map_err(|e| ShipaiError::file("write", &path, e))?;
            info!(path = %path.display(), assistant = %assistant, "created config file");
        }
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {}
        Err(e) => return Err(ShipaiError::file("create", &path, e)),
    }

    Ok(ConfigFile {
        path,
        assistant,
        exists: true,
    })
}

/// Look up the config file without creating anything.
pub fn locate_existing(assistant: AssistantType, project_root: &Path) -> Result<ConfigFile> {
    let spec = AssistantSpec::lookup(assistant)?;
    Ok(locate(spec, project_root).unwrap_or_else(|| ConfigFile {
        path: project_root.join(spec.default_path()),
        assistant,
        exists: false,
    }))
}

fn locate(spec: &AssistantSpec, project_root: &Path) -> Option<ConfigFile> {
    spec.candidates
        .iter()
        .map(|candidate| project_root.join(candidate))
        .find(|path| path.is_file())
        .map(|path| ConfigFile {
            path,
            assistant: spec.kind,
            exists: true,
        })
}
