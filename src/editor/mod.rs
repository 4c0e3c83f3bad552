//! Editing agent blocks inside AI assistant config files.
//!
//! Agents are stored as marker-delimited blocks in the same file the
//! assistant already reads (`CLAUDE.md`, `.cursorrules`, ...). There is no
//! separate index: the file is the registry.
//!
//! # Components
//!
//! - [`assistant`]: static table of assistants and their candidate paths
//! - [`locator`]: find or create an assistant's config file
//! - [`backup`]: timestamped copies taken before a mutation
//! - [`block`]: encode, scan, remove and upsert blocks in text
//! - [`installed`]: installed agents read back from a file
//! - [`pipeline`]: batched read, backup, mutate, write
//! - [`export`]: whole-file snapshots for moving a config between projects
//!
//! Concurrent invocations against the same file are not coordinated; the
//! last writer wins.

pub mod assistant;
pub mod backup;
pub mod block;
pub mod export;
pub mod installed;
pub mod locator;
pub mod pipeline;

pub use assistant::{AssistantSpec, AssistantType, ASSISTANTS};
pub use export::ConfigExport;
pub use installed::{list_installed, InstalledAgentInfo};
pub use locator::{locate_existing, locate_or_create, ConfigFile};
pub use pipeline::{
    install_batch, remove_batch, replace_content, AgentOutcome, BatchOptions, BatchResult,
    OutcomeStatus,
};
