//! Catalog of installable AI agent prompts.
//!
//! The catalog ships inside the binary as `catalog/agents.toml`:
//!
//! ```toml
//! [[categories]]
//! id = "safety-security"
//! name = "Safety & Security"
//!
//! [[agents]]
//! id = "safety-guardian"
//! name = "Safety Guardian"
//! category = "safety-security"
//! description = "Stops destructive commands before they run"
//! key_features = ["Confirmation prompts"]
//! use_cases = ["Large refactors"]
//! prompt = "..."
//! supported_assistants = ["claude-code", "cursor"]
//! featured = true
//! ```

pub mod definition;
pub mod registry;

pub use definition::{AgentDefinition, Category};
pub use registry::{AgentCatalog, ALL_CATEGORIES};
