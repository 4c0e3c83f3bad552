//! Supported AI coding assistants and where each keeps its rules file.

use crate::error::{Result, ShipaiError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// An AI coding assistant whose project config file can hold agent blocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AssistantType {
    ClaudeCode,
    Cursor,
    Windsurf,
    Codeium,
    Continue,
}

impl AssistantType {
    /// The assistant whose config file is created on demand.
    pub const PRIMARY: AssistantType = AssistantType::ClaudeCode;

    pub fn as_str(&self) -> &'static str {
        match self {
            AssistantType::ClaudeCode => "claude-code",
            AssistantType::Cursor => "cursor",
            AssistantType::Windsurf => "windsurf",
            AssistantType::Codeium => "codeium",
            AssistantType::Continue => "continue",
        }
    }

    pub fn is_primary(&self) -> bool {
        *self == Self::PRIMARY
    }
}

impl Default for AssistantType {
    fn default() -> Self {
        Self::PRIMARY
    }
}

impl fmt::Display for AssistantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssistantType {
    type Err = ShipaiError;

    fn from_str(s: &str) -> Result<Self> {
        ASSISTANTS
            .iter()
            .find(|spec| spec.kind.as_str() == s)
            .map(|spec| spec.kind)
            .ok_or_else(|| ShipaiError::UnknownAssistant(s.to_string()))
    }
}

/// Static description of one assistant's config file.
#[derive(Debug)]
pub struct AssistantSpec {
    pub kind: AssistantType,
    pub name: &'static str,
    /// Candidate paths relative to the project root, first match wins.
    pub candidates: &'static [&'static str],
    /// Block-free preamble written when the file is created.
    pub boilerplate: &'static str,
}

impl AssistantSpec {
    pub fn lookup(kind: AssistantType) -> Result<&'static AssistantSpec> {
        ASSISTANTS
            .iter()
            .find(|spec| spec.kind == kind)
            .ok_or_else(|| ShipaiError::UnknownAssistant(kind.to_string()))
    }

    /// Path a freshly created config file gets.
    pub fn default_path(&self) -> &'static str {
        self.candidates[0]
    }
}

pub static ASSISTANTS: &[AssistantSpec] = &[
    AssistantSpec {
        kind: AssistantType::ClaudeCode,
        name: "Claude Code",
        candidates: &["CLAUDE.md", ".claude/CLAUDE.md"],
        boilerplate: CLAUDE_BOILERPLATE,
    },
    AssistantSpec {
        kind: AssistantType::Cursor,
        name: "Cursor",
        candidates: &[".cursorrules"],
        boilerplate: CURSOR_BOILERPLATE,
    },
    AssistantSpec {
        kind: AssistantType::Windsurf,
        name: "Windsurf",
        candidates: &[".windsurfrules"],
        boilerplate: WINDSURF_BOILERPLATE,
    },
    AssistantSpec {
        kind: AssistantType::Codeium,
        name: "Codeium",
        candidates: &[".codeiumrules"],
        boilerplate: GENERIC_BOILERPLATE,
    },
    AssistantSpec {
        kind: AssistantType::Continue,
        name: "Continue",
        candidates: &[".continuerules"],
        boilerplate: GENERIC_BOILERPLATE,
    },
];

const CLAUDE_BOILERPLATE: &str = "# Claude Code Configuration

Project instructions for Claude Code. Agents installed with `shipai` live in
the section below; edit anything outside the agent markers freely.

## Installed Agents
";

const CURSOR_BOILERPLATE: &str = "# Cursor AI Assistant Rules

You are a helpful AI coding assistant. Follow these guidelines:

1. Always provide clear, well-commented code
2. Explain your reasoning before making changes
3. Ask for clarification when requirements are unclear
";

const WINDSURF_BOILERPLATE: &str = "# Windsurf AI Assistant Rules

You are Windsurf AI coding assistant. Please follow these guidelines:

1. Write clean, maintainable code
2. Provide explanations for complex changes
";

const GENERIC_BOILERPLATE: &str = "# AI Assistant Configuration

You are an AI coding assistant. Follow best practices and write clean, efficient code.
";
