//! Marker-delimited agent blocks inside a shared config file.
//!
//! A block looks like:
//!
//! ```text
//! <!-- Agent: safety-guardian -->
//! # Safety Guardian
//!
//! **Category:** safety-security
//! **Version:** 1.0.0
//! **Installed:** 2024-05-01
//! ...
//! <!-- End Agent: safety-guardian -->
//! ```
//!
//! Every operation here is a pure `&str -> String` transformation. Markers
//! are tokenized first and then paired by a two-state machine (outside a
//! block / inside a block), so a start marker without a matching end marker
//! is never treated as a block and never cut out of the file.
//!
//! Ids are not escaped: an id or prompt that itself contains marker text
//! can confuse pairing.
//!
//! Headings are matched line by line without tracking the user's own code
//! fences, so a `## Installed Agents` line inside a fenced example outside
//! any block still counts as the agents section.

use crate::catalog::AgentDefinition;
use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;
use tracing::trace;

/// Version reported for blocks that carry no version line.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Section headings under which new blocks are grouped (matched case-insensitively).
const AGENT_SECTION_HEADINGS: &[&str] = &["agents", "ai agents", "installed agents"];

static MARKER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<!-- (End )?Agent: ([A-Za-z0-9_-]+) -->").expect("marker pattern is valid")
});

static BLANK_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n{3,}").expect("blank-line pattern is valid"));

static VALID_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("id pattern is valid"));

/// Whether `id` can be written into a marker and read back unchanged.
pub fn is_valid_id(id: &str) -> bool {
    VALID_ID.is_match(id)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MarkerKind {
    Start,
    End,
}

#[derive(Debug, Clone)]
struct Marker<'a> {
    kind: MarkerKind,
    id: &'a str,
    range: Range<usize>,
}

fn tokenize(content: &str) -> impl Iterator<Item = Marker<'_>> {
    MARKER.captures_iter(content).filter_map(|caps| {
        let whole = caps.get(0)?;
        let id = caps.get(2)?.as_str();
        let kind = if caps.get(1).is_some() {
            MarkerKind::End
        } else {
            MarkerKind::Start
        };
        Some(Marker {
            kind,
            id,
            range: whole.range(),
        })
    })
}

/// A well-formed block located in some content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockSpan<'a> {
    pub id: &'a str,
    /// From the first byte of the start marker to just past the end marker.
    pub span: Range<usize>,
    /// Text between the two markers.
    pub body: &'a str,
}

/// Pair start and end markers into blocks, in file order.
pub fn blocks(content: &str) -> Vec<BlockSpan<'_>> {
    let mut found = Vec::new();
    let mut open: Option<Marker<'_>> = None;

    for marker in tokenize(content) {
        match (marker.kind, open.take()) {
            (MarkerKind::Start, previous) => {
                if let Some(previous) = previous {
                    trace!(id = previous.id, "dropping unterminated agent block");
                }
                open = Some(marker);
            }
            (MarkerKind::End, Some(start)) if start.id == marker.id => {
                found.push(BlockSpan {
                    id: start.id,
                    span: start.range.start..marker.range.end,
                    body: &content[start.range.end..marker.range.start],
                });
            }
            (MarkerKind::End, still_open) => {
                // Stray end marker: leave whatever is open untouched
                open = still_open;
            }
        }
    }

    if let Some(unterminated) = open {
        trace!(id = unterminated.id, "agent block has no end marker");
    }
    found
}

/// Whether `content` holds a well-formed block for `id`.
pub fn contains(content: &str, id: &str) -> bool {
    blocks(content).iter().any(|b| b.id == id)
}

/// Render `agent` as a block stamped with today's date.
pub fn encode(agent: &AgentDefinition) -> String {
    encode_on(agent, Utc::now().date_naive())
}

/// Render `agent` as a block stamped with `installed_on`.
pub fn encode_on(agent: &AgentDefinition, installed_on: NaiveDate) -> String {
    let mut out = format!("<!-- Agent: {} -->\n", agent.id);
    out.push_str(&format!("# {}\n\n", agent.name));
    out.push_str(&format!("**Category:** {}\n", agent.category));
    out.push_str(&format!("**Version:** {}\n", agent.version));
    out.push_str(&format!("**Installed:** {}\n\n", installed_on.format("%Y-%m-%d")));

    out.push_str(&format!("## Description\n{}\n\n", agent.description));

    out.push_str("## Key Features\n");
    for feature in &agent.key_features {
        out.push_str(&format!("- {}\n", feature));
    }
    out.push('\n');

    out.push_str("## Use Cases\n");
    for use_case in &agent.use_cases {
        out.push_str(&format!("- {}\n", use_case));
    }
    out.push('\n');

    let fence = fence_for(&agent.prompt);
    out.push_str("## Agent Prompt\n");
    out.push_str(&format!("{fence}\n{}\n{fence}\n\n", agent.prompt));

    if !agent.supported_assistants.is_empty() {
        out.push_str("## Supported Assistants\n");
        for assistant in &agent.supported_assistants {
            out.push_str(&format!("- {}\n", assistant));
        }
        out.push('\n');
    }

    out.push_str(&format!("<!-- End Agent: {} -->\n", agent.id));
    out
}

/// A backtick fence longer than any backtick run inside `text`.
fn fence_for(text: &str) -> String {
    let mut longest = 0;
    let mut run = 0;
    for c in text.chars() {
        if c == '`' {
            run += 1;
            longest = longest.max(run);
        } else {
            run = 0;
        }
    }
    "`".repeat((longest + 1).max(3))
}

/// Delete every block for `id`, along with the newlines trailing it.
///
/// Returns `content` unchanged when no such block exists. Otherwise runs of
/// three or more newlines outside blocks are collapsed to two and the
/// result is trimmed.
pub fn remove(content: &str, id: &str) -> String {
    let targets: Vec<Range<usize>> = blocks(content)
        .into_iter()
        .filter(|b| b.id == id)
        .map(|b| b.span)
        .collect();

    if targets.is_empty() {
        return content.to_string();
    }

    let mut out = String::with_capacity(content.len());
    let mut cursor = 0;
    for span in targets {
        out.push_str(&content[cursor..span.start]);
        cursor = span.end;
        let padding = content[cursor..]
            .bytes()
            .take_while(|b| *b == b'\n' || *b == b'\r')
            .count();
        cursor += padding;
    }
    out.push_str(&content[cursor..]);

    normalize(&out)
}

/// Replace (or add) the block for `agent`, stamped with today's date.
pub fn upsert(content: &str, agent: &AgentDefinition) -> String {
    upsert_on(content, agent, Utc::now().date_naive())
}

/// Replace (or add) the block for `agent`.
///
/// The old block is removed first; the new one goes at the end of the
/// agents section when the content has one, otherwise at the end.
pub fn upsert_on(content: &str, agent: &AgentDefinition, installed_on: NaiveDate) -> String {
    let base = remove(content, &agent.id);
    let at = insertion_point(&base);
    let block = encode_on(agent, installed_on);

    let mut out = String::with_capacity(base.len() + block.len() + 4);
    out.push_str(&base[..at]);
    out.push_str("\n\n");
    out.push_str(&block);
    out.push_str("\n\n");
    out.push_str(&base[at..]);

    normalize(&out)
}

/// Byte offset where a new block belongs.
///
/// Headings inside existing blocks are ignored, so the offset never falls
/// inside a block.
fn insertion_point(content: &str) -> usize {
    let existing = blocks(content);
    let inside_block = |offset: usize| existing.iter().any(|b| b.span.contains(&offset));

    let mut in_agents_section = false;
    let mut offset = 0;
    for line in content.split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();
        if inside_block(line_start) {
            continue;
        }

        let Some((level, title)) = heading(line) else {
            continue;
        };
        if in_agents_section {
            if level <= 2 {
                return line_start;
            }
        } else if level == 2 && is_agents_heading(title) {
            in_agents_section = true;
        }
    }

    content.len()
}

/// Parse a markdown ATX heading into its level and title.
fn heading(line: &str) -> Option<(usize, &str)> {
    let line = line.trim_end();
    let level = line.bytes().take_while(|b| *b == b'#').count();
    if level == 0 || level > 6 {
        return None;
    }
    let rest = &line[level..];
    if rest.is_empty() {
        return Some((level, ""));
    }
    rest.strip_prefix(' ').map(|title| (level, title.trim()))
}

fn is_agents_heading(title: &str) -> bool {
    let title = title.to_lowercase();
    AGENT_SECTION_HEADINGS.contains(&title.as_str())
}

/// Collapse blank-line runs outside blocks and trim the result.
fn normalize(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut cursor = 0;
    for block in blocks(content) {
        out.push_str(&BLANK_RUN.replace_all(&content[cursor..block.span.start], "\n\n"));
        out.push_str(&content[block.span.clone()]);
        cursor = block.span.end;
    }
    out.push_str(&BLANK_RUN.replace_all(&content[cursor..], "\n\n"));
    out.trim().to_string()
}

/// Metadata read back out of one block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedBlock {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub version: String,
    pub installed_on: NaiveDate,
    pub span: Range<usize>,
}

/// Read every well-formed block in file order.
///
/// Missing fields fall back to: the id for the name, [`DEFAULT_VERSION`]
/// for the version, today for the install date.
pub fn scan(content: &str) -> Vec<ScannedBlock> {
    let today = Utc::now().date_naive();
    blocks(content)
        .into_iter()
        .map(|block| {
            let name = block
                .body
                .lines()
                .find_map(|line| line.trim().strip_prefix("# "))
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| block.id.to_string());

            ScannedBlock {
                id: block.id.to_string(),
                name,
                category: labeled(block.body, "Category"),
                version: labeled(block.body, "Version")
                    .unwrap_or_else(|| DEFAULT_VERSION.to_string()),
                installed_on: labeled(block.body, "Installed")
                    .and_then(|value| parse_date(&value))
                    .unwrap_or(today),
                span: block.span,
            }
        })
        .collect()
}

/// Value of the first `Label: value` line, with markdown bold stripped.
fn labeled(body: &str, label: &str) -> Option<String> {
    body.lines().find_map(|line| {
        let plain = line.trim().replace("**", "");
        let value = plain.strip_prefix(label)?.strip_prefix(':')?.trim();
        (!value.is_empty()).then(|| value.to_string())
    })
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}
