//! Agent metadata and section declarations.
//!
//! Sections normally come from `metadata.json`. When that list is empty, a
//! `_sections.md` file next to the agent's metadata can declare them instead:
//!
//! ```text
//! ## 1. Eliminating Waterfalls (async)
//!
//! **Impact:** CRITICAL
//! **Description:** Waterfalls are the top performance killer.
//! ```
//!
//! A description runs until the next blank line, so it may wrap.

use std::collections::BTreeMap;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use rulebook_core::{AgentMetadata, ImpactLevel, SectionDescriptor};
use tracing::{debug, warn};

use crate::errors::{CompileError, Result};

static SECTION_HEADER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^##\s+(\d+)\.\s+(.+?)(?:\s+\(([^)]+)\))?\s*$").unwrap());

static FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\*\*(Impact|Description):\*\*\s*(.*?)\s*$").unwrap());

/// Load an agent's metadata file.
pub fn load_metadata(path: &Path, agent: &str) -> Result<AgentMetadata> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(CompileError::MetadataNotFound {
                agent: agent.to_string(),
                path: path.to_path_buf(),
            });
        }
        Err(e) => return Err(CompileError::io(path, e)),
    };

    serde_json::from_str(&content).map_err(|source| CompileError::MetadataJson {
        path: path.to_path_buf(),
        source,
    })
}

/// Section declarations for an agent: the metadata list, or `_sections.md`
/// when the metadata declares none. A missing or unreadable fallback file
/// yields no sections.
pub fn load_section_descriptors(
    metadata: &AgentMetadata,
    sections_path: &Path,
) -> Vec<SectionDescriptor> {
    if !metadata.sections.is_empty() {
        return metadata.sections.clone();
    }

    match std::fs::read_to_string(sections_path) {
        Ok(content) => {
            let descriptors = parse_sections_md(&content);
            debug!(
                path = %sections_path.display(),
                count = descriptors.len(),
                "loaded section declarations"
            );
            descriptors
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            warn!(path = %sections_path.display(), error = %e, "failed to read section declarations");
            Vec::new()
        }
    }
}

/// Parse `_sections.md` into descriptors positioned by their declared number.
///
/// Numbering gaps are filled with placeholders that carry no id, so the
/// section at position `n` is always the one declared as `n`.
pub fn parse_sections_md(content: &str) -> Vec<SectionDescriptor> {
    let mut declared: BTreeMap<u32, SectionDescriptor> = BTreeMap::new();
    let mut current: Option<u32> = None;
    let mut in_description = false;

    for line in content.lines() {
        let line = line.trim_end();

        if let Some(caps) = SECTION_HEADER_RE.captures(line) {
            in_description = false;
            let Ok(number) = caps[1].parse::<u32>() else {
                current = None;
                continue;
            };
            if number == 0 {
                current = None;
                continue;
            }
            let descriptor = SectionDescriptor {
                id: caps.get(3).map_or_else(String::new, |m| m.as_str().trim().to_string()),
                title: caps[2].to_string(),
                impact: ImpactLevel::Medium,
                description: None,
            };
            let _ = declared.insert(number, descriptor);
            current = Some(number);
            continue;
        }

        let Some(descriptor) = current.and_then(|n| declared.get_mut(&n)) else {
            continue;
        };
        let trimmed = line.trim_start();
        if let Some(caps) = FIELD_RE.captures(trimmed) {
            let value = caps[2].to_string();
            in_description = &caps[1] == "Description";
            if in_description {
                descriptor.description = (!value.is_empty()).then_some(value);
            } else {
                descriptor.impact = ImpactLevel::parse_lossy(&value);
            }
        } else if trimmed.is_empty() {
            in_description = false;
        } else if in_description {
            match descriptor.description.as_mut() {
                Some(description) => {
                    description.push('\n');
                    description.push_str(trimmed);
                }
                None => descriptor.description = Some(trimmed.to_string()),
            }
        }
    }

    let Some(&last) = declared.keys().next_back() else {
        return Vec::new();
    };
    (1..=last)
        .map(|n| {
            declared.remove(&n).unwrap_or_else(|| SectionDescriptor {
                id: String::new(),
                title: format!("Section {n}"),
                impact: ImpactLevel::Medium,
                description: None,
            })
        })
        .collect()
}
