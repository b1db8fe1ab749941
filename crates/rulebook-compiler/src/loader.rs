//! Rule and agent discovery.

use std::path::{Path, PathBuf};

use tracing::warn;
use walkdir::WalkDir;

use crate::errors::{CompileError, Result};

/// Markdown rule files directly inside `rules_dir`, sorted by name.
///
/// Files whose name starts with `_` (such as `_sections.md`) are skipped.
pub fn discover_rule_files(rules_dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(rules_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
    {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(rules_dir).to_path_buf();
            CompileError::io(path, e.into())
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy();
        if name.starts_with('_') || !name.ends_with(".md") {
            continue;
        }
        files.push(entry.into_path());
    }

    Ok(files)
}

/// Names of sub-directories of `agents_dir`, sorted. A missing directory has
/// no agents.
pub fn discover_agent_dirs(agents_dir: &Path) -> Vec<String> {
    if !agents_dir.is_dir() {
        return Vec::new();
    }

    WalkDir::new(agents_dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!(dir = %agents_dir.display(), error = %e, "failed to read agents directory entry");
                None
            }
        })
        .filter(|entry| entry.file_type().is_dir())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| !name.starts_with('.'))
        .collect()
}
