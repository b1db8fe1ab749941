//! Settings loading with deep merge and environment variable overrides.
//!
//! Loading flow:
//! 1. Start with compiled [`RulebookSettings::default()`]
//! 2. If `<root>/rulebook.json` exists, deep-merge its values over defaults
//! 3. Apply `RULEBOOK_*` environment overrides (highest priority)
//! 4. Validate
//!
//! Deep merge rules:
//! - Objects are merged recursively (source overrides target per-key)
//! - Arrays and primitives are replaced entirely by source
//! - Null values in source are skipped (preserving target)

use std::path::{Path, PathBuf};

use serde_json::Value;
use tracing::debug;

use crate::errors::Result;
use crate::types::RulebookSettings;

/// Settings file name looked up in the root directory.
pub const SETTINGS_FILENAME: &str = "rulebook.json";

/// Resolve the settings file for a root directory.
pub fn settings_path(root: &Path) -> PathBuf {
    root.join(SETTINGS_FILENAME)
}

/// Load settings for `root` from `<root>/rulebook.json` and the process
/// environment.
pub fn load_settings(root: &Path) -> Result<RulebookSettings> {
    load_settings_from_path(&settings_path(root), root)
}

/// Load settings from a specific file, anchored at `root`.
///
/// A missing file yields defaults. Invalid JSON is an error.
pub fn load_settings_from_path(path: &Path, root: &Path) -> Result<RulebookSettings> {
    load_settings_with(path, root, |name| std::env::var(name).ok())
}

/// Load settings with an explicit environment lookup.
pub fn load_settings_with<F>(path: &Path, root: &Path, env: F) -> Result<RulebookSettings>
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = serde_json::to_value(RulebookSettings::default())?;

    let merged = if path.exists() {
        debug!(?path, "loading settings from file");
        let content = std::fs::read_to_string(path)?;
        let user: Value = serde_json::from_str(&content)?;
        deep_merge(defaults, user)
    } else {
        debug!(?path, "settings file not found, using defaults");
        defaults
    };

    let mut settings: RulebookSettings = serde_json::from_value(merged)?;
    settings.root = root.to_path_buf();
    apply_env_overrides(&mut settings, env);
    settings.validate()?;
    Ok(settings)
}

/// Recursive deep merge of two JSON values.
pub fn deep_merge(target: Value, source: Value) -> Value {
    match (target, source) {
        (Value::Object(mut target_map), Value::Object(source_map)) => {
            for (key, source_val) in source_map {
                if source_val.is_null() {
                    continue;
                }
                let merged = if let Some(target_val) = target_map.remove(&key) {
                    deep_merge(target_val, source_val)
                } else {
                    source_val
                };
                let _ = target_map.insert(key, merged);
            }
            Value::Object(target_map)
        }
        (_, source) => source,
    }
}

/// Apply `RULEBOOK_*` overrides. Empty values are ignored.
pub fn apply_env_overrides<F>(settings: &mut RulebookSettings, env: F)
where
    F: Fn(&str) -> Option<String>,
{
    let read = |name: &str| env(name).filter(|v| !v.trim().is_empty());

    if let Some(v) = read("RULEBOOK_AGENTS_DIR") {
        settings.agents_dir = v;
    }
    if let Some(v) = read("RULEBOOK_SKILLS_DIR") {
        settings.skills_dir = v;
    }
    if let Some(v) = read("RULEBOOK_DOCS_OUTPUT_DIR") {
        settings.docs_output_dir = v;
    }
    if let Some(v) = read("RULEBOOK_AGENTS") {
        settings.agents = parse_list(&v);
    }
    if let Some(v) = read("RULEBOOK_DEFAULT_LANGUAGE") {
        settings.default_language = v;
    }
    if let Some(v) = read("RULEBOOK_LOG_LEVEL") {
        settings.logging.level = v;
    }
}

/// Split a comma-separated list, dropping blanks.
pub fn parse_list(val: &str) -> Vec<String> {
    val.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
