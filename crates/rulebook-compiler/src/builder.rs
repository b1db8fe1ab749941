//! Per-agent build orchestration.
//!
//! One build reads the agent's metadata, parses every rule file concurrently
//! on the blocking pool, aggregates and renders, then writes the document in
//! a single write. Metadata and rules-directory problems abort the agent
//! before anything is written. A rule file that fails to parse is logged,
//! recorded in the [`BuildReport`], and left out of the document.

use std::path::PathBuf;
use std::sync::Arc;

use rulebook_core::ParsedRule;
use rulebook_settings::RulebookSettings;
use tokio::task::JoinSet;
use tracing::{error, info, warn};

use crate::aggregate::aggregate;
use crate::errors::{CompileError, Result};
use crate::loader::{discover_agent_dirs, discover_rule_files};
use crate::metadata::{load_metadata, load_section_descriptors};
use crate::parser::parse_rule_file;
use crate::render::render;
use crate::section_map::SectionMap;

/// A rule file left out of the build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFailure {
    /// The file that failed.
    pub file: PathBuf,
    /// Rendered error.
    pub error: String,
}

/// Outcome of one successful agent build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Agent name.
    pub agent: String,
    /// Where the document was written.
    pub output_path: PathBuf,
    /// Number of sections in the document.
    pub section_count: usize,
    /// Number of rules in the document.
    pub rule_count: usize,
    /// Rule files that were skipped.
    pub failures: Vec<RuleFailure>,
}

/// Agents that can be built: the configured list, or every directory under
/// the agents root when none is configured.
pub fn available_agents(settings: &RulebookSettings) -> Vec<String> {
    if settings.agents.is_empty() {
        discover_agent_dirs(&settings.agents_path())
    } else {
        settings.agents.clone()
    }
}

/// Check that `name` is a buildable agent.
pub fn resolve_agent(settings: &RulebookSettings, name: &str) -> Result<()> {
    let available = available_agents(settings);
    if available.iter().any(|a| a == name) {
        Ok(())
    } else {
        Err(CompileError::UnknownAgent {
            name: name.to_string(),
            available,
        })
    }
}

/// Parse rule files concurrently. Results come back in `files` order no
/// matter which task finishes first.
pub async fn parse_rules(
    files: Vec<PathBuf>,
    sections: Arc<SectionMap>,
    default_language: &str,
) -> Result<(Vec<ParsedRule>, Vec<RuleFailure>)> {
    let mut tasks = JoinSet::new();
    for (idx, path) in files.iter().cloned().enumerate() {
        let sections = Arc::clone(&sections);
        let language = default_language.to_string();
        let _ = tasks.spawn_blocking(move || (idx, parse_rule_file(&path, &sections, &language)));
    }

    let mut slots: Vec<Option<Result<ParsedRule>>> = files.iter().map(|_| None).collect();
    while let Some(joined) = tasks.join_next().await {
        let (idx, result) = joined.map_err(|e| CompileError::Join(e.to_string()))?;
        slots[idx] = Some(result);
    }

    let mut parsed = Vec::with_capacity(files.len());
    let mut failures = Vec::new();
    for (path, slot) in files.into_iter().zip(slots) {
        match slot {
            Some(Ok(rule)) => parsed.push(rule),
            Some(Err(e)) => {
                let file = path
                    .file_name()
                    .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned());
                warn!(file = %file, error = %e, "failed to parse rule file");
                failures.push(RuleFailure {
                    file: path,
                    error: e.to_string(),
                });
            }
            None => {}
        }
    }

    Ok((parsed, failures))
}

/// Build one agent's document.
pub async fn build_agent(settings: &RulebookSettings, agent: &str) -> Result<BuildReport> {
    resolve_agent(settings, agent)?;

    let metadata = load_metadata(&settings.metadata_path(agent), agent)?;

    let rules_dir = settings.rules_dir(agent);
    if !rules_dir.is_dir() {
        return Err(CompileError::RulesDirNotFound {
            agent: agent.to_string(),
            path: rules_dir,
        });
    }

    let descriptors = load_section_descriptors(&metadata, &settings.sections_path(agent));
    let section_map = Arc::new(SectionMap::from_descriptors(&descriptors));
    let files = discover_rule_files(&rules_dir)?;
    info!(agent, files = files.len(), sections = descriptors.len(), "building agent");

    let (parsed, failures) = parse_rules(files, section_map, &settings.default_language).await?;

    let sections = aggregate(parsed, &descriptors);
    let document = render(&sections, &metadata);

    let output_path = settings.output_path(agent);
    tokio::fs::write(&output_path, document)
        .await
        .map_err(|e| CompileError::io(&output_path, e))?;

    let report = BuildReport {
        agent: agent.to_string(),
        output_path,
        section_count: sections.len(),
        rule_count: sections.iter().map(|s| s.rules.len()).sum(),
        failures,
    };
    info!(
        agent,
        output = %report.output_path.display(),
        sections = report.section_count,
        rules = report.rule_count,
        failed = report.failures.len(),
        "agent built"
    );
    Ok(report)
}

/// Build every available agent in order. A failing agent does not stop the
/// others.
pub async fn build_all(settings: &RulebookSettings) -> Vec<(String, Result<BuildReport>)> {
    let mut results = Vec::new();
    for agent in available_agents(settings) {
        let result = build_agent(settings, &agent).await;
        if let Err(e) = &result {
            error!(agent = %agent, error = %e, "agent build failed");
        }
        results.push((agent, result));
    }
    results
}
