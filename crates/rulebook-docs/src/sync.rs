//! Docs tree synchronization.
//!
//! Output layout under the docs root:
//!
//! ```text
//! skills/index.mdx
//! skills/<skill>/index.mdx          from <skills>/<skill>/SKILL.md
//! skills/<skill>/rules/<rule>.mdx   from <skills>/<skill>/rules/<rule>.md
//! agents/index.mdx
//! agents/<agent>.mdx                from <agents>/<agent>/AGENTS.md
//! ```
//!
//! Both generated trees are removed before every run, so a sync always
//! reflects the current sources.

use std::path::{Path, PathBuf};

use rulebook_settings::RulebookSettings;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::errors::{Result, SyncError};
use crate::index::{Card, IndexKind, render_index};
use crate::page::Page;

/// Skill entry file inside a skill directory.
pub const SKILL_FILENAME: &str = "SKILL.md";

const INDEX_FILENAME: &str = "index.mdx";

/// Counts of what one sync produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Docs root that was written.
    pub output_root: PathBuf,
    /// Skill pages written.
    pub skills: usize,
    /// Skill rule pages written.
    pub skill_rules: usize,
    /// Agent pages written.
    pub agents: usize,
}

/// Regenerate the skills and agents trees under the docs root.
pub fn sync_docs(settings: &RulebookSettings) -> Result<SyncReport> {
    let output_root = settings.docs_output_path();
    clean_generated(&output_root)?;

    let mut report = SyncReport {
        output_root: output_root.clone(),
        ..SyncReport::default()
    };

    let skill_cards = sync_skills(settings, &output_root, &mut report)?;
    write_index(&output_root, IndexKind::Skills, &skill_cards)?;

    let agent_cards = sync_agents(settings, &output_root, &mut report)?;
    write_index(&output_root, IndexKind::Agents, &agent_cards)?;

    info!(
        output = %output_root.display(),
        skills = report.skills,
        skill_rules = report.skill_rules,
        agents = report.agents,
        "docs synced"
    );
    Ok(report)
}

fn clean_generated(output_root: &Path) -> Result<()> {
    for kind in [IndexKind::Skills, IndexKind::Agents] {
        let dir = output_root.join(kind.dir_name());
        if dir.exists() {
            std::fs::remove_dir_all(&dir).map_err(|e| SyncError::io(&dir, e))?;
            debug!(dir = %dir.display(), "removed generated docs");
        }
    }
    Ok(())
}

fn sync_skills(
    settings: &RulebookSettings,
    output_root: &Path,
    report: &mut SyncReport,
) -> Result<Vec<Card>> {
    let skills_root = settings.skills_path();
    let mut cards = Vec::new();

    for name in list_dirs(&skills_root)? {
        let source_dir = skills_root.join(&name);
        let target_dir = output_root.join(IndexKind::Skills.dir_name()).join(&name);
        create_dir(&target_dir)?;

        let skill_md = source_dir.join(SKILL_FILENAME);
        if skill_md.is_file() {
            let page = Page::parse(&read(&skill_md)?);
            let title = page.title_from(&["title", "name"], &name);
            cards.push(Card {
                name: name.clone(),
                title: title.clone(),
                description: page.description(),
            });
            write(&target_dir.join(INDEX_FILENAME), &page.render(&title))?;
            report.skills += 1;
        }

        let rules_dir = source_dir.join(&settings.rules_dir_name);
        let rule_files = list_markdown(&rules_dir)?;
        if rule_files.is_empty() {
            continue;
        }
        let rules_target = target_dir.join(&settings.rules_dir_name);
        create_dir(&rules_target)?;
        for path in &rule_files {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            let page = Page::parse(&read(path)?);
            let title = page.title_from(&["title"], &stem);
            write(&rules_target.join(format!("{stem}.mdx")), &page.render(&title))?;
        }
        report.skill_rules += rule_files.len();
        debug!(skill = %name, rules = rule_files.len(), "synced skill");
    }

    Ok(cards)
}

fn sync_agents(
    settings: &RulebookSettings,
    output_root: &Path,
    report: &mut SyncReport,
) -> Result<Vec<Card>> {
    let agents_root = settings.agents_path();
    let target_dir = output_root.join(IndexKind::Agents.dir_name());
    create_dir(&target_dir)?;
    let mut cards = Vec::new();

    for name in list_dirs(&agents_root)? {
        let document = agents_root.join(&name).join(&settings.output_filename);
        if !document.is_file() {
            debug!(agent = %name, "no compiled document, skipping");
            continue;
        }

        let page = Page::parse(&read(&document)?);
        let title = page.title_from(&["title"], &name);
        cards.push(Card {
            name: name.clone(),
            title: title.clone(),
            description: page.description(),
        });
        write(&target_dir.join(format!("{name}.mdx")), &page.render(&title))?;
        report.agents += 1;
    }

    Ok(cards)
}

fn write_index(output_root: &Path, kind: IndexKind, cards: &[Card]) -> Result<()> {
    let dir = output_root.join(kind.dir_name());
    create_dir(&dir)?;
    write(&dir.join(INDEX_FILENAME), &render_index(kind, cards))
}

/// Non-hidden sub-directory names, sorted. A missing directory is empty.
fn list_dirs(dir: &Path) -> Result<Vec<String>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.starts_with('.') {
            names.push(name);
        }
    }
    Ok(names)
}

/// `*.md` files directly inside `dir`, sorted. A missing directory is empty.
fn list_markdown(dir: &Path) -> Result<Vec<PathBuf>> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry?;
        let is_markdown = entry.path().extension().is_some_and(|ext| ext == "md");
        if entry.file_type().is_file() && is_markdown {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| SyncError::io(path, e))
}

fn write(path: &Path, content: &str) -> Result<()> {
    std::fs::write(path, content).map_err(|e| SyncError::io(path, e))
}

fn create_dir(path: &Path) -> Result<()> {
    std::fs::create_dir_all(path).map_err(|e| SyncError::io(path, e))
}
