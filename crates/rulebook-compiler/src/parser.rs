//! Rule file parsing.
//!
//! A rule file is optional frontmatter followed by a markdown body. Title and
//! impact come from frontmatter when set, else from the body (`## Heading`,
//! `**Impact: X**`), else from defaults. Everything after the first `##`
//! heading goes through the field extractor. The section comes from the
//! filename via [`SectionMap`].

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use rulebook_core::constants::UNTITLED;
use rulebook_core::{ImpactLevel, ParsedRule, Rule, split_frontmatter};
use tracing::debug;

use crate::errors::{CompileError, Result};
use crate::extract::extract_with_language;
use crate::section_map::SectionMap;

/// Maximum rule file size (1 MiB).
pub const MAX_RULE_FILE_SIZE: u64 = 1024 * 1024;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^##[ \t]+(.+?)[ \t]*$").unwrap());

static IMPACT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\*\*Impact:\s*(\w+(?:-\w+)?)").unwrap());

/// Read and parse one rule file.
pub fn parse_rule_file(
    path: &Path,
    sections: &SectionMap,
    default_language: &str,
) -> Result<ParsedRule> {
    let meta = std::fs::metadata(path).map_err(|e| CompileError::io(path, e))?;
    if meta.len() > MAX_RULE_FILE_SIZE {
        return Err(CompileError::FileTooLarge {
            path: path.to_path_buf(),
            size: meta.len(),
            max: MAX_RULE_FILE_SIZE,
        });
    }

    let content = std::fs::read_to_string(path).map_err(|e| CompileError::io(path, e))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or_default();

    Ok(parse_rule_source(file_name, &content, sections, default_language))
}

/// Parse rule text already in memory. `file_name` only drives section lookup.
pub fn parse_rule_source(
    file_name: &str,
    content: &str,
    sections: &SectionMap,
    default_language: &str,
) -> ParsedRule {
    let normalized = content.replace("\r\n", "\n");
    let (frontmatter, body) = split_frontmatter(&normalized);
    let fm = frontmatter.unwrap_or_default();

    let heading = HEADING_RE.captures(body);

    let title = fm
        .get_non_empty("title")
        .map(str::to_string)
        .or_else(|| heading.as_ref().map(|c| c[1].to_string()))
        .unwrap_or_else(|| UNTITLED.to_string());

    let impact = fm
        .get_non_empty("impact")
        .map(ImpactLevel::parse_lossy)
        .or_else(|| {
            IMPACT_RE
                .captures(body)
                .map(|c| ImpactLevel::parse_lossy(&c[1]))
        })
        .unwrap_or_default();

    let content = match heading.as_ref().and_then(|c| c.get(0)) {
        Some(m) => body[m.end()..].trim_start_matches(['\n', ' ', '\t']),
        None => body,
    };

    let extracted = extract_with_language(content, default_language);
    let section = sections.section_for_file(file_name);

    debug!(
        file = file_name,
        section,
        examples = extracted.examples.len(),
        "parsed rule"
    );

    ParsedRule {
        section,
        rule: Rule {
            id: String::new(),
            title,
            impact,
            impact_description: fm.get_non_empty("impactDescription").map(str::to_string),
            explanation: extracted.explanation,
            examples: extracted.examples,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulebook_core::constants::DEFAULT_LANGUAGE;

    fn map() -> SectionMap {
        [("arch", 1), ("std", 2)].into_iter().collect()
    }

    fn parse(name: &str, content: &str) -> ParsedRule {
        parse_rule_source(name, content, &map(), DEFAULT_LANGUAGE)
    }

    #[test]
    fn frontmatter_title_and_impact_win() {
        let content = "---\ntitle: From Frontmatter\nimpact: critical\n---\n\n## From Heading\n\n**Impact: LOW**\n\nText.";
        let parsed = parse("arch-x.md", content);
        assert_eq!(parsed.rule.title, "From Frontmatter");
        assert_eq!(parsed.rule.impact, ImpactLevel::Critical);
    }

    #[test]
    fn heading_and_body_impact_fallback() {
        let content = "## Memoize Expensive Work\n\n**Impact: MEDIUM-HIGH**\n\nExplain.";
        let parsed = parse("std-memo.md", content);
        assert_eq!(parsed.rule.title, "Memoize Expensive Work");
        assert_eq!(parsed.rule.impact, ImpactLevel::MediumHigh);
        assert_eq!(parsed.rule.explanation, "Explain.");
        assert_eq!(parsed.section, 2);
    }

    #[test]
    fn defaults_when_nothing_is_declared() {
        let parsed = parse("misc.md", "Just prose.");
        assert_eq!(parsed.rule.title, "Untitled");
        assert_eq!(parsed.rule.impact, ImpactLevel::Medium);
        assert_eq!(parsed.rule.explanation, "Just prose.");
        assert_eq!(parsed.section, 0);
    }

    #[test]
    fn empty_frontmatter_title_falls_through() {
        let parsed = parse("arch-a.md", "---\ntitle: \"\"\n---\n## Heading Title\n");
        assert_eq!(parsed.rule.title, "Heading Title");
    }

    #[test]
    fn unrecognized_impact_defaults_to_medium() {
        let parsed = parse("arch-a.md", "---\nimpact: enormous\n---\n## T\n");
        assert_eq!(parsed.rule.impact, ImpactLevel::Medium);
    }

    #[test]
    fn impact_description_from_frontmatter() {
        let content = "---\nimpact: HIGH\nimpactDescription: 2-10x faster\n---\n## T\n";
        let parsed = parse("arch-a.md", content);
        assert_eq!(parsed.rule.impact_description.as_deref(), Some("2-10x faster"));
    }

    #[test]
    fn text_before_heading_is_not_analyzed() {
        let content = "Preface that should vanish.\n\n## Title\n\nReal explanation.";
        let parsed = parse("arch-a.md", content);
        assert_eq!(parsed.rule.explanation, "Real explanation.");
    }

    #[test]
    fn crlf_line_endings_are_normalized() {
        let content = "---\r\ntitle: Windows\r\n---\r\n## Ignored\r\n\r\nBody.\r\n";
        let parsed = parse("arch-a.md", content);
        assert_eq!(parsed.rule.title, "Windows");
        assert_eq!(parsed.rule.explanation, "Body.");
    }

    #[test]
    fn level_three_heading_is_not_the_title() {
        let parsed = parse("arch-a.md", "### Not A Title\n\nBody.");
        assert_eq!(parsed.rule.title, "Untitled");
    }

    #[test]
    fn id_is_unset_after_parsing() {
        let parsed = parse("arch-a.md", "## T\n");
        assert!(parsed.rule.id.is_empty());
    }

    #[test]
    fn end_to_end_rule() {
        let content = "---\nimpact: high\n---\n\n## Use Hooks Correctly\n\n**Correct:**\n\n```tsx\nconst [s, set] = useState(0)\n```\n";
        let parsed = parse("arch-hooks.md", content);
        assert_eq!(parsed.section, 1);
        assert_eq!(parsed.rule.title, "Use Hooks Correctly");
        assert_eq!(parsed.rule.impact, ImpactLevel::High);
        assert_eq!(parsed.rule.impact.as_str(), "HIGH");
        assert_eq!(parsed.rule.examples.len(), 1);
        assert_eq!(parsed.rule.examples[0].label, "Correct");
        assert_eq!(parsed.rule.examples[0].language, "tsx");
        assert_eq!(parsed.rule.explanation, "**Correct:**");
    }

    #[test]
    fn parse_rule_file_reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("std-naming.md");
        std::fs::write(&path, "## Name Things Well\n\nClarity.").unwrap();

        let parsed = parse_rule_file(&path, &map(), DEFAULT_LANGUAGE).unwrap();
        assert_eq!(parsed.section, 2);
        assert_eq!(parsed.rule.title, "Name Things Well");
    }

    #[test]
    fn parse_rule_file_missing_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = parse_rule_file(&dir.path().join("nope.md"), &map(), DEFAULT_LANGUAGE)
            .unwrap_err();
        assert!(matches!(err, CompileError::Io { .. }));
    }

    #[test]
    fn parse_rule_file_rejects_oversized() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("arch-big.md");
        let big = "x".repeat(usize::try_from(MAX_RULE_FILE_SIZE).unwrap() + 1);
        std::fs::write(&path, big).unwrap();

        let err = parse_rule_file(&path, &map(), DEFAULT_LANGUAGE).unwrap_err();
        assert!(matches!(err, CompileError::FileTooLarge { .. }));
    }
}
