//! Composite document rendering.
//!
//! [`render`] is a pure function of its inputs: header, abstract, table of
//! contents, then every section with its rules and examples. Anchors in the
//! table of contents come from [`crate::anchor`], the same transform a
//! markdown renderer applies to the headings.

use std::fmt::Write;

use rulebook_core::{AgentMetadata, CodeExample, Rule, Section};

use crate::anchor::{rule_anchor, section_anchor};

const SEPARATOR: &str = "---";

/// Render the full document.
pub fn render(sections: &[Section], metadata: &AgentMetadata) -> String {
    let mut out = String::new();

    let _ = write!(
        out,
        "# {}\n\n> Version {} | {}\n\n",
        metadata.title,
        metadata.version_or_default(),
        metadata.organization_or_default(),
    );
    let _ = write!(out, "## Abstract\n\n{}\n\n{SEPARATOR}\n\n", metadata.abstract_text);

    render_toc(&mut out, sections);
    let _ = write!(out, "\n{SEPARATOR}\n\n");

    for section in sections {
        render_section(&mut out, section);
    }

    out
}

fn render_toc(out: &mut String, sections: &[Section]) {
    out.push_str("## Table of Contents\n\n");
    for section in sections {
        let _ = writeln!(
            out,
            "{n}. [{title}](#{anchor}) — **{impact}**",
            n = section.number,
            title = section.title,
            anchor = section_anchor(section.number, &section.title),
            impact = section.impact,
        );
        for rule in &section.rules {
            let _ = writeln!(
                out,
                "   - {id} [{title}](#{anchor})",
                id = rule.id,
                title = rule.title,
                anchor = rule_anchor(&rule.id, &rule.title),
            );
        }
    }
}

fn render_section(out: &mut String, section: &Section) {
    let _ = write!(
        out,
        "## {}. {}\n\n**Impact: {}**\n\n",
        section.number, section.title, section.impact
    );
    if let Some(description) = section.description.as_deref().filter(|d| !d.is_empty()) {
        let _ = write!(out, "{description}\n\n");
    }

    for rule in &section.rules {
        render_rule(out, rule);
    }

    let _ = write!(out, "{SEPARATOR}\n\n");
}

fn render_rule(out: &mut String, rule: &Rule) {
    let _ = write!(out, "### {} {}\n\n**Impact: {}", rule.id, rule.title, rule.impact);
    if let Some(remark) = rule.impact_description.as_deref().filter(|d| !d.is_empty()) {
        let _ = write!(out, " ({remark})");
    }
    out.push_str("**\n\n");

    if !rule.explanation.is_empty() {
        let _ = write!(out, "{}\n\n", rule.explanation);
    }

    for example in &rule.examples {
        render_example(out, example);
    }
}

fn render_example(out: &mut String, example: &CodeExample) {
    if !example.label.is_empty() {
        out.push_str("**");
        out.push_str(&example.label);
        if let Some(description) = example.description.as_deref().filter(|d| !d.is_empty()) {
            let _ = write!(out, " ({description})");
        }
        out.push_str(":**\n\n");
    }
    let _ = write!(
        out,
        "```{}\n{}\n```\n\n",
        example.language, example.code
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulebook_core::ImpactLevel;

    fn metadata() -> AgentMetadata {
        AgentMetadata {
            title: "React Best Practices".to_string(),
            abstract_text: "Guidance for React apps.".to_string(),
            version: None,
            organization: Some("Frontend".to_string()),
            sections: Vec::new(),
        }
    }

    fn rule(id: &str, title: &str) -> Rule {
        Rule {
            id: id.to_string(),
            title: title.to_string(),
            impact: ImpactLevel::High,
            impact_description: None,
            explanation: "Why it matters.".to_string(),
            examples: vec![CodeExample {
                label: "Correct".to_string(),
                description: None,
                code: "useEffect(() => {}, [])".to_string(),
                language: "tsx".to_string(),
            }],
        }
    }

    fn sections() -> Vec<Section> {
        vec![Section {
            number: 1,
            title: "Use Server Components".to_string(),
            impact: ImpactLevel::Critical,
            description: Some("Render on the server.".to_string()),
            rules: vec![rule("1.1", "Don't Over-fetch!")],
        }]
    }

    #[test]
    fn full_document_layout() {
        let doc = render(&sections(), &metadata());
        let expected = "\
# React Best Practices

> Version 1.0.0 | Frontend

## Abstract

Guidance for React apps.

---

## Table of Contents

1. [Use Server Components](#1-use-server-components) — **CRITICAL**
   - 1.1 [Don't Over-fetch!](#11-dont-over-fetch)

---

## 1. Use Server Components

**Impact: CRITICAL**

Render on the server.

### 1.1 Don't Over-fetch!

**Impact: HIGH**

Why it matters.

**Correct:**

```tsx
useEffect(() => {}, [])
```

---

";
        assert_eq!(doc, expected);
    }

    #[test]
    fn rendering_is_deterministic() {
        let s = sections();
        let m = metadata();
        assert_eq!(render(&s, &m), render(&s, &m));
    }

    #[test]
    fn impact_description_is_appended() {
        let mut s = sections();
        s[0].rules[0].impact_description = Some("2-10x improvement".to_string());
        let doc = render(&s, &metadata());
        assert!(doc.contains("**Impact: HIGH (2-10x improvement)**"));
    }

    #[test]
    fn caption_description_is_rendered() {
        let mut s = sections();
        s[0].rules[0].examples[0].description = Some("cached".to_string());
        let doc = render(&s, &metadata());
        assert!(doc.contains("**Correct (cached):**\n\n```tsx"));
    }

    #[test]
    fn empty_label_skips_caption() {
        let mut s = sections();
        s[0].rules[0].examples[0].label = String::new();
        let doc = render(&s, &metadata());
        assert!(doc.contains("Why it matters.\n\n```tsx"));
    }

    #[test]
    fn empty_explanation_and_description_are_omitted() {
        let mut s = sections();
        s[0].description = None;
        s[0].rules[0].explanation = String::new();
        let doc = render(&s, &metadata());
        assert!(doc.contains("## 1. Use Server Components\n\n**Impact: CRITICAL**\n\n### 1.1"));
        assert!(doc.contains("**Impact: HIGH**\n\n**Correct:**"));
    }

    #[test]
    fn no_sections_still_renders_header() {
        let doc = render(&[], &metadata());
        assert!(doc.starts_with("# React Best Practices\n\n> Version 1.0.0 | Frontend"));
        assert!(doc.ends_with("## Table of Contents\n\n\n---\n\n"));
    }

    #[test]
    fn toc_anchors_match_heading_anchors() {
        let doc = render(&sections(), &metadata());
        assert!(doc.contains("(#1-use-server-components)"));
        assert!(doc.contains("## 1. Use Server Components"));
        assert_eq!(crate::anchor::to_anchor("1.1 Don't Over-fetch!"), "11-dont-over-fetch");
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn render_is_a_function_of_its_inputs(
                titles in proptest::collection::vec("[A-Za-z' !-]{1,20}", 0..6)
            ) {
                let rules: Vec<Rule> = titles
                    .iter()
                    .enumerate()
                    .map(|(i, t)| rule(&format!("1.{}", i + 1), t))
                    .collect();
                let s = vec![Section {
                    number: 1,
                    title: "S".to_string(),
                    impact: ImpactLevel::Medium,
                    description: None,
                    rules,
                }];
                let m = metadata();
                prop_assert_eq!(render(&s, &m), render(&s, &m));
            }
        }
    }
}
