//! Generated card index pages.

use std::fmt::Write;

/// Which tree an index page lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexKind {
    /// `skills/index.mdx`
    Skills,
    /// `agents/index.mdx`
    Agents,
}

impl IndexKind {
    /// Directory name under the docs output root, also the href prefix.
    pub fn dir_name(self) -> &'static str {
        match self {
            Self::Skills => "skills",
            Self::Agents => "agents",
        }
    }

    fn title(self) -> &'static str {
        match self {
            Self::Skills => "Skills",
            Self::Agents => "Agents",
        }
    }

    fn summary(self) -> &'static str {
        match self {
            Self::Skills => "Browse all available skill guides",
            Self::Agents => "Explore preconfigured AI agents",
        }
    }

    fn intro(self) -> &'static str {
        match self {
            Self::Skills => "All available performance and best-practice skill guides.",
            Self::Agents => {
                "All preconfigured AI agents, each with its complete merged rule set."
            }
        }
    }
}

/// One entry of an index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    /// Directory or agent name, used in the link.
    pub name: String,
    /// Display title.
    pub title: String,
    /// Short description, possibly empty.
    pub description: String,
}

/// Render an index page listing `cards` in order.
pub fn render_index(kind: IndexKind, cards: &[Card]) -> String {
    let mut out = format!(
        "---\ntitle: {title}\ndescription: {summary}\n---\n\n# {title}\n\n{intro}\n\n<Cards>\n",
        title = kind.title(),
        summary = kind.summary(),
        intro = kind.intro(),
    );
    for card in cards {
        let _ = writeln!(
            out,
            "  <Card\n    title=\"{}\"\n    href=\"/{}/{}\"\n    description=\"{}\"\n  />",
            escape_attr(&card.title),
            kind.dir_name(),
            card.name,
            escape_attr(&card.description),
        );
    }
    out.push_str("</Cards>\n");
    out
}

/// Escape a value for a double-quoted JSX attribute.
fn escape_attr(value: &str) -> String {
    value.replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, title: &str, description: &str) -> Card {
        Card {
            name: name.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn skills_index_layout() {
        let out = render_index(IndexKind::Skills, &[card("react", "React", "Fast UIs")]);
        assert!(out.starts_with("---\ntitle: Skills\n"));
        assert!(out.contains("# Skills\n"));
        assert!(out.contains(
            "<Cards>\n  <Card\n    title=\"React\"\n    href=\"/skills/react\"\n    description=\"Fast UIs\"\n  />\n</Cards>\n"
        ));
    }

    #[test]
    fn agents_index_links_agents() {
        let out = render_index(IndexKind::Agents, &[card("next", "Next", "")]);
        assert!(out.contains("href=\"/agents/next\""));
        assert!(out.contains("description=\"\""));
    }

    #[test]
    fn quotes_are_escaped() {
        let out = render_index(IndexKind::Skills, &[card("q", "Say \"hi\"", "a \"b\"")]);
        assert!(out.contains("title=\"Say &quot;hi&quot;\""));
        assert!(out.contains("description=\"a &quot;b&quot;\""));
    }

    #[test]
    fn empty_index_has_empty_cards() {
        let out = render_index(IndexKind::Agents, &[]);
        assert!(out.ends_with("<Cards>\n</Cards>\n"));
    }
}
