//! Single page republishing.

use rulebook_core::{Frontmatter, split_frontmatter};

/// A markdown page split into frontmatter and body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    frontmatter: Frontmatter,
    body: String,
}

impl Page {
    /// Split `content`. A page without frontmatter starts with an empty block.
    pub fn parse(content: &str) -> Self {
        let normalized = content.replace("\r\n", "\n");
        let (frontmatter, body) = split_frontmatter(&normalized);
        Self {
            frontmatter: frontmatter.unwrap_or_default(),
            body: body.to_string(),
        }
    }

    /// Non-empty frontmatter value.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.frontmatter.get_non_empty(key)
    }

    /// First non-empty value among `keys`, else `fallback`.
    pub fn title_from(&self, keys: &[&str], fallback: &str) -> String {
        keys.iter()
            .find_map(|key| self.field(key))
            .unwrap_or(fallback)
            .to_string()
    }

    /// `description` field, or empty.
    pub fn description(&self) -> String {
        self.field("description").unwrap_or_default().to_string()
    }

    /// Render with `title` set and `svg` fences retagged as `xml`.
    pub fn render(mut self, title: &str) -> String {
        self.frontmatter.set("title", title);
        let body = self.body.replace("```svg", "```xml");
        self.frontmatter.to_document(&body)
    }
}

/// Republish `content` with `title` ensured in its frontmatter.
pub fn publish_page(content: &str, title: &str) -> String {
    Page::parse(content).render(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn existing_keys_are_preserved_in_order() {
        let content = "---\nname: react\ndescription: React tips\nmetadata:\n  author: x\n---\n# Body\n";
        let out = publish_page(content, "React");
        assert_eq!(
            out,
            "---\nname: react\ndescription: React tips\nmetadata:\n  author: x\ntitle: React\n---\n# Body\n"
        );
    }

    #[test]
    fn existing_title_is_replaced_in_place() {
        let out = publish_page("---\ntitle: Old\nname: n\n---\nBody", "New");
        assert_eq!(out, "---\ntitle: New\nname: n\n---\nBody\n");
    }

    #[test]
    fn page_without_frontmatter_gains_one() {
        let out = publish_page("# Heading\n", "Heading");
        assert_eq!(out, "---\ntitle: Heading\n---\n# Heading\n");
    }

    #[test]
    fn svg_fences_become_xml() {
        let out = publish_page("```svg\n<svg/>\n```\n```ts\nx\n```\n", "T");
        assert!(out.contains("```xml\n<svg/>"));
        assert!(out.contains("```ts\nx"));
        assert!(!out.contains("```svg"));
    }

    #[test]
    fn title_resolution_order() {
        let page = Page::parse("---\nname: skill-name\ntitle: \"\"\n---\n");
        assert_eq!(page.title_from(&["title", "name"], "dir"), "skill-name");
        assert_eq!(page.title_from(&["title"], "dir"), "dir");
    }

    #[test]
    fn title_needing_quotes_is_quoted() {
        let out = publish_page("Body\n", "Hooks: a guide");
        assert!(out.starts_with("---\ntitle: \"Hooks: a guide\"\n---\n"));
    }

    #[test]
    fn description_defaults_to_empty() {
        assert_eq!(Page::parse("no frontmatter").description(), "");
        assert_eq!(
            Page::parse("---\ndescription: Fast apps\n---\n").description(),
            "Fast apps"
        );
    }
}
