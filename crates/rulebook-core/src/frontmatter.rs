//! Frontmatter splitting and pass-through editing.
//!
//! A frontmatter block is a `---` line at the very start of the document,
//! followed by `key: value` lines, closed by the next `---` line. Only flat
//! scalar keys are interpreted. Indented continuation lines, list items and
//! comments are carried along verbatim with the key they follow, so a block
//! can be re-emitted unchanged apart from the keys that were explicitly set.
//!
//! An indented `key: value` line is still a key when nothing can own it: at
//! the top of the block, or after a key that already holds a scalar value.

use crate::constants::FRONTMATTER_MARKER;

/// One top-level key with the source lines it spans.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    key: String,
    value: String,
    lines: Vec<String>,
}

/// Parsed frontmatter with keys in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frontmatter {
    preamble: Vec<String>,
    entries: Vec<Entry>,
}

impl Frontmatter {
    /// Parse the text between the two markers.
    pub fn parse(block: &str) -> Self {
        let mut fm = Self::default();

        for line in block.lines() {
            let nested_allowed = fm.entries.last().is_some_and(|entry| entry.value.is_empty());
            match parse_key_line(line, !nested_allowed) {
                Some((key, value)) => {
                    let _ = fm.remove(&key);
                    fm.entries.push(Entry {
                        key,
                        value,
                        lines: vec![line.to_string()],
                    });
                }
                None => match fm.entries.last_mut() {
                    Some(entry) => entry.lines.push(line.to_string()),
                    None => fm.preamble.push(line.to_string()),
                },
            }
        }

        fm
    }

    /// Scalar value of `key` with surrounding quotes removed.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.key == key)
            .map(|e| e.value.as_str())
    }

    /// Like [`get`](Self::get), but treats an empty value as absent.
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// Keys in source order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.key.as_str())
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the block declares no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or replace a scalar key. A replaced key keeps its position.
    pub fn set(&mut self, key: &str, value: &str) {
        let line = format!("{key}: {}", quote_scalar(value));
        let entry = Entry {
            key: key.to_string(),
            value: value.to_string(),
            lines: vec![line],
        };
        match self.entries.iter().position(|e| e.key == key) {
            Some(idx) => self.entries[idx] = entry,
            None => self.entries.push(entry),
        }
    }

    /// Remove a key, returning whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.key != key);
        before != self.entries.len()
    }

    /// Block contents (without markers), one line per source line.
    pub fn to_yaml(&self) -> String {
        let mut out = String::new();
        let lines = self
            .preamble
            .iter()
            .chain(self.entries.iter().flat_map(|e| e.lines.iter()));
        for line in lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }

    /// Full document: the block between markers followed by `body`.
    pub fn to_document(&self, body: &str) -> String {
        let mut doc = format!("{FRONTMATTER_MARKER}\n{}{FRONTMATTER_MARKER}\n", self.to_yaml());
        doc.push_str(body);
        if !doc.ends_with('\n') {
            doc.push('\n');
        }
        doc
    }
}

/// Split a leading frontmatter block from `content`.
///
/// The opening marker must be the first line. Without a closing marker the
/// whole content is body and no frontmatter is returned.
pub fn split_frontmatter(content: &str) -> (Option<Frontmatter>, &str) {
    let Some(first_break) = content.find('\n') else {
        return (None, content);
    };
    if content[..first_break].trim_end() != FRONTMATTER_MARKER {
        return (None, content);
    }

    let block_start = first_break + 1;
    let mut offset = block_start;
    for line in content[block_start..].split_inclusive('\n') {
        if line.trim_end() == FRONTMATTER_MARKER {
            let block = &content[block_start..offset];
            let body = &content[offset + line.len()..];
            return (Some(Frontmatter::parse(block)), body);
        }
        offset += line.len();
    }

    (None, content)
}

/// Recognize a top-level `key: value` line. Indentation is ignored when
/// `allow_indent` is set.
fn parse_key_line(line: &str, allow_indent: bool) -> Option<(String, String)> {
    if line.starts_with(char::is_whitespace) && !allow_indent {
        return None;
    }
    let line = line.trim_start();
    if line.starts_with('-') || line.starts_with('#') {
        return None;
    }
    let (key, value) = line.split_once(':')?;
    let key = key.trim();
    if key.is_empty() {
        return None;
    }
    Some((key.to_string(), unquote(value)))
}

/// Remove one pair of surrounding quotes.
fn unquote(s: &str) -> String {
    let trimmed = s.trim();
    if trimmed.len() >= 2
        && ((trimmed.starts_with('"') && trimmed.ends_with('"'))
            || (trimmed.starts_with('\'') && trimmed.ends_with('\'')))
    {
        trimmed[1..trimmed.len() - 1].to_string()
    } else {
        trimmed.to_string()
    }
}

/// Quote a scalar when plain YAML would change its meaning.
fn quote_scalar(value: &str) -> String {
    const INDICATORS: &[char] = &[
        '-', '?', ':', ',', '[', ']', '{', '}', '#', '&', '*', '!', '|', '>', '\'', '"', '%', '@',
        '`',
    ];
    let reserved = matches!(
        value.to_ascii_lowercase().as_str(),
        "true" | "false" | "yes" | "no" | "on" | "off" | "null" | "~"
    );
    let needs_quotes = value.is_empty()
        || reserved
        || value.starts_with(INDICATORS)
        || value.starts_with(char::is_whitespace)
        || value.ends_with(char::is_whitespace)
        || value.contains(": ")
        || value.contains(" #")
        || value.contains('\n')
        || value.parse::<f64>().is_ok();

    if needs_quotes {
        let escaped = value
            .replace('\\', "\\\\")
            .replace('"', "\\\"")
            .replace('\n', "\\n");
        format!("\"{escaped}\"")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_block_and_body() {
        let content = "---\ntitle: Avoid Barrel Imports\nimpact: HIGH\n---\n## Heading\n\nBody.";
        let (fm, body) = split_frontmatter(content);
        let fm = fm.unwrap();
        assert_eq!(fm.get("title"), Some("Avoid Barrel Imports"));
        assert_eq!(fm.get("impact"), Some("HIGH"));
        assert_eq!(body, "## Heading\n\nBody.");
    }

    #[test]
    fn no_frontmatter_returns_whole_content() {
        let content = "## Heading\n\nBody.";
        let (fm, body) = split_frontmatter(content);
        assert!(fm.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn marker_must_be_at_offset_zero() {
        let content = "\n---\ntitle: X\n---\nBody";
        let (fm, body) = split_frontmatter(content);
        assert!(fm.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn unclosed_block_is_body() {
        let content = "---\ntitle: Incomplete\nSome content";
        let (fm, body) = split_frontmatter(content);
        assert!(fm.is_none());
        assert_eq!(body, content);
    }

    #[test]
    fn closing_marker_at_end_of_input() {
        let (fm, body) = split_frontmatter("---\ntitle: Only\n---");
        assert_eq!(fm.unwrap().get("title"), Some("Only"));
        assert_eq!(body, "");
    }

    #[test]
    fn empty_block() {
        let (fm, body) = split_frontmatter("---\n---\nBody");
        assert!(fm.unwrap().is_empty());
        assert_eq!(body, "Body");
    }

    #[test]
    fn values_keep_inner_colons_and_lose_quotes() {
        let fm = Frontmatter::parse("title: \"Use: colons\"\nurl: https://example.com\nname: 'single'");
        assert_eq!(fm.get("title"), Some("Use: colons"));
        assert_eq!(fm.get("url"), Some("https://example.com"));
        assert_eq!(fm.get("name"), Some("single"));
    }

    #[test]
    fn later_duplicate_wins() {
        let fm = Frontmatter::parse("impact: LOW\nimpact: HIGH");
        assert_eq!(fm.get("impact"), Some("HIGH"));
        assert_eq!(fm.len(), 1);
    }

    #[test]
    fn continuation_lines_travel_with_their_key() {
        let block = "title: Rule\ntags:\n  - react\n  - perf\nimpact: HIGH";
        let fm = Frontmatter::parse(block);
        assert_eq!(fm.keys().collect::<Vec<_>>(), ["title", "tags", "impact"]);
        assert_eq!(fm.get("tags"), Some(""));
        assert_eq!(fm.to_yaml(), format!("{block}\n"));
    }

    #[test]
    fn indented_keys_without_an_owner_are_keys() {
        let block = "  title: Indented\n  impact: HIGH\ntags:\n  nested: kept";
        let fm = Frontmatter::parse(block);
        assert_eq!(fm.keys().collect::<Vec<_>>(), ["title", "impact", "tags"]);
        assert_eq!(fm.get("title"), Some("Indented"));
        assert_eq!(fm.get("impact"), Some("HIGH"));
        assert_eq!(fm.get("nested"), None);
        assert_eq!(fm.to_yaml(), format!("{block}\n"));
    }

    #[test]
    fn set_replaces_in_place() {
        let mut fm = Frontmatter::parse("name: x\ntitle: Old\nimpact: LOW");
        fm.set("title", "New Title");
        assert_eq!(fm.to_yaml(), "name: x\ntitle: New Title\nimpact: LOW\n");
    }

    #[test]
    fn set_appends_new_key() {
        let mut fm = Frontmatter::default();
        fm.set("title", "Hello");
        assert_eq!(fm.to_document("Body"), "---\ntitle: Hello\n---\nBody\n");
    }

    #[test]
    fn set_quotes_when_needed() {
        let mut fm = Frontmatter::default();
        fm.set("title", "Rule: \"quoted\"");
        fm.set("flag", "yes");
        fm.set("version", "1.0");
        assert_eq!(
            fm.to_yaml(),
            "title: \"Rule: \\\"quoted\\\"\"\nflag: \"yes\"\nversion: \"1.0\"\n"
        );
    }

    #[test]
    fn get_non_empty_skips_blank_values() {
        let fm = Frontmatter::parse("title:\nimpact: HIGH");
        assert_eq!(fm.get("title"), Some(""));
        assert_eq!(fm.get_non_empty("title"), None);
        assert_eq!(fm.get_non_empty("impact"), Some("HIGH"));
    }

    #[test]
    fn remove_key() {
        let mut fm = Frontmatter::parse("a: 1\nb: 2");
        assert!(fm.remove("a"));
        assert!(!fm.remove("missing"));
        assert_eq!(fm.to_yaml(), "b: 2\n");
    }
}
