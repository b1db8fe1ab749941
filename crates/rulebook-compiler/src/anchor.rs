//! Markdown heading anchors.
//!
//! The same transform produces table-of-contents link targets and must agree
//! with how the headings are addressed, so it is kept byte-for-byte stable:
//! lower-case, collapse each whitespace run to one `-`, then drop everything
//! outside `[A-Za-z0-9_-]`.

/// Anchor for arbitrary heading text.
pub fn to_anchor(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_space = false;

    for ch in text.chars().flat_map(char::to_lowercase) {
        if ch.is_whitespace() {
            if !in_space {
                out.push('-');
                in_space = true;
            }
            continue;
        }
        in_space = false;
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            out.push(ch);
        }
    }

    out
}

/// Anchor of a section heading (`## {number}. {title}`).
pub fn section_anchor(number: u32, title: &str) -> String {
    format!("{number}-{}", to_anchor(title))
}

/// Anchor of a rule heading (`### {id} {title}`).
pub fn rule_anchor(id: &str, title: &str) -> String {
    to_anchor(&format!("{id}-{title}"))
}
