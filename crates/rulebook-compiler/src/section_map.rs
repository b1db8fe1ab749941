//! Filename prefix → section number lookup.
//!
//! Section ids and rule filenames are both hyphen-separated token lists, so
//! the map is a trie over those tokens. A lookup walks the filename's tokens
//! and remembers the deepest node that carries a section, which makes the
//! longest configured prefix win (`async-rsc-*` resolves to `async-rsc`
//! before `async`).

use std::collections::HashMap;
use std::path::Path;

use rulebook_core::SectionDescriptor;
use rulebook_core::constants::FALLBACK_SECTION;

#[derive(Debug, Clone, Default)]
struct Node {
    section: Option<u32>,
    children: HashMap<String, Node>,
}

/// Longest-prefix map from hyphenated section ids to section numbers.
#[derive(Debug, Clone, Default)]
pub struct SectionMap {
    root: Node,
    len: usize,
}

impl SectionMap {
    /// Create an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map each descriptor id to its 1-based position. Empty ids are skipped.
    pub fn from_descriptors(descriptors: &[SectionDescriptor]) -> Self {
        let mut map = Self::new();
        for (idx, descriptor) in descriptors.iter().enumerate() {
            if descriptor.id.trim().is_empty() {
                continue;
            }
            map.insert(descriptor.id.trim(), u32::try_from(idx + 1).unwrap_or(u32::MAX));
        }
        map
    }

    /// Register a prefix. Re-registering a prefix replaces its section.
    pub fn insert(&mut self, prefix: &str, section: u32) {
        let mut node = &mut self.root;
        for token in prefix.split('-') {
            node = node.children.entry(token.to_string()).or_default();
        }
        if node.section.replace(section).is_none() {
            self.len += 1;
        }
    }

    /// Number of registered prefixes.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no prefix is registered.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Section of the longest registered prefix of `stem`, if any.
    pub fn lookup(&self, stem: &str) -> Option<u32> {
        let mut node = &self.root;
        let mut best = None;
        for token in stem.split('-') {
            match node.children.get(token) {
                Some(child) => {
                    node = child;
                    if node.section.is_some() {
                        best = node.section;
                    }
                }
                None => break,
            }
        }
        best
    }

    /// Section for a rule file name (extension stripped), falling back to
    /// section 0.
    pub fn section_for_file(&self, file_name: &str) -> u32 {
        let stem = Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name);
        self.lookup(stem).unwrap_or(FALLBACK_SECTION)
    }
}

impl<S: AsRef<str>> FromIterator<(S, u32)> for SectionMap {
    fn from_iter<I: IntoIterator<Item = (S, u32)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (prefix, section) in iter {
            map.insert(prefix.as_ref(), section);
        }
        map
    }
}
