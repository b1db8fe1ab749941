//! Core types for the rule compiler.
//!
//! All types use `camelCase` serde renaming so that `metadata.json` files
//! written for the documentation site deserialize without translation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::constants::{DEFAULT_EXAMPLE_LABEL, DEFAULT_ORGANIZATION, DEFAULT_VERSION};
use crate::errors::CoreError;

/// How much a rule (or a whole section) matters.
///
/// Case-insensitive on input, always upper case on output. Unknown or
/// missing values collapse to [`ImpactLevel::Medium`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING-KEBAB-CASE")]
pub enum ImpactLevel {
    /// `CRITICAL`
    Critical,
    /// `HIGH`
    High,
    /// `MEDIUM-HIGH`
    MediumHigh,
    /// `MEDIUM` (default).
    #[default]
    Medium,
    /// `LOW-MEDIUM`
    LowMedium,
    /// `LOW`
    Low,
}

impl ImpactLevel {
    /// Every level, most severe first.
    pub const ALL: [Self; 6] = [
        Self::Critical,
        Self::High,
        Self::MediumHigh,
        Self::Medium,
        Self::LowMedium,
        Self::Low,
    ];

    /// Canonical upper-case spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "CRITICAL",
            Self::High => "HIGH",
            Self::MediumHigh => "MEDIUM-HIGH",
            Self::Medium => "MEDIUM",
            Self::LowMedium => "LOW-MEDIUM",
            Self::Low => "LOW",
        }
    }

    /// Parse leniently: case-insensitive, and a trailing remark such as
    /// `high (2-10x faster)` is ignored. Anything unrecognized is `MEDIUM`.
    pub fn parse_lossy(value: &str) -> Self {
        if let Ok(level) = value.parse() {
            return level;
        }
        value
            .trim()
            .split(|c: char| !(c.is_ascii_alphanumeric() || c == '-'))
            .next()
            .and_then(|token| token.parse().ok())
            .unwrap_or_default()
    }
}

impl FromStr for ImpactLevel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == upper)
            .ok_or_else(|| CoreError::UnknownImpact(s.to_string()))
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ImpactLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<String>::deserialize(deserializer)?;
        Ok(raw.as_deref().map(Self::parse_lossy).unwrap_or_default())
    }
}

/// A fenced code block lifted out of a rule body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodeExample {
    /// Caption shown above the block (`Incorrect`, `Correct`, ...).
    pub label: String,
    /// Parenthesized remark from a `**Label (remark):**` caption.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Block contents, trimmed.
    pub code: String,
    /// Fence tag.
    pub language: String,
}

impl CodeExample {
    /// Create an example carrying the default label.
    pub fn new(code: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            label: DEFAULT_EXAMPLE_LABEL.to_string(),
            description: None,
            code: code.into(),
            language: language.into(),
        }
    }
}

/// One compiled rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Rule {
    /// Dotted `{section}.{position}` identifier. Empty until sections are
    /// aggregated.
    #[serde(default)]
    pub id: String,
    /// Rule title.
    pub title: String,
    /// Impact level.
    pub impact: ImpactLevel,
    /// Free-form remark attached to the impact (from frontmatter).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact_description: Option<String>,
    /// First prose paragraph group of the rule body.
    pub explanation: String,
    /// Code examples in source order.
    pub examples: Vec<CodeExample>,
}

/// A rule together with the section its filename resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRule {
    /// Section number (0 when no prefix matched).
    pub section: u32,
    /// The parsed rule, without an id.
    pub rule: Rule,
}

/// A numbered group of rules in the output document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Section number; 0 is the fallback bucket.
    pub number: u32,
    /// Section title.
    pub title: String,
    /// Section impact.
    pub impact: ImpactLevel,
    /// Optional section description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Rules sorted by title with dense ids.
    pub rules: Vec<Rule>,
}

/// Externally declared section, positioned 1-based in [`AgentMetadata::sections`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionDescriptor {
    /// Filename prefix that selects this section (may contain hyphens).
    #[serde(default)]
    pub id: String,
    /// Section title.
    pub title: String,
    /// Section impact.
    #[serde(default)]
    pub impact: ImpactLevel,
    /// Optional section description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Per-agent metadata, loaded from the agent's `metadata.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentMetadata {
    /// Document title.
    pub title: String,
    /// Abstract paragraph.
    #[serde(rename = "abstract")]
    pub abstract_text: String,
    /// Document version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Owning organization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    /// Ordered section declarations; position `n` (1-based) is section `n`.
    #[serde(default)]
    pub sections: Vec<SectionDescriptor>,
}

impl AgentMetadata {
    /// Version for the byline, defaulted.
    pub fn version_or_default(&self) -> &str {
        self.version.as_deref().unwrap_or(DEFAULT_VERSION)
    }

    /// Organization for the byline, defaulted.
    pub fn organization_or_default(&self) -> &str {
        self.organization.as_deref().unwrap_or(DEFAULT_ORGANIZATION)
    }
}
