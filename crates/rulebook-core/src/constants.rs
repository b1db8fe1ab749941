//! Shared constants for the rulebook crates.

/// Delimiter line that opens and closes a frontmatter block.
pub const FRONTMATTER_MARKER: &str = "---";

/// Fence language used when a code block carries no tag.
pub const DEFAULT_LANGUAGE: &str = "typescript";

/// Label given to a code example until a caption overrides it.
pub const DEFAULT_EXAMPLE_LABEL: &str = "Example";

/// Title used when neither frontmatter nor a level-2 heading supplies one.
pub const UNTITLED: &str = "Untitled";

/// Section number for rules whose filename matches no configured prefix.
pub const FALLBACK_SECTION: u32 = 0;

/// Version printed in the byline when the metadata omits one.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Organization printed in the byline when the metadata omits one.
pub const DEFAULT_ORGANIZATION: &str = "Engineering";
