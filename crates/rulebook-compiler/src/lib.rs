//! # rulebook-compiler
//!
//! Compiles a directory of per-rule markdown files into one composite
//! document per agent.
//!
//! Data flows one way:
//!
//! - [`extract`]: splits a rule body into explanation text and labeled code
//!   examples
//! - [`parser`]: resolves title, impact and section for one rule file
//! - [`aggregate`]: groups rules into numbered sections with dense ids
//! - [`render`]: writes the final markdown, table of contents included
//!
//! [`builder`] ties the stages to the filesystem layout described by
//! [`RulebookSettings`](rulebook_settings::RulebookSettings).

#![deny(unsafe_code)]

pub mod aggregate;
pub mod anchor;
pub mod builder;
pub mod collate;
pub mod errors;
pub mod extract;
pub mod loader;
pub mod metadata;
pub mod parser;
pub mod render;
pub mod section_map;

pub use aggregate::aggregate;
pub use builder::{
    BuildReport, RuleFailure, available_agents, build_agent, build_all, parse_rules, resolve_agent,
};
pub use errors::{CompileError, Result};
pub use extract::{Extracted, extract, extract_with_language};
pub use parser::{parse_rule_file, parse_rule_source};
pub use render::render;
pub use section_map::SectionMap;
