//! # rulebook-core
//!
//! Shared vocabulary for the rulebook crates:
//!
//! - **Data model**: [`Rule`], [`CodeExample`], [`Section`], [`ImpactLevel`],
//!   and the per-agent [`AgentMetadata`] with its [`SectionDescriptor`]s
//! - **Frontmatter**: [`frontmatter`] splits a leading `---` block from a
//!   markdown document and keeps its keys in source order
//! - **Logging**: [`logging`] sets up the `tracing` subscriber and provides
//!   in-memory capture for tests

#![deny(unsafe_code)]

pub mod constants;
pub mod errors;
pub mod frontmatter;
pub mod logging;
pub mod types;

pub use errors::{CoreError, Result};
pub use frontmatter::{Frontmatter, split_frontmatter};
pub use types::*;
