//! # rulebook-docs
//!
//! Republishes skills and compiled agent documents as an MDX documentation
//! tree. Every page keeps its frontmatter and gains a `title`; each tree gets
//! a generated card index.

#![deny(unsafe_code)]

pub mod errors;
pub mod index;
pub mod page;
pub mod sync;

pub use errors::{Result, SyncError};
pub use index::{Card, IndexKind, render_index};
pub use page::{Page, publish_page};
pub use sync::{SyncReport, sync_docs};
