//! # rulebook-settings
//!
//! Build configuration with layered sources.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults**: [`RulebookSettings::default()`]
//! 2. **Root file**: `<root>/rulebook.json` (deep-merged over defaults)
//! 3. **Environment variables**: `RULEBOOK_*` overrides (highest priority)
//!
//! The root directory is always passed in explicitly; nothing here reads the
//! current working directory.

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;
