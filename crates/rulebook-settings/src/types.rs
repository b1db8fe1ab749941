//! Settings type definitions.
//!
//! Field names are camelCase in JSON. Every struct is `#[serde(default)]`, so
//! a partial `rulebook.json` only overrides what it names.

use std::path::{Path, PathBuf};

use rulebook_core::constants::DEFAULT_LANGUAGE;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, SettingsError};

/// Root settings for a build run.
///
/// Directory fields are relative to [`root`](Self::root) unless absolute.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RulebookSettings {
    /// Directory every relative path resolves against. Never serialized.
    #[serde(skip)]
    pub root: PathBuf,
    /// Directory with one sub-directory per agent.
    pub agents_dir: String,
    /// Directory with one sub-directory per skill.
    pub skills_dir: String,
    /// Output root of the documentation sync.
    pub docs_output_dir: String,
    /// Known agents. Empty means "every sub-directory of `agentsDir`".
    pub agents: Vec<String>,
    /// Rule directory name inside an agent directory.
    pub rules_dir_name: String,
    /// Metadata file name inside an agent directory.
    pub metadata_filename: String,
    /// Optional section metadata file inside an agent directory.
    pub sections_filename: String,
    /// Compiled document file name inside an agent directory.
    pub output_filename: String,
    /// Fence language for untagged code blocks.
    pub default_language: String,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl Default for RulebookSettings {
    fn default() -> Self {
        Self {
            root: PathBuf::new(),
            agents_dir: "agents".to_string(),
            skills_dir: "skills".to_string(),
            docs_output_dir: "packages/docs/content/docs".to_string(),
            agents: vec![
                "nextjs-architecture".to_string(),
                "react-best-practices".to_string(),
            ],
            rules_dir_name: "rules".to_string(),
            metadata_filename: "metadata.json".to_string(),
            sections_filename: "_sections.md".to_string(),
            output_filename: "AGENTS.md".to_string(),
            default_language: DEFAULT_LANGUAGE.to_string(),
            logging: LoggingSettings::default(),
        }
    }
}

impl RulebookSettings {
    /// Defaults anchored at `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Resolve a configured path against the root.
    pub fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.root.join(p)
        }
    }

    /// Absolute agents directory.
    pub fn agents_path(&self) -> PathBuf {
        self.resolve(&self.agents_dir)
    }

    /// Absolute skills directory.
    pub fn skills_path(&self) -> PathBuf {
        self.resolve(&self.skills_dir)
    }

    /// Absolute docs output directory.
    pub fn docs_output_path(&self) -> PathBuf {
        self.resolve(&self.docs_output_dir)
    }

    /// Directory of one agent.
    pub fn agent_dir(&self, agent: &str) -> PathBuf {
        self.agents_path().join(agent)
    }

    /// Rule directory of one agent.
    pub fn rules_dir(&self, agent: &str) -> PathBuf {
        self.agent_dir(agent).join(&self.rules_dir_name)
    }

    /// Metadata file of one agent.
    pub fn metadata_path(&self, agent: &str) -> PathBuf {
        self.agent_dir(agent).join(&self.metadata_filename)
    }

    /// Section metadata fallback file of one agent.
    pub fn sections_path(&self, agent: &str) -> PathBuf {
        self.agent_dir(agent).join(&self.sections_filename)
    }

    /// Compiled document of one agent.
    pub fn output_path(&self, agent: &str) -> PathBuf {
        self.agent_dir(agent).join(&self.output_filename)
    }

    /// Reject values that would make the build write outside an agent
    /// directory or emit unusable fences.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("rulesDirName", &self.rules_dir_name),
            ("metadataFilename", &self.metadata_filename),
            ("sectionsFilename", &self.sections_filename),
            ("outputFilename", &self.output_filename),
        ] {
            if !is_plain_file_name(value) {
                return Err(SettingsError::InvalidValue(format!(
                    "{name} must be a plain file name, got {value:?}"
                )));
            }
        }
        if self.default_language.is_empty()
            || !self
                .default_language
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '+')
        {
            return Err(SettingsError::InvalidValue(format!(
                "defaultLanguage must be a fence tag, got {:?}",
                self.default_language
            )));
        }
        if let Some(bad) = self.agents.iter().find(|a| !is_plain_file_name(a)) {
            return Err(SettingsError::InvalidValue(format!(
                "agent names must be plain directory names, got {bad:?}"
            )));
        }
        Ok(())
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// Filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

fn is_plain_file_name(value: &str) -> bool {
    !value.is_empty()
        && value != "."
        && value != ".."
        && !value.contains('/')
        && !value.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paths_resolve_against_root() {
        let settings = RulebookSettings::with_root("/repo");
        assert_eq!(settings.agents_path(), PathBuf::from("/repo/agents"));
        assert_eq!(
            settings.rules_dir("react-best-practices"),
            PathBuf::from("/repo/agents/react-best-practices/rules")
        );
        assert_eq!(
            settings.output_path("nextjs-architecture"),
            PathBuf::from("/repo/agents/nextjs-architecture/AGENTS.md")
        );
        assert_eq!(
            settings.docs_output_path(),
            PathBuf::from("/repo/packages/docs/content/docs")
        );
    }

    #[test]
    fn absolute_paths_are_kept() {
        let mut settings = RulebookSettings::with_root("/repo");
        settings.skills_dir = "/elsewhere/skills".to_string();
        assert_eq!(settings.skills_path(), PathBuf::from("/elsewhere/skills"));
    }

    #[test]
    fn defaults_are_valid() {
        RulebookSettings::default().validate().unwrap();
    }

    #[test]
    fn validate_rejects_nested_output() {
        let mut settings = RulebookSettings::default();
        settings.output_filename = "../AGENTS.md".to_string();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("outputFilename"));
    }

    #[test]
    fn validate_rejects_bad_language() {
        let mut settings = RulebookSettings::default();
        settings.default_language = "type script".to_string();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn validate_rejects_agent_paths() {
        let mut settings = RulebookSettings::default();
        settings.agents = vec!["../escape".to_string()];
        assert!(settings.validate().is_err());
    }

    #[test]
    fn root_is_not_serialized() {
        let json = serde_json::to_value(RulebookSettings::with_root("/repo")).unwrap();
        assert!(json.get("root").is_none());
        assert_eq!(json["agentsDir"], "agents");
        assert_eq!(json["logging"]["level"], "warn");
    }
}
