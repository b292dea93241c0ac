use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TaxonomyError};
use crate::global::build_logged;
use crate::normalize::normalize_tag;
use crate::taxonomy::Registry;

const CONFIG_FILE: &str = "config.toml";

/// Env var overriding the base directory
pub const BASE_DIR_ENV: &str = "EVIDENCE_TAGS_BASE";

/// Default config template with rich comments
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# evidence-tags configuration file
# Location: ~/.evidence-tags/config.toml

[registry]
# External section -> tags map (JSON) merged over the builtin taxonomy.
# Relative paths are resolved against this directory.
# Example: source = "section_tags.json"

# Per-category priority overrides. Higher wins when a tag matches
# several categories. Builtin default: 100, uncategorized: 0.
[priorities]
# media_video = 150
"#;

/// Global configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub registry: RegistryConfig,

    #[serde(default)]
    pub priorities: BTreeMap<String, i32>,
}

/// Registry-related configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct RegistryConfig {
    /// External section map
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,
}

/// Resolve the base directory: explicit > env var > ~/.evidence-tags
pub fn resolve_base_dir(explicit: Option<PathBuf>) -> PathBuf {
    if let Some(base) = explicit {
        return base;
    }

    if let Some(base) = std::env::var_os(BASE_DIR_ENV) {
        return PathBuf::from(base);
    }

    dirs::home_dir()
        .map(|h| h.join(".evidence-tags"))
        .unwrap_or_else(|| PathBuf::from(".evidence-tags"))
}

impl Config {
    /// Load config from base directory
    pub fn load(base_dir: &Path) -> Result<Self> {
        let path = base_dir.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: Config = toml::from_str(&content).map_err(|e| TaxonomyError::ConfigParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

        Ok(config)
    }

    /// Save config to base directory
    pub fn save(&self, base_dir: &Path) -> Result<()> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    /// Get config file path
    pub fn path(base_dir: &Path) -> PathBuf {
        base_dir.join(CONFIG_FILE)
    }

    /// Initialize config with default template (rich comments)
    pub fn init(base_dir: &Path) -> Result<PathBuf> {
        let path = base_dir.join(CONFIG_FILE);
        fs::create_dir_all(base_dir)?;

        if !path.exists() {
            fs::write(&path, DEFAULT_CONFIG_TEMPLATE)?;
        }

        Ok(path)
    }

    /// Get a config value by dot-notation key
    pub fn get(&self, key: &str) -> Option<String> {
        if key == "registry.source" {
            return Some(
                self.registry
                    .source
                    .as_ref()
                    .map(|p| p.display().to_string())
                    .unwrap_or_default(),
            );
        }

        let slug = key.strip_prefix("priorities.")?;
        self.priorities
            .get(&normalize_tag(slug))
            .map(|p| p.to_string())
    }

    /// Set a config value by dot-notation key
    ///
    /// An empty value clears `registry.source` or removes a priority override.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();

        if key == "registry.source" {
            self.registry.source = (!value.is_empty()).then(|| PathBuf::from(value));
            return Ok(());
        }

        let slug = key
            .strip_prefix("priorities.")
            .map(normalize_tag)
            .filter(|slug| !slug.is_empty())
            .ok_or_else(|| TaxonomyError::ConfigKeyNotFound {
                key: key.to_string(),
            })?;

        if value.is_empty() {
            self.priorities.remove(&slug);
            return Ok(());
        }

        let priority = value
            .parse::<i32>()
            .map_err(|_| TaxonomyError::InvalidConfigValue {
                key: key.to_string(),
                value: value.to_string(),
            })?;
        self.priorities.insert(slug, priority);
        Ok(())
    }

    /// List all config keys with their current values
    pub fn list(&self) -> Vec<(String, String)> {
        let mut entries = vec![(
            "registry.source".to_string(),
            self.get("registry.source").unwrap_or_default(),
        )];
        entries.extend(
            self.priorities
                .iter()
                .map(|(slug, priority)| (format!("priorities.{}", slug), priority.to_string())),
        );
        entries
    }

    /// Registry source resolved against the base directory
    pub fn source_path(&self, base_dir: &Path) -> Option<PathBuf> {
        self.registry.source.as_ref().map(|source| {
            if source.is_absolute() {
                source.clone()
            } else {
                base_dir.join(source)
            }
        })
    }

    /// Build the registry this config describes
    pub fn build_registry(&self, base_dir: &Path) -> Registry {
        let priorities: HashMap<String, i32> = self
            .priorities
            .iter()
            .map(|(slug, priority)| (slug.clone(), *priority))
            .collect();

        build_logged(self.source_path(base_dir).as_deref()).with_priorities(&priorities)
    }
}
