//! Skill configuration
//!
//! A small serde struct with per-field defaults, loadable from YAML.
//! The historic pipeline existed in several variants (with and without a
//! persistent cache, with different similarity scaling and trigger
//! vocabularies); those variants collapse into this configuration.

use crate::score::DEFAULT_SIMILARITY_SCALE;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default cache location, relative to the host-provided data root
pub const DEFAULT_CACHE_SUBDIR: &str = "cache/radiobrowser";

/// Cache database file name
pub const CACHE_DB_FILE: &str = "stations.db";

/// Configuration for one skill instance
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillConfig {
    /// Whether the skill answers searches at all
    pub enabled: bool,
    /// Locale used to pick the radio keyword (e.g. "en-us")
    pub locale: String,
    /// Whether station lookups are cached on disk
    pub cache_enabled: bool,
    /// Cache directory, relative to the host data root unless absolute
    pub cache_dir: PathBuf,
    /// Multiplier mapping name similarity into score points (100 or 80)
    pub similarity_scale: u32,
    /// Terms that explicitly invoke this skill (+50 score, stripped)
    pub trigger_vocabulary: Vec<String>,
    /// Directory API base URL override (regional mirror, mock server)
    pub api_base: Option<String>,
    /// HTTP request timeout in seconds
    pub request_timeout_secs: u64,
    /// Icon path or URI stamped on every candidate
    pub skill_icon: String,
}

impl Default for SkillConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            locale: "en-us".to_string(),
            cache_enabled: true,
            cache_dir: PathBuf::from(DEFAULT_CACHE_SUBDIR),
            similarity_scale: DEFAULT_SIMILARITY_SCALE,
            trigger_vocabulary: vec!["radio browser".to_string()],
            api_base: None,
            request_timeout_secs: 30,
            skill_icon: String::new(),
        }
    }
}

impl SkillConfig {
    /// Parse a configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> anyhow::Result<Self> {
        serde_yaml::from_str(yaml).context("invalid skill configuration")
    }

    /// Load a configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_yaml(&text)
    }

    /// Full path of the cache database under the host data root
    ///
    /// An absolute `cache_dir` is used as-is.
    pub fn cache_db_path(&self, data_root: &Path) -> PathBuf {
        if self.cache_dir.is_absolute() {
            self.cache_dir.join(CACHE_DB_FILE)
        } else {
            data_root.join(&self.cache_dir).join(CACHE_DB_FILE)
        }
    }
}
