//! Configuration for the retort binary.
//!
//! Settings come from an optional `retort.toml` in the working directory,
//! overridden by command-line flags. Defaults cover everything, so no file
//! is required.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default config file name looked up in the working directory.
pub const CONFIG_FILE: &str = "retort.toml";

/// Settings for a retort run.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Path of the knowledge base JSON file.
    #[serde(default = "default_knowledge_base")]
    pub knowledge_base: PathBuf,

    /// Name the bot replies under.
    #[serde(default = "default_bot_name")]
    pub bot_name: String,

    /// Minimum similarity ratio required to accept a match.
    #[serde(default = "default_cutoff")]
    pub cutoff: f64,
}

fn default_knowledge_base() -> PathBuf {
    PathBuf::from("knowledge_base.json")
}

fn default_bot_name() -> String {
    "Retort".to_string()
}

fn default_cutoff() -> f64 {
    0.6
}

impl Default for Config {
    fn default() -> Self {
        Self {
            knowledge_base: default_knowledge_base(),
            bot_name: default_bot_name(),
            cutoff: default_cutoff(),
        }
    }
}

/// Load configuration from `path`, or defaults when the file is absent.
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!(path = %path.display(), "no config file, using defaults");
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;

    debug!(path = %path.display(), "config loaded");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parses() {
        let config: Config = toml::from_str(
            r#"
            knowledge_base = "bot/kb.json"
            bot_name = "Andi"
            cutoff = 0.75
            "#,
        )
        .unwrap();

        assert_eq!(config.knowledge_base, PathBuf::from("bot/kb.json"));
        assert_eq!(config.bot_name, "Andi");
        assert!((config.cutoff - 0.75).abs() < 1e-9);
    }

    #[test]
    fn test_missing_keys_fall_back_to_defaults() {
        let config: Config = toml::from_str(r#"bot_name = "Andi""#).unwrap();

        assert_eq!(config.bot_name, "Andi");
        assert_eq!(config.knowledge_base, PathBuf::from("knowledge_base.json"));
        assert!((config.cutoff - 0.6).abs() < 1e-9);
    }

    #[test]
    fn test_unknown_keys_are_rejected() {
        let result: std::result::Result<Config, _> = toml::from_str(r#"shout = true"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.bot_name, "Retort");
    }
}
