use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::import::DEFAULT_SEPARATORS;

/// Top-level `stays` configuration, read from an optional TOML file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StaysConfig {
    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Aging-out schedule settings.
    #[serde(default)]
    pub schedule: ScheduleConfig,

    /// Free-text import settings.
    #[serde(default)]
    pub import: ImportConfig,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_true")]
    pub pretty: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScheduleConfig {
    /// Events printed by `schedule` when `--limit` is absent. 0 prints all.
    #[serde(default = "default_schedule_limit")]
    pub limit: usize,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ImportConfig {
    /// Tokens accepted between the two dates of an import line, tried in order.
    #[serde(default = "default_separators")]
    pub separators: Vec<String>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pretty: default_true(),
        }
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            limit: default_schedule_limit(),
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            separators: default_separators(),
        }
    }
}

fn default_true() -> bool {
    true
}
fn default_schedule_limit() -> usize {
    10
}
fn default_separators() -> Vec<String> {
    DEFAULT_SEPARATORS.iter().map(|s| s.to_string()).collect()
}

impl StaysConfig {
    /// Load the config file at `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let config: StaysConfig = toml::from_str("").unwrap();
        assert!(config.output.pretty);
        assert_eq!(config.schedule.limit, 10);
        assert_eq!(config.import.separators.len(), DEFAULT_SEPARATORS.len());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config: StaysConfig = toml::from_str("[schedule]\nlimit = 0\n").unwrap();
        assert_eq!(config.schedule.limit, 0);
        assert!(config.output.pretty);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<StaysConfig>("[output]\ncolour = true\n").is_err());
    }
}
