//! User configuration loaded from YAML.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::spinner::{DEFAULT_CADENCE, DEFAULT_MESSAGE, SpinnerOptions, SpinnerStyle};
use crate::util;

/// Spinner defaults read from `~/.config/busyline/config.yaml`.
///
/// Every field is optional; CLI flags take precedence over all of them.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Message shown after the glyph (blank values are ignored)
    #[serde(default)]
    pub message: Option<String>,

    /// Style name, e.g. `moon-phases` or `wave-text`. Unset means random.
    #[serde(default)]
    pub style: Option<SpinnerStyle>,

    /// Milliseconds between frames
    #[serde(default)]
    pub cadence_ms: Option<u64>,
}

impl Config {
    /// Load config from `path`, or from the global config file if None.
    ///
    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match global_config_path() {
                Some(p) => p,
                None => return Ok(Self::default()),
            },
        };

        match fs::read_to_string(&path) {
            Ok(content) => {
                debug!(?path, "config:loaded");
                Self::parse(&content)
                    .with_context(|| format!("Failed to parse config file {}", path.display()))
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(?path, "config:not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => {
                Err(e).with_context(|| format!("Failed to read config file {}", path.display()))
            }
        }
    }

    /// Parse YAML content. An empty document is the default config.
    pub fn parse(content: &str) -> Result<Self> {
        if util::is_blank(content) {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    /// Build spinner options, letting explicit overrides win over config.
    pub fn spinner_options(
        &self,
        message: Option<String>,
        style: Option<SpinnerStyle>,
    ) -> SpinnerOptions {
        let message = message
            .or_else(|| self.message.clone().filter(|m| util::has_value(m)))
            .unwrap_or_else(|| DEFAULT_MESSAGE.to_string());
        SpinnerOptions {
            message,
            style: style.or(self.style),
            cadence: self
                .cadence_ms
                .filter(|ms| *ms > 0)
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_CADENCE),
        }
    }
}

/// Path to the global config file.
/// Prefers an existing .yml file to avoid shadowing it, otherwise .yaml.
fn global_config_path() -> Option<PathBuf> {
    let home = home::home_dir()?;
    let yaml = home.join(".config/busyline/config.yaml");
    let yml = home.join(".config/busyline/config.yml");

    if yml.exists() && !yaml.exists() {
        Some(yml)
    } else {
        Some(yaml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_config() {
        let config = Config::parse("message: Crunching\nstyle: moon-phases\ncadence_ms: 120\n").unwrap();
        assert_eq!(config.message.as_deref(), Some("Crunching"));
        assert_eq!(config.style, Some(SpinnerStyle::MoonPhases));
        assert_eq!(config.cadence_ms, Some(120));
    }

    #[test]
    fn test_parse_empty_is_default() {
        assert_eq!(Config::parse("").unwrap(), Config::default());
        assert_eq!(Config::parse("  \n").unwrap(), Config::default());
    }

    #[test]
    fn test_parse_rejects_unknown_style() {
        assert!(Config::parse("style: spiral\n").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_field() {
        assert!(Config::parse("colour: red\n").is_err());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = TempDir::new().unwrap();
        let config = Config::load(Some(&dir.path().join("nope.yaml"))).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "style: wave-text\n").unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.style, Some(SpinnerStyle::WaveText));
    }

    #[test]
    fn test_load_malformed_file_mentions_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "cadence_ms: [oops\n").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(format!("{err:#}").contains("config.yaml"));
    }

    #[test]
    fn test_spinner_options_precedence() {
        let config = Config {
            message: Some("From config".to_string()),
            style: Some(SpinnerStyle::Arrows),
            cadence_ms: Some(40),
        };

        let options = config.spinner_options(None, None);
        assert_eq!(options.message, "From config");
        assert_eq!(options.style, Some(SpinnerStyle::Arrows));
        assert_eq!(options.cadence, Duration::from_millis(40));

        let options = config.spinner_options(Some("From flag".to_string()), Some(SpinnerStyle::Brain));
        assert_eq!(options.message, "From flag");
        assert_eq!(options.style, Some(SpinnerStyle::Brain));
    }

    #[test]
    fn test_spinner_options_defaults() {
        let config = Config {
            message: Some("   ".to_string()),
            style: None,
            cadence_ms: Some(0),
        };
        let options = config.spinner_options(None, None);
        assert_eq!(options.message, DEFAULT_MESSAGE);
        assert_eq!(options.style, None);
        assert_eq!(options.cadence, DEFAULT_CADENCE);
    }
}
