//! Configuration resolution for lspipeline.
//!
//! Hierarchy, lowest priority first:
//! 1. Built-in defaults
//! 2. Settings file (`<config dir>/lspipeline/settings.json`)
//! 3. Environment variables
//! 4. CLI arguments (applied by the binary)

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::status::{StatusColor, StatusPalette};

/// Default seconds between polls.
pub const DEFAULT_REFRESH_INTERVAL_SECS: u64 = 5;

/// Complete lspipeline configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Seconds between dashboard refreshes.
    pub refresh_interval_secs: u64,
    /// Color for statuses without an entry in the palette.
    pub fallback_color: StatusColor,
    /// Per-status color overrides, keyed by the raw status string.
    pub status_colors: HashMap<String, StatusColor>,
    /// AWS region; the SDK's default chain applies when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// AWS shared-config profile.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            refresh_interval_secs: DEFAULT_REFRESH_INTERVAL_SECS,
            fallback_color: StatusColor::White,
            status_colors: HashMap::new(),
            region: None,
            profile: None,
        }
    }
}

impl Config {
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Build the immutable status palette for this configuration.
    pub fn palette(&self) -> StatusPalette {
        StatusPalette::new(self.fallback_color, self.status_colors.clone())
    }

    pub fn validate(&self) -> Result<()> {
        if self.refresh_interval_secs == 0 {
            return Err(Error::Config(
                "refresh_interval_secs must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Load configuration from the settings file (if any) and the environment.
pub fn load_config() -> Result<Config> {
    load_config_from(settings_path().as_deref())
}

/// Load configuration using an explicit settings file path.
///
/// A missing file is not an error; an unreadable or malformed one is.
pub fn load_config_from(path: Option<&Path>) -> Result<Config> {
    let mut config = match path {
        Some(p) if p.exists() => load_config_file(p)?,
        _ => Config::default(),
    };
    apply_env_overrides(&mut config);
    config.validate()?;
    Ok(config)
}

/// Path to the settings file: `<config dir>/lspipeline/settings.json`.
pub fn settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("lspipeline").join("settings.json"))
}

fn load_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        Error::Config(format!("Failed to read config file {}: {}", path.display(), e))
    })?;
    serde_json::from_str(&content).map_err(|e| {
        Error::Config(format!("Failed to parse config file {}: {}", path.display(), e))
    })
}

fn apply_env_overrides(config: &mut Config) {
    if let Ok(val) = std::env::var("LSPIPELINE_INTERVAL") {
        match val.parse() {
            Ok(n) => config.refresh_interval_secs = n,
            Err(_) => tracing::warn!(value = %val, "Ignoring invalid LSPIPELINE_INTERVAL"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic, clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn default_config_polls_every_five_seconds() {
        let config = Config::default();
        assert_eq!(config.refresh_interval(), Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(Some(&dir.path().join("nope.json"))).unwrap();
        assert_eq!(config.fallback_color, StatusColor::White);
        assert!(config.status_colors.is_empty());
    }

    #[test]
    fn settings_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(
            &path,
            r#"{
                "refresh_interval_secs": 10,
                "fallback_color": "gray",
                "status_colors": { "Abandoned": "magenta" },
                "region": "eu-west-1"
            }"#,
        )
        .unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.refresh_interval_secs, 10);
        assert_eq!(config.region.as_deref(), Some("eu-west-1"));
        assert!(config.profile.is_none());

        let palette = config.palette();
        assert_eq!(palette.color_for("Abandoned"), StatusColor::Magenta);
        assert_eq!(palette.color_for("Succeeded"), StatusColor::Green);
        assert_eq!(palette.color_for("Unknown"), StatusColor::Gray);
    }

    #[test]
    fn malformed_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.json");
        std::fs::write(&path, "{ not json").unwrap();
        match load_config_file(&path) {
            Err(Error::Config(msg)) => assert!(msg.contains("Failed to parse")),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn zero_interval_is_rejected() {
        let config = Config {
            refresh_interval_secs: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn settings_path_is_namespaced() {
        if let Some(path) = settings_path() {
            assert!(path.ends_with("lspipeline/settings.json"));
        }
    }
}
