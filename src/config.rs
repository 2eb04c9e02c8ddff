//! Configuration system for lovelog.
//!
//! Layered configuration from multiple sources:
//!
//! 1. **Compiled defaults** - Sensible defaults built into the binary
//! 2. **User config file** - `~/.config/lovelog/config.toml`
//! 3. **Environment variables** - `LOVELOG_*` prefix
//! 4. **CLI arguments** - Highest priority, always wins
//!
//! Stop words and emoji ranges are compiled tables, not configuration;
//! only presentation knobs live here.
//!
//! # Example Configuration File
//!
//! ```toml
//! [output]
//! format = "text"
//! colors = true
//!
//! [analysis]
//! top_items = 10
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Main configuration structure for lovelog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output formatting configuration.
    pub output: OutputConfig,
    /// Report display configuration.
    pub analysis: AnalysisConfig,
}

/// Output formatting configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format: text, json, json-pretty, compact.
    pub format: String,

    /// Enable colored output.
    pub colors: bool,

    /// Suppress non-essential output.
    pub quiet: bool,
}

/// Report display configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Number of top emoji/word entries shown in text reports.
    /// Environment variable: `LOVELOG_TOP`
    pub top_items: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "text".to_string(),
            colors: true,
            quiet: false,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self { top_items: 10 }
    }
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. User config file (~/.config/lovelog/config.toml)
    /// 3. Compiled defaults
    #[must_use]
    pub fn load() -> Self {
        let mut config = Self::default();

        if let Some(user_config) = Self::load_user_config() {
            config.merge(user_config);
        }

        config.apply_env_overrides();

        debug!("Configuration loaded: {:?}", config);
        config
    }

    /// Load configuration from a specific file.
    #[must_use]
    pub fn load_from_file(path: &PathBuf) -> Option<Self> {
        if !path.exists() {
            debug!("Config file not found: {}", path.display());
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    info!("Loaded config from: {}", path.display());
                    Some(config)
                }
                Err(e) => {
                    warn!("Failed to parse config file {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read config file {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Load the user configuration file from the standard location.
    fn load_user_config() -> Option<Self> {
        let config_path = Self::user_config_path()?;
        Self::load_from_file(&config_path)
    }

    /// Get the path to the user configuration file.
    #[must_use]
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("lovelog").join("config.toml"))
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(format) = std::env::var("LOVELOG_FORMAT") {
            self.output.format = format;
        }
        if std::env::var("LOVELOG_NO_COLOR").is_ok() || std::env::var("NO_COLOR").is_ok() {
            self.output.colors = false;
        }
        if std::env::var("LOVELOG_QUIET").is_ok() {
            self.output.quiet = true;
        }
        if let Ok(top) = std::env::var("LOVELOG_TOP") {
            if let Ok(n) = top.parse() {
                self.analysis.top_items = n;
            }
        }
    }

    /// Merge another config into this one (other takes precedence).
    fn merge(&mut self, other: Self) {
        self.output.format = other.output.format;
        self.output.colors = other.output.colors;
        self.output.quiet = other.output.quiet;
        self.analysis.top_items = other.analysis.top_items;
    }

    /// Generate a default configuration file content.
    #[must_use]
    pub fn default_config_content() -> String {
        let config = Self::default();
        toml::to_string_pretty(&config).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.output.format, "text");
        assert!(config.output.colors);
        assert_eq!(config.analysis.top_items, 10);
    }

    #[test]
    fn config_serialization_round_trip() {
        let config = Config::default();
        let toml = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml).unwrap();
        assert_eq!(config.analysis.top_items, parsed.analysis.top_items);
    }

    #[test]
    fn config_merge() {
        let mut base = Config::default();
        let mut other = Config::default();
        other.analysis.top_items = 25;
        other.output.format = "json".to_string();

        base.merge(other);

        assert_eq!(base.analysis.top_items, 25);
        assert_eq!(base.output.format, "json");
    }

    #[test]
    fn default_config_content_has_sections() {
        let content = Config::default_config_content();
        assert!(content.contains("[output]"));
        assert!(content.contains("[analysis]"));
    }

    #[test]
    fn partial_file_uses_defaults_for_the_rest() {
        let parsed: Config = toml::from_str("[analysis]\ntop_items = 3\n").unwrap();
        assert_eq!(parsed.analysis.top_items, 3);
        assert_eq!(parsed.output.format, "text");
    }
}
