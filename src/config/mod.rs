//! Configuration loading and hierarchy management
//!
//! Precedence: CLI > Env > File > Defaults. The CLI layer is applied by the
//! binary after [`Config::load`] returns.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::error::{CutframeError, CutframeResult};
use crate::ports::ProviderConfig;

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "cutframe.toml";

/// Environment variables mapped onto config keys
const ENV_MAPPINGS: [(&str, &str); 3] = [
    ("CUTFRAME_LOG_LEVEL", "log.level"),
    ("CUTFRAME_LOG_JSON", "log.json"),
    ("CUTFRAME_FPS", "timecode.fps"),
];

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub log: LogConfig,
    pub timecode: TimecodeConfig,
    /// `[providers.<name>]` tables of string settings
    pub providers: BTreeMap<String, BTreeMap<String, String>>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive, e.g. "info" or "cutframe=debug,warn"
    pub level: String,
    /// Emit JSON lines instead of human-readable output
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

/// Timecode defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimecodeConfig {
    /// Frame rate for timecode parsing; 0 selects the 23.997 fallback
    pub fps: f64,
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> CutframeResult<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Read configuration from a TOML file
    pub fn from_file(path: &Path) -> CutframeResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CutframeError::config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&content)
    }

    /// Defaults, then file, then environment; validated.
    ///
    /// An explicit `path` must exist. Without one, [`DEFAULT_CONFIG_FILE`] is
    /// used when present in the working directory.
    pub fn load(path: Option<&Path>) -> CutframeResult<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Override values from environment variables found through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> CutframeResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        for (var, key) in ENV_MAPPINGS {
            let Some(value) = lookup(var) else {
                continue;
            };
            debug!("Found environment override: {} = {}", var, value);
            match key {
                "log.level" => self.log.level = value,
                "log.json" => {
                    self.log.json = value.trim().parse().map_err(|e| {
                        CutframeError::config(format!("Invalid boolean for {}: {}", var, e))
                    })?
                }
                "timecode.fps" => {
                    self.timecode.fps = value.trim().parse().map_err(|e| {
                        CutframeError::config(format!("Invalid frame rate for {}: {}", var, e))
                    })?
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Reject settings the rest of the application cannot use
    pub fn validate(&self) -> CutframeResult<()> {
        EnvFilter::try_new(&self.log.level).map_err(|e| {
            CutframeError::config(format!("Invalid log level {:?}: {}", self.log.level, e))
        })?;

        if !self.timecode.fps.is_finite() || self.timecode.fps < 0.0 {
            return Err(CutframeError::config(format!(
                "Frame rate must be a non-negative number, got {}",
                self.timecode.fps
            )));
        }
        Ok(())
    }

    /// Settings for one provider; empty when the table is absent
    pub fn provider_config(&self, name: &str) -> ProviderConfig {
        ProviderConfig {
            name: name.to_string(),
            settings: self.providers.get(name).cloned().unwrap_or_default(),
        }
    }
}
