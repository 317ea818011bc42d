//! Renderer configuration.
//!
//! ## Learning: Serde for Serialization
//!
//! `#[derive(Serialize, Deserialize)]` generates the code that converts
//! these structs to and from TOML. `#[serde(default)]` fills missing
//! fields from `Default::default()`, so a config file only needs to
//! mention the values it wants to change.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Window and debugging settings
    pub renderer: RendererConfig,

    /// Table / collection / carousel settings
    pub lists: ListConfig,

    /// Text metrics used by the layout engine
    pub text: TextConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Loads config from the default location, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from_default_path().unwrap_or_default()
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("tessera").join("config.toml"))
    }

    /// Saves the config to `path`, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Saves the config to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Self::default_path()?)
    }
}

/// Window and debugging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererConfig {
    /// Outline every rendered view
    pub debug_mode: bool,

    /// Window width in points
    pub window_width: f32,

    /// Window height in points
    pub window_height: f32,

    /// Height reserved for the status bar when a navigation bar is shown
    pub status_bar_height: f32,

    /// Navigation bar height
    pub navigation_bar_height: f32,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            debug_mode: false,
            window_width: 375.0,
            window_height: 667.0,
            status_bar_height: 20.0,
            navigation_bar_height: 44.0,
        }
    }
}

/// List virtualization configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Extra distance (points) materialized beyond each edge of the viewport
    pub overscan: f32,

    /// Log a warning for table items that declare no height
    pub warn_missing_item_height: bool,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            overscan: 0.0,
            warn_missing_item_height: true,
        }
    }
}

/// Text measurement configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextConfig {
    /// Average glyph advance in points
    pub char_width: f32,

    /// Line height in points
    pub line_height: f32,
}

impl Default for TextConfig {
    fn default() -> Self {
        Self {
            char_width: 8.0,
            line_height: 17.0,
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level when no `-v` flag is given
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
