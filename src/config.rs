//! Configuration file support
//!
//! Loads rendering settings from ~/.docmark.toml (or
//! %USERPROFILE%\.docmark.toml on Windows). Parsing itself is
//! configuration-free; these settings only shape highlighted output.
//!
//! Example:
//! ```text
//! # docmark configuration
//! italic-descriptions = true
//! bold-tags = false
//! opacity = 0.8
//!
//! [colors]
//! Tag = "bright-magenta"
//! Link = "blue"
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{DocmarkError, Result};
use crate::render::RenderOptions;
use crate::syntax::{Category, Color};

const CONFIG_FILE_NAME: &str = ".docmark.toml";

/// Configuration settings
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Whether descriptive categories are italic
    pub italic_descriptions: bool,
    /// Whether tag-like categories are bold
    pub bold_tags: bool,
    /// Output opacity between 0.0 and 1.0
    pub opacity: f32,
    /// Category name -> color name overrides
    pub colors: BTreeMap<String, String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            italic_descriptions: true,
            bold_tags: true,
            opacity: 1.0,
            colors: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Get the default config file path
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(windows)]
        {
            std::env::var("USERPROFILE")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE_NAME))
        }

        #[cfg(not(windows))]
        {
            std::env::var("HOME")
                .ok()
                .map(|home| PathBuf::from(home).join(CONFIG_FILE_NAME))
        }
    }

    /// Load configuration from the default path
    ///
    /// A missing file yields the defaults.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => match fs::read_to_string(&path) {
                Ok(contents) => Self::parse(&contents, &path),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    debug!(path = %path.display(), "no config file, using defaults");
                    Ok(Self::default())
                }
                Err(e) => Err(e.into()),
            },
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents, path)
    }

    /// Parse config file contents
    fn parse(contents: &str, path: &Path) -> Result<Self> {
        let mut config: Config = toml::from_str(contents).map_err(|e| DocmarkError::Config {
            path: path.display().to_string(),
            message: e.message().to_string(),
        })?;
        config.opacity = if config.opacity.is_nan() {
            1.0
        } else {
            config.opacity.clamp(0.0, 1.0)
        };
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Build rendering options, skipping unknown color entries
    pub fn render_options(&self) -> RenderOptions {
        let mut colors = std::collections::HashMap::new();
        for (name, color_name) in &self.colors {
            let Some(category) = Category::from_name(name) else {
                warn!(category = %name, "unknown category in [colors], ignoring");
                continue;
            };
            let Some(color) = Color::from_name(color_name) else {
                warn!(category = %name, color = %color_name, "unknown color in [colors], ignoring");
                continue;
            };
            colors.insert(category, color);
        }

        RenderOptions {
            bold_tags: self.bold_tags,
            italic_descriptions: self.italic_descriptions,
            opacity: self.opacity,
            colors,
        }
    }
}
