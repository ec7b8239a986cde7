//! User defaults for the command line, read from `settings.toml`.

use std::path::PathBuf;

use serde::Deserialize;

/// Defaults applied when a flag is not given on the command line.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Levels below the root that `scan` lists (0 = unlimited).
    pub max_depth: u32,
    /// List files as well as directories.
    pub include_files: bool,
    /// List hidden entries.
    pub include_hidden: bool,
    /// Entry names that `scan` always leaves out.
    pub ignore_patterns: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_depth: 3,
            include_files: true,
            include_hidden: true,
            ignore_patterns: Vec::new(),
        }
    }
}

impl Settings {
    /// Get the settings file path.
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("foldertree").join("settings.toml"))
    }

    /// Load settings from disk, or return defaults.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        let Ok(content) = std::fs::read_to_string(&path) else {
            return Self::default();
        };

        Self::from_toml(&content).unwrap_or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "ignoring invalid settings file");
            Self::default()
        })
    }

    /// Parse settings text; missing keys keep their defaults.
    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
