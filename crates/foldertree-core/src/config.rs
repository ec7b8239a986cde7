//! Scan configuration types.

use std::path::PathBuf;

use derive_builder::Builder;
use globset::{Glob, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::error::ScanError;

/// Configuration for scanning operations.
#[derive(Debug, Clone, Builder, Serialize, Deserialize)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct ScanConfig {
    /// Root path to scan.
    pub root: PathBuf,

    /// Levels below the root to list (0 = unlimited).
    #[builder(default = "0")]
    #[serde(default)]
    pub max_depth: u32,

    /// List files as well as directories.
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_files: bool,

    /// Include hidden entries (starting with .).
    #[builder(default = "true")]
    #[serde(default = "default_true")]
    pub include_hidden: bool,

    /// Descend into symbolic links that point at directories.
    #[builder(default = "false")]
    #[serde(default)]
    pub follow_symlinks: bool,

    /// Entry names to leave out (glob syntax, matched against the name only).
    #[builder(default)]
    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl ScanConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(ref root) = self.root {
            if root.as_os_str().is_empty() {
                return Err("Root path cannot be empty".to_string());
            }
        } else {
            return Err("Root path is required".to_string());
        }
        if let Some(ref patterns) = self.ignore_patterns {
            for pattern in patterns {
                Glob::new(pattern).map_err(|e| format!("Bad ignore pattern '{pattern}': {e}"))?;
            }
        }
        Ok(())
    }
}

impl ScanConfig {
    /// Create a new scan config builder.
    pub fn builder() -> ScanConfigBuilder {
        ScanConfigBuilder::default()
    }

    /// Create a simple config for scanning a path.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            max_depth: 0,
            include_files: true,
            include_hidden: true,
            follow_symlinks: false,
            ignore_patterns: Vec::new(),
        }
    }

    /// Check whether entries `depth` levels below the root are listed.
    ///
    /// The root's children sit at depth 1.
    pub fn allows_depth(&self, depth: u32) -> bool {
        self.max_depth == 0 || depth <= self.max_depth
    }

    /// Compile the name filter for this configuration.
    pub fn filter(&self) -> Result<EntryFilter, ScanError> {
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.ignore_patterns {
            let glob = Glob::new(pattern).map_err(|e| ScanError::InvalidConfig {
                message: format!("Bad ignore pattern '{pattern}': {e}"),
            })?;
            builder.add(glob);
        }
        let ignore = builder.build().map_err(|e| ScanError::InvalidConfig {
            message: e.to_string(),
        })?;

        Ok(EntryFilter {
            ignore,
            include_hidden: self.include_hidden,
        })
    }
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(".")
    }
}

/// Compiled name filter derived from a [`ScanConfig`].
#[derive(Debug, Clone)]
pub struct EntryFilter {
    ignore: GlobSet,
    include_hidden: bool,
}

impl EntryFilter {
    /// Check if an entry with this name should be left out.
    pub fn should_skip(&self, name: &str) -> bool {
        (!self.include_hidden && name.starts_with('.')) || self.ignore.is_match(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = ScanConfig::builder()
            .root("/home/user")
            .max_depth(4u32)
            .include_files(false)
            .build()
            .unwrap();

        assert_eq!(config.root, PathBuf::from("/home/user"));
        assert_eq!(config.max_depth, 4);
        assert!(!config.include_files);
        assert!(config.include_hidden);
    }

    #[test]
    fn test_config_builder_requires_root() {
        assert!(ScanConfig::builder().build().is_err());
        assert!(ScanConfig::builder().root("").build().is_err());
    }

    #[test]
    fn test_config_builder_rejects_bad_glob() {
        let result = ScanConfig::builder()
            .root("/test")
            .ignore_patterns(vec!["[unclosed".to_string()])
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn test_allows_depth() {
        let unlimited = ScanConfig::new("/test");
        assert!(unlimited.allows_depth(1));
        assert!(unlimited.allows_depth(500));

        let mut limited = ScanConfig::new("/test");
        limited.max_depth = 2;
        assert!(limited.allows_depth(1));
        assert!(limited.allows_depth(2));
        assert!(!limited.allows_depth(3));
    }

    #[test]
    fn test_filter_ignore_patterns() {
        let config = ScanConfig::builder()
            .root("/test")
            .ignore_patterns(vec!["node_modules".to_string(), "*.log".to_string()])
            .build()
            .unwrap();
        let filter = config.filter().unwrap();

        assert!(filter.should_skip("node_modules"));
        assert!(filter.should_skip("test.log"));
        assert!(!filter.should_skip("src"));
    }

    #[test]
    fn test_filter_hidden() {
        let mut config = ScanConfig::new("/test");
        assert!(!config.filter().unwrap().should_skip(".git"));

        config.include_hidden = false;
        let filter = config.filter().unwrap();
        assert!(filter.should_skip(".git"));
        assert!(!filter.should_skip("src"));
    }

    #[test]
    fn test_config_deserialize_defaults() {
        let config: ScanConfig = serde_json::from_str(r#"{"root": "/data"}"#).unwrap();
        assert_eq!(config.max_depth, 0);
        assert!(config.include_files);
        assert!(config.include_hidden);
        assert!(!config.follow_symlinks);
    }
}
