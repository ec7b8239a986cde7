//! Folder and file counters.

use serde::{Deserialize, Serialize};

/// Summary counts for a directory tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeStats {
    /// Total number of directories (the root is not counted).
    pub total_dirs: u64,
    /// Total number of files.
    pub total_files: u64,
    /// Deepest level reached, the root's children being level 1.
    pub max_depth: u32,
}

impl TreeStats {
    /// Create new empty stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a file at the given depth.
    pub fn record_file(&mut self, depth: u32) {
        self.total_files += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Record a directory at the given depth.
    pub fn record_dir(&mut self, depth: u32) {
        self.total_dirs += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    /// Total entries recorded.
    pub fn total_items(&self) -> u64 {
        self.total_dirs + self.total_files
    }
}

impl std::fmt::Display for TreeStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} folders, {} files",
            self.total_dirs, self.total_files
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tree_stats_default() {
        let stats = TreeStats::default();
        assert_eq!(stats.total_dirs, 0);
        assert_eq!(stats.total_files, 0);
        assert_eq!(stats.max_depth, 0);
    }

    #[test]
    fn test_tree_stats_record() {
        let mut stats = TreeStats::new();
        stats.record_dir(1);
        stats.record_file(2);
        stats.record_file(1);

        assert_eq!(stats.total_dirs, 1);
        assert_eq!(stats.total_files, 2);
        assert_eq!(stats.total_items(), 3);
        assert_eq!(stats.max_depth, 2);
        assert_eq!(stats.to_string(), "1 folders, 2 files");
    }

}
