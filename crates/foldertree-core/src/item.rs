//! Items exchanged between the parser and the materializer.

use std::path::{Path, PathBuf};

use compact_str::CompactString;
use serde::{Deserialize, Serialize};

/// One diagram line after indentation analysis, before its parent is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedLine {
    /// Leaf name with the directory marker stripped.
    pub name: CompactString,
    /// Whether the line ended with the directory marker.
    pub is_dir: bool,
    /// Nesting depth hint derived from the line's prefix.
    pub level: usize,
    /// 1-based line number in the source text.
    pub line_no: usize,
}

impl ParsedLine {
    /// Create a new parsed line.
    pub fn new(name: impl Into<CompactString>, is_dir: bool, level: usize, line_no: usize) -> Self {
        Self {
            name: name.into(),
            is_dir,
            level,
            line_no,
        }
    }
}

/// A diagram entry with its path resolved relative to the diagram's root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeItem {
    /// Leaf name.
    pub name: CompactString,
    /// Whether this entry is a directory.
    pub is_dir: bool,
    /// Nesting depth hint carried over from the source line.
    pub level: usize,
    /// Path relative to the root directory (the root holds its own name).
    pub full_path: PathBuf,
}

impl TreeItem {
    /// Resolve a parsed line under an optional parent path.
    pub fn resolve(line: ParsedLine, parent: Option<&Path>) -> Self {
        let full_path = match parent {
            Some(parent) => parent.join(line.name.as_str()),
            None => PathBuf::from(line.name.as_str()),
        };

        Self {
            name: line.name,
            is_dir: line.is_dir,
            level: line.level,
            full_path,
        }
    }

    /// Check if this item is a directory.
    pub fn is_dir(&self) -> bool {
        self.is_dir
    }

    /// Check if this item is a file.
    pub fn is_file(&self) -> bool {
        !self.is_dir
    }
}

impl std::fmt::Display for TreeItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = if self.is_dir { "[DIR] " } else { "[FILE]" };
        write!(f, "{tag} {}", self.full_path.display())
    }
}
