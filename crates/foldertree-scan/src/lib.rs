//! Directory scanning and tree-diagram rendering for foldertree.
//!
//! # Overview
//!
//! `foldertree-scan` walks a directory and renders it as a box-drawing
//! tree diagram. Key features:
//!
//! - **Deterministic order**: directories before files, each sorted by name
//! - **Stable progress**: entries are counted before rendering
//! - **Resilient**: unreadable directories become placeholder lines
//! - **Configurable** depth limit, file exclusion, ignore patterns
//!
//! # Example
//!
//! ```rust,no_run
//! use foldertree_scan::{ScanConfig, TreeScanner};
//!
//! let config = ScanConfig::new("/path/to/scan");
//! let output = TreeScanner::new()
//!     .scan_with_progress(&config, |p| eprintln!("{:.0}%", p.percentage()))
//!     .unwrap();
//!
//! print!("{}", output.text);
//! ```

mod progress;
mod scanner;
mod stats;

pub use progress::ScanProgress;
pub use scanner::{ScanOutput, TreeScanner};
pub use stats::{FolderStats, folder_stats};

// Re-export core types for convenience
pub use foldertree_core::{ScanConfig, ScanError, ScanWarning, TreeStats, WarningKind};
