//! Progress and report types for materialization.

use std::path::PathBuf;
use std::time::Duration;

use serde::Serialize;

use crate::ItemError;

/// Progress information for an ongoing materialization.
#[derive(Debug, Clone)]
pub struct MaterializeProgress {
    /// Number of items processed (created, present, or failed).
    pub items_completed: usize,
    /// Total number of items below the root.
    pub items_total: usize,
    /// The path currently being processed.
    pub current_path: Option<PathBuf>,
    /// Number of failed items so far.
    pub errors_count: usize,
}

impl MaterializeProgress {
    /// Create a new progress tracker.
    pub fn new(items_total: usize) -> Self {
        Self {
            items_completed: 0,
            items_total,
            current_path: None,
            errors_count: 0,
        }
    }

    /// Get the progress as a percentage (0.0 to 100.0).
    pub fn percentage(&self) -> f64 {
        if self.items_total > 0 {
            (self.items_completed as f64 / self.items_total as f64) * 100.0
        } else {
            100.0
        }
    }

    /// Update the path being processed.
    pub fn set_current_path(&mut self, path: Option<PathBuf>) {
        self.current_path = path;
    }

    /// Mark one item as processed.
    pub fn complete_item(&mut self, failed: bool) {
        self.items_completed += 1;
        if failed {
            self.errors_count += 1;
        }
    }
}

/// Result of a completed materialization.
#[derive(Debug, Clone, Serialize)]
pub struct MaterializeReport {
    /// Directory the root item was materialized as.
    pub root_path: PathBuf,
    /// Directories newly created, the root included.
    pub folders_created: usize,
    /// Empty files newly created.
    pub files_created: usize,
    /// Items that already existed with the right kind.
    pub already_present: usize,
    /// Items that could not be created.
    pub errors: Vec<ItemError>,
    /// Time spent creating items.
    pub duration: Duration,
}

impl MaterializeReport {
    /// Create an empty report for a root path.
    pub fn new(root_path: PathBuf) -> Self {
        Self {
            root_path,
            folders_created: 0,
            files_created: 0,
            already_present: 0,
            errors: Vec::new(),
            duration: Duration::ZERO,
        }
    }

    /// Check if every item was created or already present.
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }

    /// One message per failed item.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(ToString::to_string).collect()
    }

    /// Get a human-readable summary of the operation.
    pub fn summary(&self) -> String {
        let mut summary = format!(
            "Created {} folders and {} files in {}",
            self.folders_created,
            self.files_created,
            self.root_path.display()
        );
        if self.already_present > 0 {
            summary.push_str(&format!(", {} already present", self.already_present));
        }
        if !self.errors.is_empty() {
            summary.push_str(&format!(", {} failed", self.errors.len()));
        }
        summary
    }
}
