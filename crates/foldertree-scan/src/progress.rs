//! Scan progress reporting.

use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Progress information during a scan.
#[derive(Debug, Clone)]
pub struct ScanProgress {
    /// Number of entries emitted so far.
    pub processed: u64,
    /// Number of entries the scan will emit, counted up front.
    pub total: u64,
    /// Path of the entry just emitted, relative to the root.
    pub current_path: PathBuf,
    /// Number of unreadable directories so far.
    pub errors_count: u64,
    /// Time elapsed since scan started.
    pub elapsed: Duration,
}

impl ScanProgress {
    /// Create initial progress state.
    pub fn new(total: u64) -> Self {
        Self {
            processed: 0,
            total,
            current_path: PathBuf::new(),
            errors_count: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Get the progress as a percentage (0.0 to 100.0).
    pub fn percentage(&self) -> f64 {
        if self.total > 0 {
            (self.processed as f64 / self.total as f64) * 100.0
        } else {
            100.0
        }
    }

    /// Check whether every counted entry has been emitted.
    pub fn is_complete(&self) -> bool {
        self.processed >= self.total
    }
}

impl Default for ScanProgress {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Internal progress tracker with timing.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    start_time: Instant,
    processed: u64,
    total: u64,
    errors_count: u64,
    current_path: PathBuf,
}

impl ProgressTracker {
    pub fn new(total: u64) -> Self {
        Self {
            start_time: Instant::now(),
            processed: 0,
            total,
            errors_count: 0,
            current_path: PathBuf::new(),
        }
    }

    /// Record one emitted entry.
    pub fn record_item(&mut self, relative_path: PathBuf) {
        self.processed += 1;
        // The tree may have grown since it was counted.
        self.total = self.total.max(self.processed);
        self.current_path = relative_path;
    }

    pub fn record_error(&mut self) {
        self.errors_count += 1;
    }

    pub fn processed(&self) -> u64 {
        self.processed
    }

    pub fn errors_count(&self) -> u64 {
        self.errors_count
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn snapshot(&self) -> ScanProgress {
        ScanProgress {
            processed: self.processed,
            total: self.total,
            current_path: self.current_path.clone(),
            errors_count: self.errors_count,
            elapsed: self.start_time.elapsed(),
        }
    }
}
