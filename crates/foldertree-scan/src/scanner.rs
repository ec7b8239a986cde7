//! Two-pass directory scanner that renders a tree diagram.
//!
//! The first pass counts the entries the render will emit so progress is
//! reported against a fixed total. The second pass walks again in pre-order,
//! directories before files, and writes one diagram line per entry.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use compact_str::CompactString;
use serde::Serialize;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

use foldertree_core::glyph::{self, DIR_MARKER};
use foldertree_core::{EntryFilter, ScanConfig, ScanError, ScanWarning, TreeStats, WarningKind};

use crate::progress::{ProgressTracker, ScanProgress};

/// Broadcast a progress snapshot every this many entries.
const BROADCAST_INTERVAL: u64 = 100;

/// Result of a completed scan.
#[derive(Debug, Clone, Serialize)]
pub struct ScanOutput {
    /// Canonical root path that was scanned.
    pub root_path: PathBuf,
    /// Rendered tree diagram, one entry per line.
    pub text: String,
    /// Number of entries emitted (the root line is not counted).
    pub item_count: u64,
    /// Number of directories that could not be listed.
    pub error_count: u64,
    /// Folder and file counts of the emitted entries.
    pub stats: TreeStats,
    /// Details for every unreadable directory.
    pub warnings: Vec<ScanWarning>,
    /// Duration of both passes.
    pub scan_duration: Duration,
}

impl ScanOutput {
    /// Check if any directory could not be listed.
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Directory entry discovered during a walk.
#[derive(Debug, Clone)]
struct ScanEntry {
    name: CompactString,
    path: PathBuf,
    is_dir: bool,
}

/// Scanner producing box-drawing tree diagrams.
pub struct TreeScanner {
    progress_tx: broadcast::Sender<ScanProgress>,
    cancel: CancellationToken,
}

impl TreeScanner {
    /// Create a new scanner.
    pub fn new() -> Self {
        Self::with_cancellation(CancellationToken::new())
    }

    /// Create a scanner that stops when `cancel` is triggered.
    pub fn with_cancellation(cancel: CancellationToken) -> Self {
        let (progress_tx, _) = broadcast::channel(100);
        Self {
            progress_tx,
            cancel,
        }
    }

    /// Token that cancels scans run by this scanner.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Subscribe to periodic scan progress updates.
    pub fn subscribe(&self) -> broadcast::Receiver<ScanProgress> {
        self.progress_tx.subscribe()
    }

    /// Scan and render the configured root.
    pub fn scan(&self, config: &ScanConfig) -> Result<ScanOutput, ScanError> {
        self.scan_with_progress(config, |_| {})
    }

    /// Scan and render the configured root, reporting every emitted entry.
    pub fn scan_with_progress<F>(
        &self,
        config: &ScanConfig,
        on_progress: F,
    ) -> Result<ScanOutput, ScanError>
    where
        F: FnMut(&ScanProgress),
    {
        let root_path = config
            .root
            .canonicalize()
            .map_err(|e| ScanError::io(&config.root, e))?;

        if !root_path.is_dir() {
            return Err(ScanError::invalid_root(root_path, "not a directory"));
        }

        let filter = config.filter()?;

        tracing::info!(root = %root_path.display(), max_depth = config.max_depth, "scan started");

        let total = self.count_dir(config, &filter, &root_path, 1)?;

        let mut walk = RenderWalk {
            config,
            filter: &filter,
            root: &root_path,
            cancel: &self.cancel,
            progress_tx: &self.progress_tx,
            on_progress,
            tracker: ProgressTracker::new(total),
            text: String::new(),
            stats: TreeStats::new(),
            warnings: Vec::new(),
        };

        walk.text.push_str(&root_name(&root_path));
        walk.text.push(DIR_MARKER);
        walk.text.push('\n');
        walk.render_dir(&root_path, "", 1)?;

        let RenderWalk {
            tracker,
            text,
            stats,
            warnings,
            ..
        } = walk;

        let _ = self.progress_tx.send(tracker.snapshot());

        tracing::info!(
            items = tracker.processed(),
            errors = tracker.errors_count(),
            "scan finished"
        );

        Ok(ScanOutput {
            root_path,
            text,
            item_count: tracker.processed(),
            error_count: tracker.errors_count(),
            stats,
            warnings,
            scan_duration: tracker.elapsed(),
        })
    }

    /// Count the entries the render pass will emit below `dir`.
    fn count_dir(
        &self,
        config: &ScanConfig,
        filter: &EntryFilter,
        dir: &Path,
        depth: u32,
    ) -> Result<u64, ScanError> {
        if !config.allows_depth(depth) {
            return Ok(0);
        }

        // Unreadable directories are reported by the render pass.
        let Ok(entries) = list_sorted(dir, config, filter) else {
            return Ok(0);
        };

        let mut count = 0;
        for entry in entries {
            if self.cancel.is_cancelled() {
                return Err(ScanError::Interrupted);
            }
            count += 1;
            if entry.is_dir {
                count += self.count_dir(config, filter, &entry.path, depth + 1)?;
            }
        }
        Ok(count)
    }
}

impl Default for TreeScanner {
    fn default() -> Self {
        Self::new()
    }
}

/// State of one render pass.
struct RenderWalk<'a, F> {
    config: &'a ScanConfig,
    filter: &'a EntryFilter,
    root: &'a Path,
    cancel: &'a CancellationToken,
    progress_tx: &'a broadcast::Sender<ScanProgress>,
    on_progress: F,
    tracker: ProgressTracker,
    text: String,
    stats: TreeStats,
    warnings: Vec<ScanWarning>,
}

impl<F> RenderWalk<'_, F>
where
    F: FnMut(&ScanProgress),
{
    /// Render the children of `dir`; `prefix` is the column block of its ancestors.
    fn render_dir(&mut self, dir: &Path, prefix: &str, depth: u32) -> Result<(), ScanError> {
        if !self.config.allows_depth(depth) {
            return Ok(());
        }

        let entries = match list_sorted(dir, self.config, self.filter) {
            Ok(entries) => entries,
            Err(err) => {
                self.record_unreadable(dir, prefix, &err);
                return Ok(());
            }
        };

        let count = entries.len();
        for (idx, entry) in entries.into_iter().enumerate() {
            if self.cancel.is_cancelled() {
                return Err(ScanError::Interrupted);
            }

            let is_last = idx + 1 == count;
            self.emit(&entry, prefix, is_last);

            if entry.is_dir {
                self.stats.record_dir(depth);
                let child_prefix = format!("{prefix}{}", glyph::continuation(is_last));
                self.render_dir(&entry.path, &child_prefix, depth + 1)?;
            } else {
                self.stats.record_file(depth);
            }
        }
        Ok(())
    }

    /// Write one entry line and report progress for it.
    fn emit(&mut self, entry: &ScanEntry, prefix: &str, is_last: bool) {
        self.text.push_str(prefix);
        self.text.push_str(glyph::connector(is_last));
        self.text.push_str(&entry.name);
        if entry.is_dir {
            self.text.push(DIR_MARKER);
        }
        self.text.push('\n');

        let relative = entry
            .path
            .strip_prefix(self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| entry.path.clone());
        self.tracker.record_item(relative);

        let snapshot = self.tracker.snapshot();
        (self.on_progress)(&snapshot);
        if snapshot.processed % BROADCAST_INTERVAL == 0 {
            let _ = self.progress_tx.send(snapshot);
        }
    }

    /// Emit a placeholder under a directory that could not be listed.
    fn record_unreadable(&mut self, dir: &Path, prefix: &str, err: &io::Error) {
        let warning = ScanWarning::from_io(dir, err);
        let placeholder = match warning.kind {
            WarningKind::PermissionDenied => glyph::PERMISSION_DENIED,
            _ => glyph::READ_ERROR,
        };

        tracing::warn!(path = %dir.display(), error = %err, "cannot list directory");

        self.text.push_str(prefix);
        self.text.push_str(glyph::LAST_BRANCH);
        self.text.push_str(placeholder);
        self.text.push('\n');

        self.tracker.record_error();
        self.warnings.push(warning);
    }
}

/// List a directory: subdirectories first, then files, each sorted by name.
fn list_sorted(
    dir: &Path,
    config: &ScanConfig,
    filter: &EntryFilter,
) -> io::Result<Vec<ScanEntry>> {
    let mut dirs = Vec::new();
    let mut files = Vec::new();

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let name = CompactString::new(entry.file_name().to_string_lossy());
        if filter.should_skip(&name) {
            continue;
        }

        let file_type = entry.file_type()?;
        let path = entry.path();
        let is_dir = if file_type.is_symlink() {
            config.follow_symlinks && path.is_dir()
        } else {
            file_type.is_dir()
        };

        if is_dir {
            dirs.push(ScanEntry { name, path, is_dir });
        } else if config.include_files {
            files.push(ScanEntry { name, path, is_dir });
        }
    }

    dirs.sort_by(|a, b| a.name.cmp(&b.name));
    files.sort_by(|a, b| a.name.cmp(&b.name));
    dirs.extend(files);
    Ok(dirs)
}

/// Name shown on the diagram's first line.
fn root_name(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}
