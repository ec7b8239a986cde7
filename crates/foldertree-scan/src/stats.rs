//! Whole-tree folder and file counts.

use std::path::{Path, PathBuf};
use std::time::Duration;

use jwalk::{Parallelism, WalkDir};
use serde::Serialize;

use foldertree_core::{ScanError, ScanWarning, TreeStats, WarningKind};

/// Folder and file counts for everything below a root.
#[derive(Debug, Clone, Serialize)]
pub struct FolderStats {
    /// Canonical root path that was counted.
    pub root_path: PathBuf,
    /// Counts, unbounded by depth and including hidden entries.
    pub stats: TreeStats,
    /// Entries that could not be read.
    pub warnings: Vec<ScanWarning>,
}

/// Count every folder and file under `root` using a parallel walk.
///
/// `threads` of 0 uses the shared rayon pool.
pub fn folder_stats(root: impl AsRef<Path>, threads: usize) -> Result<FolderStats, ScanError> {
    let root = root.as_ref();
    let root_path = root.canonicalize().map_err(|e| ScanError::io(root, e))?;
    if !root_path.is_dir() {
        return Err(ScanError::invalid_root(root_path, "not a directory"));
    }

    let parallelism = match threads {
        0 => Parallelism::RayonDefaultPool {
            busy_timeout: Duration::from_millis(100),
        },
        n => Parallelism::RayonNewPool(n),
    };

    let walker = WalkDir::new(&root_path)
        .parallelism(parallelism)
        .skip_hidden(false)
        .follow_links(false)
        .min_depth(1);

    let mut stats = TreeStats::new();
    let mut warnings = Vec::new();

    for entry_result in walker {
        let entry = match entry_result {
            Ok(e) => e,
            Err(err) => {
                let path = err.path().map(Path::to_path_buf).unwrap_or_default();
                let warning = match err.io_error() {
                    Some(io) => ScanWarning::from_io(path, io),
                    None => ScanWarning::new(path, err.to_string(), WarningKind::ReadError),
                };
                warnings.push(warning);
                continue;
            }
        };

        let depth = entry.depth() as u32;
        if entry.file_type().is_dir() {
            stats.record_dir(depth);
        } else {
            stats.record_file(depth);
        }
    }

    tracing::debug!(root = %root_path.display(), %stats, "counted folder");

    Ok(FolderStats {
        root_path,
        stats,
        warnings,
    })
}
