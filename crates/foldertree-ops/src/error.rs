//! Materialization error types.

use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use foldertree_core::ParseError;

/// Errors that abort a whole materialization.
#[derive(Debug, Error)]
pub enum MaterializeError {
    /// The item sequence does not describe a tree.
    #[error(transparent)]
    InvalidTree(#[from] ParseError),

    /// The root name cannot be used as a single directory name.
    #[error("Invalid root name '{name}'")]
    InvalidRootName { name: String },

    /// The base directory could not be created.
    #[error("Cannot create base directory {path}: {source}")]
    CannotCreateBase {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The root directory could not be created under the base.
    #[error("Cannot create root directory {path}: {source}")]
    CannotCreateRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The background task failed before reporting.
    #[error("Task failed: {message}")]
    TaskFailed { message: String },
}

/// Kind of per-item failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemErrorKind {
    /// Permission was denied.
    PermissionDenied,
    /// Something of the other kind already occupies the path.
    Conflict,
    /// The name is not a single path component.
    InvalidName,
    /// Any other I/O failure.
    Io,
}

/// A failure creating one item. Recorded, never fatal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemError {
    /// Name of the item from the diagram.
    pub name: String,
    /// Target path on disk.
    pub path: PathBuf,
    /// Kind of failure.
    pub kind: ItemErrorKind,
    /// A human-readable error message.
    pub message: String,
}

impl ItemError {
    /// Create a new item error.
    pub fn new(
        name: impl Into<String>,
        path: PathBuf,
        kind: ItemErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            path,
            kind,
            message: message.into(),
        }
    }

    /// Classify an I/O failure.
    pub fn io(name: impl Into<String>, path: PathBuf, error: &io::Error) -> Self {
        let kind = match error.kind() {
            io::ErrorKind::PermissionDenied => ItemErrorKind::PermissionDenied,
            io::ErrorKind::AlreadyExists => ItemErrorKind::Conflict,
            _ => ItemErrorKind::Io,
        };
        Self::new(name, path, kind, error.to_string())
    }
}

impl std::fmt::Display for ItemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.name, self.path.display(), self.message)
    }
}
