//! Creating directories and empty files from parsed diagram items.

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Component, Path};
use std::time::Instant;

use foldertree_core::{ParseError, TreeItem, parse};

use crate::error::{ItemError, ItemErrorKind, MaterializeError};
use crate::progress::{MaterializeProgress, MaterializeReport};

/// What happened to one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Created,
    AlreadyPresent,
}

/// Materialize `items` under `base`.
///
/// The first item is the root and becomes `base/<root name>`; every other
/// item lands at `base/<root name>/<full_path>`. Directories are created
/// before files. Failures on single items are recorded in the report and
/// do not stop the remaining items.
pub fn materialize(
    items: &[TreeItem],
    base: impl AsRef<Path>,
) -> Result<MaterializeReport, MaterializeError> {
    materialize_with_progress(items, base, |_| {})
}

/// Parse diagram text and materialize it under `base`.
pub fn materialize_text(
    text: &str,
    base: impl AsRef<Path>,
) -> Result<MaterializeReport, MaterializeError> {
    let items = parse(text)?;
    materialize(&items, base)
}

/// Materialize `items` under `base`, reporting progress after every item.
pub fn materialize_with_progress<F>(
    items: &[TreeItem],
    base: impl AsRef<Path>,
    mut on_progress: F,
) -> Result<MaterializeReport, MaterializeError>
where
    F: FnMut(&MaterializeProgress),
{
    let start = Instant::now();
    let base = base.as_ref();

    let (root, rest) = items.split_first().ok_or(ParseError::Empty)?;
    if !root.is_dir {
        return Err(ParseError::RootNotDirectory {
            name: root.name.to_string(),
        }
        .into());
    }
    if !is_single_component(root.name.as_str()) {
        return Err(MaterializeError::InvalidRootName {
            name: root.name.to_string(),
        });
    }

    fs::create_dir_all(base).map_err(|source| MaterializeError::CannotCreateBase {
        path: base.to_path_buf(),
        source,
    })?;

    let root_path = base.join(root.name.as_str());
    let mut report = MaterializeReport::new(root_path.clone());

    match ensure_dir(&root_path) {
        Ok(Outcome::Created) => report.folders_created += 1,
        Ok(Outcome::AlreadyPresent) => {}
        Err(source) => {
            return Err(MaterializeError::CannotCreateRoot {
                path: root_path,
                source,
            });
        }
    }

    tracing::info!(root = %root_path.display(), items = rest.len(), "materializing tree");

    let mut progress = MaterializeProgress::new(rest.len());
    let dirs = rest.iter().filter(|item| item.is_dir);
    let files = rest.iter().filter(|item| !item.is_dir);

    for item in dirs.chain(files) {
        let target = root_path.join(&item.full_path);
        progress.set_current_path(Some(target.clone()));

        let result = create_item(item, &target);
        match &result {
            Ok(Outcome::Created) if item.is_dir => report.folders_created += 1,
            Ok(Outcome::Created) => report.files_created += 1,
            Ok(Outcome::AlreadyPresent) => report.already_present += 1,
            Err(err) => {
                tracing::warn!(item = %item.name, path = %target.display(), error = %err.message, "item failed");
                report.errors.push(err.clone());
            }
        }

        progress.complete_item(result.is_err());
        on_progress(&progress);
    }

    report.duration = start.elapsed();
    tracing::info!(summary = %report.summary(), "materialize finished");

    Ok(report)
}

/// Create one directory or empty file.
fn create_item(item: &TreeItem, target: &Path) -> Result<Outcome, ItemError> {
    let name = item.name.as_str();
    if !is_relative_path(&item.full_path) {
        return Err(ItemError::new(
            name,
            target.to_path_buf(),
            ItemErrorKind::InvalidName,
            "path escapes the root directory",
        ));
    }

    let outcome = if item.is_dir {
        ensure_dir(target)
    } else {
        ensure_file(target)
    };

    match outcome {
        Ok(outcome) => {
            tracing::debug!(path = %target.display(), ?outcome, "item done");
            Ok(outcome)
        }
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
            let message = if item.is_dir {
                "a file already exists here"
            } else {
                "a directory already exists here"
            };
            Err(ItemError::new(
                name,
                target.to_path_buf(),
                ItemErrorKind::Conflict,
                message,
            ))
        }
        Err(err) => Err(ItemError::io(name, target.to_path_buf(), &err)),
    }
}

/// Create a directory and its parents unless it already exists.
fn ensure_dir(path: &Path) -> io::Result<Outcome> {
    if path.is_dir() {
        return Ok(Outcome::AlreadyPresent);
    }
    if path.exists() {
        return Err(io::Error::from(io::ErrorKind::AlreadyExists));
    }
    fs::create_dir_all(path)?;
    Ok(Outcome::Created)
}

/// Create an empty file unless it already exists.
fn ensure_file(path: &Path) -> io::Result<Outcome> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    match OpenOptions::new().write(true).create_new(true).open(path) {
        Ok(_) => Ok(Outcome::Created),
        Err(err) if err.kind() == io::ErrorKind::AlreadyExists && path.is_file() => {
            Ok(Outcome::AlreadyPresent)
        }
        Err(err) => Err(err),
    }
}

/// Check that a name is exactly one normal path component.
fn is_single_component(name: &str) -> bool {
    let mut components = Path::new(name).components();
    matches!(components.next(), Some(Component::Normal(_))) && components.next().is_none()
}

/// Check that a resolved path stays below the root.
fn is_relative_path(path: &Path) -> bool {
    path.components().all(|c| matches!(c, Component::Normal(_)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_single_component() {
        assert!(is_single_component("proj"));
        assert!(is_single_component("My Project"));
        assert!(!is_single_component(".."));
        assert!(!is_single_component("."));
        assert!(!is_single_component("a/b"));
        assert!(!is_single_component(""));
    }

    #[test]
    fn test_relative_path() {
        assert!(is_relative_path(&PathBuf::from("src/main.rs")));
        assert!(!is_relative_path(&PathBuf::from("../outside")));
        assert!(!is_relative_path(&PathBuf::from("/etc/passwd")));
    }

    #[test]
    fn test_ensure_dir_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("a/b");

        assert_eq!(ensure_dir(&dir).unwrap(), Outcome::Created);
        assert_eq!(ensure_dir(&dir).unwrap(), Outcome::AlreadyPresent);
    }

    #[test]
    fn test_ensure_file_keeps_existing_content() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("notes.txt");
        fs::write(&file, "keep me").unwrap();

        assert_eq!(ensure_file(&file).unwrap(), Outcome::AlreadyPresent);
        assert_eq!(fs::read_to_string(&file).unwrap(), "keep me");
    }

    #[test]
    fn test_ensure_file_creates_parents() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("x/y/z.txt");

        assert_eq!(ensure_file(&file).unwrap(), Outcome::Created);
        assert_eq!(fs::metadata(&file).unwrap().len(), 0);
    }

    #[test]
    fn test_file_where_directory_exists_conflicts() {
        let temp = TempDir::new().unwrap();
        let items = parse("proj/\n└── data\n").unwrap();
        fs::create_dir_all(temp.path().join("proj/data")).unwrap();

        let report = materialize(&items, temp.path()).unwrap();
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, ItemErrorKind::Conflict);
        assert_eq!(report.files_created, 0);
    }

    #[test]
    fn test_dot_dot_item_is_rejected() {
        let temp = TempDir::new().unwrap();
        let items = parse("proj/\n├── ../\n└── ok.txt\n").unwrap();

        let report = materialize(&items, temp.path()).unwrap();
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.errors[0].kind, ItemErrorKind::InvalidName);
        assert_eq!(report.files_created, 1);
        assert!(temp.path().join("proj/ok.txt").is_file());
    }

    #[test]
    fn test_invalid_root_name() {
        let temp = TempDir::new().unwrap();
        let items = parse("../\n└── x\n").unwrap();

        let err = materialize(&items, temp.path()).unwrap_err();
        assert!(matches!(err, MaterializeError::InvalidRootName { .. }));
    }

    #[test]
    fn test_progress_covers_every_item() {
        let temp = TempDir::new().unwrap();
        let items = parse("proj/\n├── a/\n│   └── b.txt\n└── c.txt\n").unwrap();

        let mut seen = Vec::new();
        materialize_with_progress(&items, temp.path(), |p| {
            seen.push((p.items_completed, p.items_total))
        })
        .unwrap();

        assert_eq!(seen, vec![(1, 3), (2, 3), (3, 3)]);
    }
}
