//! Async materialization with progress over a channel.

use std::path::PathBuf;

use foldertree_core::TreeItem;
use tokio::sync::mpsc;

use crate::materialize::materialize_with_progress;
use crate::{MATERIALIZE_CHANNEL_SIZE, MaterializeError, MaterializeProgress, MaterializeReport};

/// Result sent through the channel during materialization.
#[derive(Debug)]
pub enum MaterializeResult {
    /// Progress update.
    Progress(MaterializeProgress),
    /// The operation completed.
    Complete(Result<MaterializeReport, MaterializeError>),
}

/// Start an async materialization of `items` under `base`.
///
/// Progress updates arrive in order, followed by exactly one
/// [`MaterializeResult::Complete`]. Must be called from within a Tokio
/// runtime.
pub fn start_materialize(items: Vec<TreeItem>, base: PathBuf) -> mpsc::Receiver<MaterializeResult> {
    let (tx, rx) = mpsc::channel(MATERIALIZE_CHANNEL_SIZE);

    tokio::spawn(async move {
        materialize_impl(items, base, tx).await;
    });

    rx
}

async fn materialize_impl(
    items: Vec<TreeItem>,
    base: PathBuf,
    tx: mpsc::Sender<MaterializeResult>,
) {
    let progress_tx = tx.clone();
    let result = tokio::task::spawn_blocking(move || {
        materialize_with_progress(&items, &base, |progress| {
            // A dropped receiver only means nobody is watching.
            let _ = progress_tx.blocking_send(MaterializeResult::Progress(progress.clone()));
        })
    })
    .await
    .unwrap_or_else(|e| {
        Err(MaterializeError::TaskFailed {
            message: e.to_string(),
        })
    });

    let _ = tx.send(MaterializeResult::Complete(result)).await;
}
