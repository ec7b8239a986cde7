//! Materializing tree diagrams onto the filesystem.
//!
//! This crate turns parsed [`TreeItem`](foldertree_core::TreeItem)s into
//! directories and empty files. The blocking entry points report progress
//! through a callback; [`start_materialize`] runs the same work on the
//! blocking pool and streams progress over a channel.

mod error;
mod materialize;
mod progress;
mod spawn;

pub use error::{ItemError, ItemErrorKind, MaterializeError};
pub use materialize::{materialize, materialize_text, materialize_with_progress};
pub use progress::{MaterializeProgress, MaterializeReport};
pub use spawn::{MaterializeResult, start_materialize};

/// Default channel buffer size for materialize progress updates.
pub const MATERIALIZE_CHANNEL_SIZE: usize = 100;
