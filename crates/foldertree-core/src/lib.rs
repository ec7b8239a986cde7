//! Core types and the tree-diagram codec for foldertree.
//!
//! This crate provides the data model shared by the scanner and the
//! materializer, the box-drawing glyph set, and the parser that turns
//! diagram text back into a hierarchy.

mod config;
mod error;
pub mod glyph;
mod item;
pub mod parse;
mod stats;

pub use config::{EntryFilter, ScanConfig, ScanConfigBuilder};
pub use error::{ParseError, ScanError, ScanWarning, WarningKind};
pub use item::{ParsedLine, TreeItem};
pub use parse::{Diagram, SkipReason, SkippedLine, parse, parse_diagram};
pub use stats::TreeStats;
