//! Tree-diagram parser.
//!
//! Parsing runs in two steps. [`parse_lines`] turns each non-blank line into
//! a [`ParsedLine`] carrying only its name, directory marker and indentation
//! level. [`resolve`] then infers every item's parent from the levels alone
//! and produces [`TreeItem`]s with paths relative to the root.
//!
//! # Indentation rule
//!
//! A space or `│` adds one to the indent counter, a `─` skips itself and the
//! character after it, `├` and `└` are skipped. The level is the counter
//! halved, so a diagram must spend two counted characters per nesting level.
//! The renderer's four-column prefix blocks satisfy this.
//!
//! # Parent rule
//!
//! An item's parent is the nearest preceding directory whose level is
//! strictly smaller than the item's own level. Items without such a
//! directory sit directly under the root.

use serde::{Deserialize, Serialize};

use crate::error::ParseError;
use crate::glyph::{self, DASH, DIR_MARKER, ELBOW, PIPE, TEE};
use crate::item::{ParsedLine, TreeItem};

/// Why a line was left out of the parsed sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Nothing but connectors and the directory marker.
    EmptyName,
    /// A placeholder the scanner emits for unreadable directories.
    Placeholder,
}

/// A non-blank line that did not produce an item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedLine {
    /// 1-based line number.
    pub line_no: usize,
    /// The line as it appeared in the input.
    pub text: String,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Result of parsing a whole diagram.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Diagram {
    /// Items in source order; the first one is the root.
    pub items: Vec<TreeItem>,
    /// Malformed lines that were skipped.
    pub skipped: Vec<SkippedLine>,
}

impl Diagram {
    /// The root item, if any.
    pub fn root(&self) -> Option<&TreeItem> {
        self.items.first()
    }

    /// Number of directories below the root.
    pub fn dir_count(&self) -> usize {
        self.items.iter().skip(1).filter(|i| i.is_dir()).count()
    }

    /// Number of files.
    pub fn file_count(&self) -> usize {
        self.items.iter().filter(|i| i.is_file()).count()
    }
}

/// Parse diagram text into resolved items, root first.
pub fn parse(text: &str) -> Result<Vec<TreeItem>, ParseError> {
    parse_diagram(text).map(|diagram| diagram.items)
}

/// Parse diagram text, keeping track of skipped lines.
pub fn parse_diagram(text: &str) -> Result<Diagram, ParseError> {
    let (lines, skipped) = parse_lines(text);
    let items = resolve(lines)?;

    tracing::debug!(
        items = items.len(),
        skipped = skipped.len(),
        "parsed tree diagram"
    );

    Ok(Diagram { items, skipped })
}

/// Split diagram text into parsed lines, dropping blank and malformed ones.
pub fn parse_lines(text: &str) -> (Vec<ParsedLine>, Vec<SkippedLine>) {
    let mut lines = Vec::new();
    let mut skipped = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        if raw.trim().is_empty() {
            continue;
        }

        match parse_line(raw, line_no) {
            Ok(line) => lines.push(line),
            Err(reason) => {
                tracing::warn!(line_no, line = raw, ?reason, "skipping diagram line");
                skipped.push(SkippedLine {
                    line_no,
                    text: raw.to_string(),
                    reason,
                });
            }
        }
    }

    (lines, skipped)
}

/// Parse one non-blank line.
pub fn parse_line(line: &str, line_no: usize) -> Result<ParsedLine, SkipReason> {
    let mut indent = 0usize;
    let mut start = line.len();
    let mut chars = line.char_indices();

    while let Some((idx, c)) = chars.next() {
        match c {
            ' ' | PIPE => indent += 1,
            TEE | ELBOW => {}
            DASH => {
                // The dash is always drawn as a pair; skip its partner.
                chars.next();
            }
            _ => {
                start = idx;
                break;
            }
        }
    }

    let body = line[start..].trim();
    let (body, is_dir) = match body.strip_suffix(DIR_MARKER) {
        Some(stripped) => (stripped.trim_end(), true),
        None => (body, false),
    };

    if body.is_empty() {
        return Err(SkipReason::EmptyName);
    }
    // Placeholders are always drawn without the directory marker.
    if !is_dir && glyph::is_placeholder(body) {
        return Err(SkipReason::Placeholder);
    }

    Ok(ParsedLine::new(body, is_dir, indent / 2, line_no))
}

/// Resolve parent relationships and build paths relative to the root.
///
/// The first line is the root and must be a directory.
pub fn resolve(lines: Vec<ParsedLine>) -> Result<Vec<TreeItem>, ParseError> {
    let mut lines = lines.into_iter();
    let root = lines.next().ok_or(ParseError::Empty)?;
    if !root.is_dir {
        return Err(ParseError::RootNotDirectory {
            name: root.name.to_string(),
        });
    }

    let mut items = Vec::with_capacity(lines.len() + 1);
    items.push(TreeItem::resolve(root, None));

    // Open directories as (level, index into items), levels strictly increasing.
    // The root is never on the stack: its children's paths are relative to it.
    let mut open: Vec<(usize, usize)> = Vec::new();

    for line in lines {
        let level = line.level;
        let is_dir = line.is_dir;

        let parent = if is_dir {
            // A directory shadows every open directory at its level or deeper.
            while open.last().is_some_and(|&(open_level, _)| open_level >= level) {
                open.pop();
            }
            open.last().map(|&(_, idx)| idx)
        } else {
            // A file cannot shadow anything, so leave the stack intact.
            open.iter()
                .rev()
                .find(|&&(open_level, _)| open_level < level)
                .map(|&(_, idx)| idx)
        };

        let item = TreeItem::resolve(line, parent.map(|idx| items[idx].full_path.as_path()));
        items.push(item);

        if is_dir {
            open.push((level, items.len() - 1));
        }
    }

    Ok(items)
}
