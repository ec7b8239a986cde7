//! Box-drawing glyphs shared by the renderer and the parser.

/// Prefix for every sibling except the last one.
pub const BRANCH: &str = "├── ";

/// Prefix for the last sibling at a level.
pub const LAST_BRANCH: &str = "└── ";

/// Ancestor column when the ancestor still has siblings below it.
pub const VERTICAL: &str = "│   ";

/// Ancestor column when the ancestor was its parent's last child.
pub const SPACE: &str = "    ";

/// Trailing marker that turns a name into a directory.
pub const DIR_MARKER: char = '/';

/// Tee connector.
pub const TEE: char = '├';

/// Elbow connector.
pub const ELBOW: char = '└';

/// Vertical connector.
pub const PIPE: char = '│';

/// Horizontal connector. Always drawn as a pair.
pub const DASH: char = '─';

/// Placeholder emitted under a directory that could not be listed for lack of permission.
pub const PERMISSION_DENIED: &str = "[permission denied]";

/// Placeholder emitted under a directory that could not be listed for any other reason.
pub const READ_ERROR: &str = "[read error]";

/// Check whether a line body is one of the scanner's placeholders.
pub fn is_placeholder(name: &str) -> bool {
    name == PERMISSION_DENIED || name == READ_ERROR
}

/// Build the connector for a child, given whether it is the last sibling.
pub fn connector(is_last: bool) -> &'static str {
    if is_last { LAST_BRANCH } else { BRANCH }
}

/// Build the column an entry contributes to its children's prefix.
pub fn continuation(is_last: bool) -> &'static str {
    if is_last { SPACE } else { VERTICAL }
}
