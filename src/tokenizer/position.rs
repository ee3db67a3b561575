#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A source position as seen by the host editor.
///
/// `line` is 0-based and increases across lines; `column` is a 0-based
/// **character** offset into the line (not bytes), so positions line up with
/// what the host's text buffer reports for multi-byte content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}
