use super::mark::{CheckedProperties, Mark, MarkId, MarkKind, OpenMark};
use super::position::Position;
use super::sub::SubTokenizer;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Style token emitted for a run of consumed characters.
///
/// These are the values the driver returns to the host, one per `token`
/// call. `Plain` is the neutral "no style" sentinel: input was consumed but
/// carries no highlighting class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Style {
    Tag,
    Bracket,
    Keyword,
    Comment,
    String,
    Number,
    Plain,
}

impl Style {
    /// The host-facing style class, or `None` for the neutral sentinel.
    pub fn as_str(self) -> Option<&'static str> {
        match self {
            Style::Tag => Some("tag"),
            Style::Bracket => Some("bracket"),
            Style::Keyword => Some("keyword"),
            Style::Comment => Some("comment"),
            Style::String => Some("string"),
            Style::Number => Some("number"),
            Style::Plain => None,
        }
    }
}

/// Tokenizer state at a line boundary.
///
/// The host snapshots this with a plain `clone()` after every line and may
/// restart tokenization from any snapshot: the stack, open-mark stack and
/// closed-mark list hold only values, so a clone is a valid, independent
/// restart point. External code never mutates a state; it evolves only
/// through [`token`](super::driver::token) and
/// [`blank_line`](super::driver::blank_line).
#[derive(Debug, Clone, PartialEq)]
pub struct TokenizerState {
    /// Sub-tokenizer stack, bottom entry is the top-level tokenizer.
    pub(crate) stack: Vec<SubTokenizer>,
    /// Most recently entered line index. Starts at -1; the driver
    /// pre-increments it whenever a stream is at start-of-line and applies a
    /// compensating decrement when nothing was consumed there.
    pub line: i64,
    /// Open marks, innermost on top.
    pub(crate) open_marks: Vec<OpenMark>,
    /// Closed marks in closing order (ascending `to`).
    pub(crate) marks: Vec<Mark>,
    next_mark_id: u32,
}

impl TokenizerState {
    /// The initial state: top-level tokenizer only, no marks, line -1.
    pub fn new() -> Self {
        Self {
            stack: vec![SubTokenizer::TopLevel],
            line: -1,
            open_marks: Vec::new(),
            marks: Vec::new(),
            next_mark_id: 0,
        }
    }

    /// Closed marks produced so far, ordered by closing time.
    pub fn marks(&self) -> &[Mark] {
        &self.marks
    }

    /// Number of currently open marks.
    pub fn open_depth(&self) -> usize {
        self.open_marks.len()
    }

    /// Resolves a mark id against the closed-mark list.
    pub fn mark_by_id(&self, id: MarkId) -> Option<&Mark> {
        self.marks.iter().find(|m| m.id == id)
    }

    /// Resolves a mark id against the open-mark stack.
    pub fn open_mark_by_id(&self, id: MarkId) -> Option<&OpenMark> {
        self.open_marks.iter().find(|m| m.id == id)
    }

    /// The current position for the given stream column.
    ///
    /// Only meaningful while input is being consumed, when `line` has been
    /// entered and is non-negative.
    pub(crate) fn position(&self, column: usize) -> Position {
        debug_assert!(self.line >= 0);
        Position::new(self.line as usize, column)
    }

    /// Opens a mark and pushes it onto the open-mark stack. The parent is
    /// the innermost mark open at this moment.
    pub(crate) fn open_mark(
        &mut self,
        kind: MarkKind,
        from: Position,
        content_from: Position,
    ) -> MarkId {
        let id = MarkId(self.next_mark_id);
        self.next_mark_id += 1;
        let open_parent = self.open_marks.last().map(|m| m.id);
        self.open_marks.push(OpenMark {
            id,
            kind,
            from,
            content_from,
            open_parent,
        });
        id
    }

    /// Discards the innermost open mark without producing a closed mark.
    pub(crate) fn abandon_mark(&mut self) {
        self.open_marks.pop();
    }

    /// Closes the innermost open mark. `content_to` is the first character
    /// of the closing delimiter, `to` the first character past it. Returns
    /// the freshly appended mark so producers can record extra checked
    /// properties.
    pub(crate) fn close_mark(&mut self, content_to: Position, to: Position) -> Option<&mut Mark> {
        let open = self.open_marks.pop()?;
        self.marks.push(Mark {
            id: open.id,
            kind: open.kind,
            from: open.from,
            content_from: open.content_from,
            content_to,
            to,
            open_parent: open.open_parent,
            checked: CheckedProperties::new(open.kind),
        });
        self.marks.last_mut()
    }

    /// The innermost open list environment mark, if any.
    pub(crate) fn innermost_open_list(&self) -> Option<&OpenMark> {
        self.open_marks.iter().rev().find(|m| m.kind.is_list())
    }
}

impl Default for TokenizerState {
    fn default() -> Self {
        Self::new()
    }
}
