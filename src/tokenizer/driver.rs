//! The externally visible driver: `start_state`, `token`, `blank_line`,
//! plus convenience entry points that drive whole lines and documents.
//!
//! `token` is a single attempt, mirroring a host that re-calls at the same
//! position: it may return `Ok(None)` when the current sub-tokenizer
//! consumed nothing (an abandoned mark, a deferred entry). The convenience
//! drivers below perform the re-call loop; hosts holding their own stream
//! can do the same.

use super::mark::Mark;
use super::state::{Style, TokenizerState};
use super::stream::LineStream;
use super::tables;
use crate::error::{Result, TokenizerError};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The advertised line-comment delimiter.
pub const LINE_COMMENT: char = '%';

/// The initial tokenizer state: top-level only, line -1, no marks.
pub fn start_state() -> TokenizerState {
    TokenizerState::new()
}

/// Emits the next style token from the stream.
///
/// On start-of-line the line counter is pre-incremented; when the attempt
/// consumes nothing there (and the line is not empty) the increment is
/// compensated, so the counter stays correct across the host's re-call.
///
/// Returns `Ok(Some(style))` when input was consumed, `Ok(None)` when
/// nothing was consumed and the call should be repeated at the same
/// position, and the fatal [`TokenizerError::EmptyStack`] when the
/// sub-tokenizer stack has been exhausted (a stack-discipline bug, not an
/// input condition).
pub fn token(stream: &mut LineStream<'_>, state: &mut TokenizerState) -> Result<Option<Style>> {
    if stream.at_line_start() {
        state.line += 1;
    }
    if state.stack.is_empty() {
        return Err(TokenizerError::EmptyStack { line: state.line });
    }
    stream.begin_token();
    if stream.match_re(&tables::LINE_COMMENT, true).is_some() {
        return Ok(Some(Style::Comment));
    }
    let depth = state.stack.len();
    let Some(top) = state.stack.last().cloned() else {
        return Err(TokenizerError::EmptyStack { line: state.line });
    };
    match top.step(stream, state) {
        Some(style) => Ok(Some(style)),
        None => {
            if stream.at_line_start() && !stream.at_line_end() {
                state.line -= 1;
            }
            if state.stack.len() == depth && !stream.at_line_end() {
                state.stack.pop();
            }
            Ok(None)
        }
    }
}

/// Observes a blank line.
///
/// Equivalent to running `token` over an empty stream until the stack
/// settles: open arguments and math abandon, blank-tolerant environment
/// bodies stay put. The line counter advances exactly once.
pub fn blank_line(state: &mut TokenizerState) -> Result<()> {
    if state.stack.is_empty() {
        return Err(TokenizerError::EmptyStack { line: state.line });
    }
    state.line += 1;
    let mut stream = LineStream::empty();
    loop {
        let depth = state.stack.len();
        let Some(top) = state.stack.last().cloned() else {
            return Err(TokenizerError::EmptyStack { line: state.line });
        };
        let _ = top.step(&mut stream, state);
        if state.stack.len() == depth {
            return Ok(());
        }
    }
}

/// A styled run of characters within one line, in character columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StyledSpan {
    pub style: Style,
    pub from: usize,
    pub to: usize,
}

/// Tokenizes one non-blank line, driving `token` to the end of the line.
///
/// Blank lines must go through [`blank_line`] instead; passing one here
/// leaves the state untouched.
pub fn tokenize_line(line: &str, state: &mut TokenizerState) -> Result<Vec<StyledSpan>> {
    let mut stream = LineStream::new(line);
    let mut spans = Vec::new();
    while !stream.at_line_end() {
        let from = stream.column();
        if let Some(style) = token(&mut stream, state)? {
            spans.push(StyledSpan {
                style,
                from,
                to: stream.column(),
            });
        }
    }
    Ok(spans)
}

/// Styles and marks for a whole document.
#[derive(Debug, Clone)]
pub struct DocumentTokens {
    /// One span list per input line; blank lines get an empty list.
    pub lines: Vec<Vec<StyledSpan>>,
    /// Closed marks in closing order.
    pub marks: Vec<Mark>,
}

/// Tokenizes a whole document from a fresh state.
///
/// Lines containing only whitespace (non-breaking space included) are
/// routed through [`blank_line`], everything else through
/// [`tokenize_line`].
pub fn tokenize_source(source: &str) -> Result<DocumentTokens> {
    let mut state = start_state();
    let mut lines = Vec::new();
    for line in source.lines() {
        if tables::BLANK_LINE.is_match(line) {
            blank_line(&mut state)?;
            lines.push(Vec::new());
        } else {
            lines.push(tokenize_line(line, &mut state)?);
        }
    }
    Ok(DocumentTokens {
        lines,
        marks: state.marks().to_vec(),
    })
}
