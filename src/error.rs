/// Error handling for the tokenizer.
///
/// The tokenizer recovers locally from unbalanced LaTeX (open marks are
/// abandoned, the input re-tried against the enclosing context), so almost
/// nothing here is an error. The one unrecoverable condition is an empty
/// sub-tokenizer stack: the bottom-of-stack tokenizer is designed to always
/// consume, and observing an empty stack means a sub-tokenizer broke the
/// stack discipline.
use std::fmt;

/// Main error type for the tokenizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenizerError {
    /// A `token` or `blank_line` call observed an empty sub-tokenizer stack.
    EmptyStack { line: i64 },
}

impl fmt::Display for TokenizerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenizerError::EmptyStack { line } => {
                write!(f, "sub-tokenizer stack empty at line {}", line)
            }
        }
    }
}

impl std::error::Error for TokenizerError {}

/// Convenience type alias for Results in the tokenizer.
pub type Result<T> = std::result::Result<T, TokenizerError>;
