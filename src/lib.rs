//! # texmark
//!
//! An incremental, resumable tokenizer and structural marker for LaTeX
//! source, designed to be driven by a line-oriented host editor.
//!
//! For each line of input the tokenizer produces a sequence of style tokens
//! for syntax highlighting and a set of **marks**: position-annotated
//! regions identifying semantically meaningful LaTeX constructs (titles,
//! sections, math zones, list items, figures, abstracts, …) that the host
//! can decorate, fold, or render as rich text.
//!
//! The tokenizer is resumable: [`TokenizerState`] is cheap to clone, the
//! host snapshots it at every line boundary, and tokenization can restart
//! from any snapshot, so edits re-tokenize only the affected suffix.
//!
//! ## Quick start
//!
//! ```
//! use texmark::{start_state, tokenize_line, MarkKind, Style};
//!
//! let mut state = start_state();
//! let spans = tokenize_line("\\section{Intro}", &mut state).unwrap();
//! assert_eq!(spans[0].style, Style::Tag);
//!
//! let marks = state.marks();
//! assert_eq!(marks.len(), 1);
//! assert_eq!(marks[0].kind, MarkKind::Section);
//! ```
//!
//! Whole documents go through [`tokenize_source`], which routes blank lines
//! (the recovery points of LaTeX tokenization) through [`blank_line`]:
//!
//! ```
//! let doc = "\\begin{enumerate}\n\\item first\n\\end{enumerate}";
//! let tokens = texmark::tokenize_source(doc).unwrap();
//! assert_eq!(tokens.marks.len(), 2); // the item, then the enumerate
//! ```
//!
//! Hosts that own their line streams use the lower-level driver directly:
//! [`start_state`], [`token`], [`blank_line`]. `token` is a single attempt
//! and may return `Ok(None)` without consuming input; callers then invoke
//! it again at the same position (see [`tokenize_line`] for the loop).

// Core modules
pub mod error;
pub mod tokenizer;

// Re-export key types for the public API
pub use error::{Result, TokenizerError};
pub use tokenizer::{
    blank_line, start_state, token, tokenize_line, tokenize_source, CheckedProperties, CiteKind,
    DocumentTokens, LineStream, Mark, MarkId, MarkKind, OpenMark, Position, Style, StyledSpan,
    TokenizerState, LINE_COMMENT,
};
