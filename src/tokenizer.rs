//! The incremental tokenizer, split into focused submodules:
//! - `position`: character-addressed source positions.
//! - `stream`: cursor over a single line with anchored matching.
//! - `mark`: the structural mark model handed to the host.
//! - `state`: cloneable per-line-boundary tokenizer state.
//! - `rules`: nom-powered character-level matchers.
//! - `tables`: precompiled command and environment descriptors.
//! - `sub`: the sub-tokenizer stack machine.
//! - `driver`: the host-facing entry points.
//!
//! Hosts interact with `driver` and read `mark`; everything below that is
//! the machinery keeping tokenization resumable at line boundaries.

pub mod mark;

mod driver;
mod position;
mod rules;
mod state;
mod stream;
mod sub;
mod tables;

pub use driver::{
    blank_line, start_state, token, tokenize_line, tokenize_source, DocumentTokens, StyledSpan,
    LINE_COMMENT,
};
pub use mark::{CheckedProperties, CiteKind, Mark, MarkId, MarkKind, OpenMark};
pub use position::Position;
pub use state::{Style, TokenizerState};
pub use stream::LineStream;
