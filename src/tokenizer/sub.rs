//! The sub-tokenizer library: a pushdown machine over the line stream.
//!
//! Every stack entry is a small value implementing one contract: a step
//! that consumes input must return a style (possibly the neutral
//! [`Style::Plain`]), and a step that consumes nothing must return `None`,
//! leaving the stack untouched except possibly for popping itself (abandon
//! and deferral both work that way). A pushed entry is the first one tried
//! on the next call, which is how nested constructs compose without any
//! recursion in the state.

use super::mark::{MarkId, MarkKind};
use super::position::Position;
use super::rules;
use super::state::{Style, TokenizerState};
use super::stream::LineStream;
use super::tables::{self, ArgCommandSpec, EnvCategory, EnvId, EnvTokenizer};

/// Inner tokenizer a bracketed region or group delegates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Inner {
    Text,
    Math,
}

/// One entry on the sub-tokenizer stack.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SubTokenizer {
    /// Bottom of the stack. Guaranteed to consume at least one character on
    /// a non-empty stream.
    TopLevel,
    /// Awaits the `[`/`{` argument of a command that was just consumed.
    ArgCommand {
        /// Mark kind for the required argument; `None` styles without marking.
        kind: Option<MarkKind>,
        /// Mark kind for optional arguments; `None` leaves them unmarked.
        optional_kind: Option<MarkKind>,
        /// Outer start for any mark opened by this command.
        from: Position,
    },
    /// Scoped bracketed region whose open mark sits on the open-mark stack.
    Marked {
        close: &'static str,
        close_style: Style,
        /// Lookaheads that abandon the mark without consuming.
        abandon: &'static [&'static str],
        inner: Inner,
    },
    /// Unmarked bracketed group.
    Group { close: &'static str, inner: Inner },
    /// Replays a pre-verified match segment by segment with one style each,
    /// then runs its completion action.
    Sequence {
        segments: Vec<(usize, Style)>,
        index: usize,
        then: SeqThen,
    },
    /// Body of a tracked environment, delegating to its inner tokenizer.
    EnvBody { env: EnvId },
    /// Body of `\verb`, scanning for the delimiter character.
    VerbBody { delim: char },
    /// Everything after `\end{document}`.
    DocumentEnd,
}

/// Completion action of a [`SubTokenizer::Sequence`].
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum SeqThen {
    /// Open the environment's mark (when it marks) and push its body.
    BeginEnv { env: EnvId, from: Position },
    /// Close the environment's mark (when it marks).
    EndEnv { env: EnvId, content_to: Position },
    /// Push the document trailer.
    EndDocument,
    Nothing,
}

/// Styles of the four begin/end sequence segments: the command, the gap
/// plus `{`, the environment name, `}`.
const SEQ_STYLES: [Style; 4] = [Style::Tag, Style::Bracket, Style::Plain, Style::Bracket];

impl SubTokenizer {
    /// Runs this sub-tokenizer against the stream.
    ///
    /// `Some(style)` means input was consumed; `None` means nothing was, and
    /// the entry either left the stack alone or popped itself.
    pub(crate) fn step(
        &self,
        stream: &mut LineStream<'_>,
        state: &mut TokenizerState,
    ) -> Option<Style> {
        match self {
            SubTokenizer::TopLevel => step_top_level(stream, state),
            SubTokenizer::ArgCommand {
                kind,
                optional_kind,
                from,
            } => step_arg_command(*kind, *optional_kind, *from, stream, state),
            SubTokenizer::Marked {
                close,
                close_style,
                abandon,
                inner,
            } => step_marked(close, *close_style, abandon, *inner, stream, state),
            SubTokenizer::Group { close, inner } => step_group(close, *inner, stream, state),
            SubTokenizer::Sequence {
                segments,
                index,
                then,
            } => step_sequence(segments, *index, then, stream, state),
            SubTokenizer::EnvBody { env } => step_env_body(*env, stream, state),
            SubTokenizer::VerbBody { delim } => step_verb_body(*delim, stream, state),
            SubTokenizer::DocumentEnd => step_document_end(stream),
        }
    }
}

fn step_top_level(stream: &mut LineStream<'_>, state: &mut TokenizerState) -> Option<Style> {
    if stream.at_line_end() {
        return None;
    }
    if let Some(style) = try_arg_commands(&tables::TOP_COMMANDS, stream, state) {
        return Some(style);
    }
    // \maketitle is only recognized when it ends the line.
    let start = stream.column();
    if stream.match_parser(rules::maketitle_line).is_some() {
        let from = state.position(start);
        let to = state.position(stream.column());
        state.open_mark(MarkKind::Maketitle, from, to);
        state.close_mark(to, to);
        return Some(Style::Tag);
    }
    if let Some(style) = try_environments(EnvCategory::Abstract, stream, state) {
        return Some(style);
    }
    if let Some(captures) = stream.match_captures(&tables::END_DOCUMENT) {
        return start_sequence(stream, state, &captures, SeqThen::EndDocument);
    }
    step_text(stream, state)
}

/// The text tokenizer. Not a stack entry itself: the top level and every
/// bracketed region delegate into it.
fn step_text(stream: &mut LineStream<'_>, state: &mut TokenizerState) -> Option<Style> {
    if stream.at_line_end() {
        return None;
    }
    if let Some(style) = try_arg_commands(&tables::TEXT_COMMANDS, stream, state) {
        return Some(style);
    }
    if stream.match_str("\\[", false) {
        return open_delimited_math(stream, state, "\\[", "\\]", MarkKind::DisplayMath, &[]);
    }
    if stream.match_str("\\(", false) {
        return open_delimited_math(stream, state, "\\(", "\\)", MarkKind::InlineMath, &[]);
    }
    for category in [EnvCategory::Figure, EnvCategory::List, EnvCategory::Math] {
        if let Some(style) = try_environments(category, stream, state) {
            return Some(style);
        }
    }
    if let Some(delim) = stream.match_parser(rules::verb_introducer) {
        state.stack.push(SubTokenizer::VerbBody { delim });
        return Some(Style::Tag);
    }
    for category in [EnvCategory::Ignored, EnvCategory::Tikz] {
        if let Some(style) = try_environments(category, stream, state) {
            return Some(style);
        }
    }
    if let Some(captures) = stream.match_captures(&tables::GENERIC_BEGIN) {
        return start_sequence(stream, state, &captures, SeqThen::Nothing);
    }
    if let Some(captures) = stream.match_captures(&tables::GENERIC_END) {
        return start_sequence(stream, state, &captures, SeqThen::Nothing);
    }
    if stream.match_parser(rules::command).is_some() {
        return Some(Style::Tag);
    }
    if stream.match_str("{", true) {
        state.stack.push(SubTokenizer::Group {
            close: "}",
            inner: Inner::Text,
        });
        return Some(Style::Bracket);
    }
    if stream.match_str("$$", false) {
        return open_delimited_math(stream, state, "$$", "$$", MarkKind::DisplayMath, &[]);
    }
    if stream.match_str("$", false) {
        // `$$` anywhere inside abandons the inline mark so the enclosing
        // context can retry the display form at the same position.
        return open_delimited_math(stream, state, "$", "$", MarkKind::InlineMath, &["$$"]);
    }
    step_text_other(stream)
}

/// The fallback that keeps the text tokenizer total: brackets, text
/// operators, or a plain run.
fn step_text_other(stream: &mut LineStream<'_>) -> Option<Style> {
    if stream.match_parser(rules::text_run).is_some() {
        return Some(Style::Plain);
    }
    match stream.peek()? {
        '{' | '}' | '[' | ']' => {
            stream.next_char();
            Some(Style::Bracket)
        }
        '&' | '^' | '_' | '~' => {
            stream.next_char();
            Some(Style::Tag)
        }
        _ => {
            stream.next_char();
            Some(Style::Plain)
        }
    }
}

/// The math tokenizer, delegated to by math regions and environments.
fn step_math(stream: &mut LineStream<'_>, state: &mut TokenizerState) -> Option<Style> {
    if stream.at_line_end() {
        return None;
    }
    if let Some(delim) = stream.match_parser(rules::verb_introducer) {
        state.stack.push(SubTokenizer::VerbBody { delim });
        return Some(Style::Tag);
    }
    if let Some(captures) = stream.match_captures(&tables::GENERIC_BEGIN) {
        return start_sequence(stream, state, &captures, SeqThen::Nothing);
    }
    if let Some(captures) = stream.match_captures(&tables::GENERIC_END) {
        return start_sequence(stream, state, &captures, SeqThen::Nothing);
    }
    if stream.match_parser(rules::command).is_some() {
        return Some(Style::Tag);
    }
    if stream.match_parser(rules::math_operator).is_some() {
        return Some(Style::Tag);
    }
    if stream.match_parser(rules::number_literal).is_some() {
        return Some(Style::Number);
    }
    stream.next_char().map(|_| Style::Plain)
}

fn step_inner(
    inner: Inner,
    stream: &mut LineStream<'_>,
    state: &mut TokenizerState,
) -> Option<Style> {
    match inner {
        Inner::Text => step_text(stream, state),
        Inner::Math => step_math(stream, state),
    }
}

/// Tries every command in the table: on a lookahead hit, consumes the
/// command name and defers the argument to an [`SubTokenizer::ArgCommand`].
fn try_arg_commands(
    commands: &[ArgCommandSpec],
    stream: &mut LineStream<'_>,
    state: &mut TokenizerState,
) -> Option<Style> {
    for spec in commands {
        if stream.match_re(&spec.lookahead, false).is_some() {
            let from = state.position(stream.column());
            let _ = stream.match_re(&spec.matcher, true);
            state.stack.push(SubTokenizer::ArgCommand {
                kind: spec.kind,
                optional_kind: spec.optional_kind,
                from,
            });
            return Some(Style::Tag);
        }
    }
    None
}

fn step_arg_command(
    kind: Option<MarkKind>,
    optional_kind: Option<MarkKind>,
    from: Position,
    stream: &mut LineStream<'_>,
    state: &mut TokenizerState,
) -> Option<Style> {
    if stream.is_blank_line() {
        state.stack.pop();
        return None;
    }
    if stream.match_str("[", true) {
        // Stay on the stack: the required argument may still follow.
        if let Some(marked) = optional_kind {
            let content_from = state.position(stream.column());
            state.open_mark(marked, from, content_from);
            state.stack.push(SubTokenizer::Marked {
                close: "]",
                close_style: Style::Bracket,
                abandon: &[],
                inner: Inner::Text,
            });
        } else {
            state.stack.push(SubTokenizer::Group {
                close: "]",
                inner: Inner::Text,
            });
        }
        return Some(Style::Bracket);
    }
    if stream.match_str("{", true) {
        state.stack.pop();
        if let Some(marked) = kind {
            let content_from = state.position(stream.column());
            state.open_mark(marked, from, content_from);
            state.stack.push(SubTokenizer::Marked {
                close: "}",
                close_style: Style::Bracket,
                abandon: &[],
                inner: Inner::Text,
            });
        } else {
            state.stack.push(SubTokenizer::Group {
                close: "}",
                inner: Inner::Text,
            });
        }
        return Some(Style::Bracket);
    }
    // No argument at the cursor after all: degrade to plain styling.
    state.stack.pop();
    None
}

fn step_marked(
    close: &str,
    close_style: Style,
    abandon: &[&str],
    inner: Inner,
    stream: &mut LineStream<'_>,
    state: &mut TokenizerState,
) -> Option<Style> {
    if stream.is_blank_line() {
        state.abandon_mark();
        state.stack.pop();
        return None;
    }
    for pattern in abandon {
        if stream.match_str(pattern, false) {
            state.abandon_mark();
            state.stack.pop();
            return None;
        }
    }
    if stream.match_str(close, false) {
        let content_to = state.position(stream.column());
        stream.match_str(close, true);
        let to = state.position(stream.column());
        state.close_mark(content_to, to);
        state.stack.pop();
        return Some(close_style);
    }
    step_inner(inner, stream, state)
}

fn step_group(
    close: &str,
    inner: Inner,
    stream: &mut LineStream<'_>,
    state: &mut TokenizerState,
) -> Option<Style> {
    if stream.is_blank_line() {
        state.stack.pop();
        return None;
    }
    if stream.match_str(close, true) {
        state.stack.pop();
        return Some(Style::Bracket);
    }
    step_inner(inner, stream, state)
}

/// Opens a delimited math region: mark, region entry, opener style.
fn open_delimited_math(
    stream: &mut LineStream<'_>,
    state: &mut TokenizerState,
    open: &str,
    close: &'static str,
    kind: MarkKind,
    abandon: &'static [&'static str],
) -> Option<Style> {
    let from = state.position(stream.column());
    stream.match_str(open, true);
    let content_from = state.position(stream.column());
    state.open_mark(kind, from, content_from);
    state.stack.push(SubTokenizer::Marked {
        close,
        close_style: Style::Keyword,
        abandon,
        inner: Inner::Math,
    });
    Some(Style::Keyword)
}

/// Tries the begin-pattern of every environment in a category and starts
/// the begin sequence on a hit.
fn try_environments(
    category: EnvCategory,
    stream: &mut LineStream<'_>,
    state: &mut TokenizerState,
) -> Option<Style> {
    for (id, spec) in tables::envs_in(category) {
        if let Some(captures) = stream.match_captures(&spec.begin) {
            let from = state.position(stream.column());
            return start_sequence(stream, state, &captures, SeqThen::BeginEnv { env: id, from });
        }
    }
    None
}

/// Pushes a sequence built from the capture groups of a verified lookahead
/// and immediately runs its first segment.
fn start_sequence(
    stream: &mut LineStream<'_>,
    state: &mut TokenizerState,
    captures: &regex::Captures<'_>,
    then: SeqThen,
) -> Option<Style> {
    let segments = (1..=4)
        .map(|i| {
            let len = captures.get(i).map_or(0, |m| m.as_str().len());
            (len, SEQ_STYLES[i - 1])
        })
        .collect();
    let sequence = SubTokenizer::Sequence {
        segments,
        index: 0,
        then,
    };
    state.stack.push(sequence.clone());
    sequence.step(stream, state)
}

fn step_sequence(
    segments: &[(usize, Style)],
    index: usize,
    then: &SeqThen,
    stream: &mut LineStream<'_>,
    state: &mut TokenizerState,
) -> Option<Style> {
    if stream.is_blank_line() {
        state.stack.pop();
        return None;
    }
    let Some(&(len, style)) = segments.get(index) else {
        state.stack.pop();
        return None;
    };
    if index + 1 == segments.len() {
        state.stack.pop();
        stream.consume_bytes(len);
        run_then(then.clone(), stream, state);
    } else {
        stream.consume_bytes(len);
        if let Some(SubTokenizer::Sequence { index, .. }) = state.stack.last_mut() {
            *index += 1;
        }
    }
    Some(style)
}

fn run_then(then: SeqThen, stream: &mut LineStream<'_>, state: &mut TokenizerState) {
    match then {
        SeqThen::BeginEnv { env, from } => {
            let spec = tables::env(env);
            if let Some(kind) = spec.kind {
                let content_from = state.position(stream.column());
                state.open_mark(kind, from, content_from);
            }
            state.stack.push(SubTokenizer::EnvBody { env });
        }
        SeqThen::EndEnv { env, content_to } => {
            let spec = tables::env(env);
            if spec.kind.is_some() {
                let to = state.position(stream.column());
                let depth_after = state.open_depth().saturating_sub(1);
                if let Some(mark) = state.close_mark(content_to, to) {
                    mark.checked.open_marks_count = Some(depth_after);
                    mark.checked.from_line = Some(mark.from.line);
                    mark.checked.to_line = Some(to.line);
                }
            }
        }
        SeqThen::EndDocument => {
            state.stack.push(SubTokenizer::DocumentEnd);
        }
        SeqThen::Nothing => {}
    }
}

fn step_env_body(
    env: EnvId,
    stream: &mut LineStream<'_>,
    state: &mut TokenizerState,
) -> Option<Style> {
    let spec = tables::env(env);
    if stream.is_blank_line() {
        if spec.allow_blank_lines {
            return step_env_inner(spec.tokenizer, stream, state);
        }
        if spec.kind.is_some() {
            state.abandon_mark();
        }
        state.stack.pop();
        return None;
    }
    if let Some(captures) = stream.match_captures(&spec.end) {
        let content_to = state.position(stream.column());
        state.stack.pop();
        return start_sequence(stream, state, &captures, SeqThen::EndEnv { env, content_to });
    }
    step_env_inner(spec.tokenizer, stream, state)
}

fn step_env_inner(
    tokenizer: EnvTokenizer,
    stream: &mut LineStream<'_>,
    state: &mut TokenizerState,
) -> Option<Style> {
    match tokenizer {
        EnvTokenizer::Text => step_text(stream, state),
        EnvTokenizer::Math => step_math(stream, state),
        EnvTokenizer::Verbatim => step_verbatim(stream, Style::String),
        EnvTokenizer::Comment => step_verbatim(stream, Style::Comment),
        EnvTokenizer::Tikz => step_tikz(stream, state),
        EnvTokenizer::List => step_list(stream, state),
        EnvTokenizer::Figure => step_figure(stream, state),
    }
}

/// Verbatim-family content: runs of non-backslash characters, with a lone
/// backslash consumed on its own so end-lookaheads stay at token boundaries.
fn step_verbatim(stream: &mut LineStream<'_>, style: Style) -> Option<Style> {
    if stream.match_parser(rules::verbatim_run).is_some() {
        return Some(style);
    }
    stream.next_char().map(|_| style)
}

fn step_tikz(stream: &mut LineStream<'_>, state: &mut TokenizerState) -> Option<Style> {
    if stream.at_line_end() {
        return None;
    }
    if let Some(captures) = stream.match_captures(&tables::GENERIC_BEGIN) {
        return start_sequence(stream, state, &captures, SeqThen::Nothing);
    }
    if let Some(captures) = stream.match_captures(&tables::GENERIC_END) {
        return start_sequence(stream, state, &captures, SeqThen::Nothing);
    }
    if stream.match_parser(rules::command).is_some() {
        return Some(Style::Tag);
    }
    if stream.match_parser(rules::tikz_run).is_some() {
        return Some(Style::Plain);
    }
    stream.next_char().map(|_| Style::Plain)
}

/// Itemize/enumerate content: `\item` markers at the start of a line, text
/// otherwise.
fn step_list(stream: &mut LineStream<'_>, state: &mut TokenizerState) -> Option<Style> {
    if stream.at_line_start() && !stream.at_line_end() {
        let start = stream.column();
        if stream.match_parser(rules::item_marker).is_some() {
            let from = state.position(start);
            let to = state.position(stream.column());
            let (kind, list_line) = match state.innermost_open_list() {
                Some(list) if list.kind == MarkKind::Enumerate => {
                    (MarkKind::EnumerateItem, list.from.line)
                }
                Some(list) => (MarkKind::Item, list.from.line),
                None => (MarkKind::Item, 0),
            };
            let parent = state.open_marks.last().map(|m| m.id);
            let number = next_item_number(state, kind, parent, list_line);
            let depth = state.open_depth();
            state.open_mark(kind, from, to);
            if let Some(mark) = state.close_mark(to, to) {
                mark.checked.number = Some(number);
                mark.checked.open_marks_count = Some(depth);
            }
            return Some(Style::Tag);
        }
    }
    step_text(stream, state)
}

/// 1-based index of the next item: one past the most recent closed item of
/// the same kind under the same open parent, looking back no further than
/// the enclosing list's first line.
fn next_item_number(
    state: &TokenizerState,
    kind: MarkKind,
    parent: Option<MarkId>,
    list_line: usize,
) -> u32 {
    for mark in state.marks().iter().rev() {
        if mark.from.line < list_line {
            break;
        }
        if mark.kind == kind && mark.open_parent == parent {
            return mark.checked.number.unwrap_or(0) + 1;
        }
    }
    1
}

/// Figure content: captions and graphics inclusions, text otherwise.
fn step_figure(stream: &mut LineStream<'_>, state: &mut TokenizerState) -> Option<Style> {
    if let Some(style) = try_arg_commands(&tables::FIGURE_COMMANDS, stream, state) {
        return Some(style);
    }
    step_text(stream, state)
}

/// `\verb` body: string up to the delimiter, tag for the delimiter itself.
/// An unfinished body resumes on the next line; a blank line abandons it.
fn step_verb_body(
    delim: char,
    stream: &mut LineStream<'_>,
    state: &mut TokenizerState,
) -> Option<Style> {
    if stream.is_blank_line() {
        state.stack.pop();
        return None;
    }
    if stream.at_line_end() {
        return None;
    }
    if stream.peek() == Some(delim) {
        stream.next_char();
        state.stack.pop();
        return Some(Style::Tag);
    }
    if !stream.skip_to(delim) {
        stream.skip_to_end();
    }
    Some(Style::String)
}

/// The trailer after `\end{document}`: everything is a comment.
fn step_document_end(stream: &mut LineStream<'_>) -> Option<Style> {
    if stream.at_line_end() {
        return None;
    }
    stream.skip_to_end();
    Some(Style::Comment)
}
