use nom::IResult;
use nom::branch::alt;
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::{alpha1, anychar, char, digit1, one_of};
use nom::combinator::{eof, opt, recognize, verify};
use nom::sequence::{pair, preceded};

/// A control word: backslash followed by one or more letters.
pub(super) fn control_word(input: &str) -> IResult<&str, &str> {
    recognize(pair(char('\\'), alpha1))(input)
}

/// A control symbol: backslash followed by a single non-letter.
pub(super) fn control_symbol(input: &str) -> IResult<&str, &str> {
    recognize(pair(char('\\'), verify(anychar, |c| !c.is_alphabetic())))(input)
}

/// Any command form, word or symbol.
pub(super) fn command(input: &str) -> IResult<&str, &str> {
    alt((control_word, control_symbol))(input)
}

/// Math operator characters styled as tags inside math.
pub(super) fn math_operator(input: &str) -> IResult<&str, char> {
    one_of("^_&~")(input)
}

/// A numeric literal, with an optional fractional part.
pub(super) fn number_literal(input: &str) -> IResult<&str, &str> {
    recognize(pair(digit1, opt(preceded(char('.'), digit1))))(input)
}

/// The `\verb` introducer: `\verb`, an optional `*`, then the delimiter
/// character, which must not be a letter. Returns the delimiter.
pub(super) fn verb_introducer(input: &str) -> IResult<&str, char> {
    preceded(
        pair(tag("\\verb"), opt(char('*'))),
        verify(anychar, |c| !c.is_alphabetic()),
    )(input)
}

/// An `\item` marker: `\item ` or `\item` at end of line. The trailing
/// space, when present, is part of the match.
pub(super) fn item_marker(input: &str) -> IResult<&str, &str> {
    recognize(pair(tag("\\item"), alt((recognize(char(' ')), eof))))(input)
}

/// `\maketitle` when it ends the line.
pub(super) fn maketitle_line(input: &str) -> IResult<&str, &str> {
    recognize(pair(tag("\\maketitle"), eof))(input)
}

/// A run of ordinary text: stops before any character that can begin a
/// command, group, bracket, math shift, comment or text operator.
pub(super) fn text_run(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| !matches!(c, '\\' | '{' | '}' | '[' | ']' | '$' | '%' | '&' | '^' | '_' | '~'))(
        input,
    )
}

/// A verbatim run: everything up to the next backslash.
pub(super) fn verbatim_run(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c != '\\')(input)
}

/// A tikz run: stops before commands and comment starts so nested
/// `\begin`/`\end` and `%` notes are seen at token boundaries.
pub(super) fn tikz_run(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c != '\\' && c != '%')(input)
}
