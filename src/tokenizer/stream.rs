use nom::IResult;
use regex::Regex;

/// Cursor over a single line of source.
///
/// This is the tokenizer's only view of the input: one line, no line
/// terminator, no knowledge of neighboring lines (cross-line behavior lives
/// in [`TokenizerState`](super::state::TokenizerState)). The host creates a
/// fresh stream per line and calls the driver until the stream is exhausted.
///
/// The cursor advances by bytes internally but tracks character offsets in
/// parallel, so every position handed to mark records is a character column.
/// Matching comes in three flavors, all anchored at the cursor:
///
/// - [`match_str`](Self::match_str) for literals,
/// - [`match_re`](Self::match_re) / [`match_captures`](Self::match_captures)
///   for the precompiled table patterns (which must be written with a leading
///   `^` so the regex engine anchors them),
/// - [`match_parser`](Self::match_parser) for the nom rules in
///   [`rules`](super::rules).
#[derive(Debug, Clone)]
pub struct LineStream<'a> {
    line: &'a str,
    /// Byte offset of the cursor.
    pos: usize,
    /// Character offset of the cursor.
    pos_chars: usize,
    /// Byte offset where the current token began.
    start: usize,
    /// Character offset where the current token began.
    start_chars: usize,
}

impl<'a> LineStream<'a> {
    /// Creates a stream over one line. `line` must not contain `\n` or `\r`.
    pub fn new(line: &'a str) -> Self {
        debug_assert!(!line.contains('\n') && !line.contains('\r'));
        Self {
            line,
            pos: 0,
            pos_chars: 0,
            start: 0,
            start_chars: 0,
        }
    }

    /// An empty stream, as handed to sub-tokenizers for blank lines.
    pub fn empty() -> LineStream<'static> {
        LineStream::new("")
    }

    /// The next character, or `None` at end of line.
    pub fn peek(&self) -> Option<char> {
        self.line[self.pos..].chars().next()
    }

    /// Advances one character and returns it.
    pub fn next_char(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.pos += ch.len_utf8();
        self.pos_chars += 1;
        Some(ch)
    }

    /// True when the cursor is at the first character of the line.
    pub fn at_line_start(&self) -> bool {
        self.pos == 0
    }

    /// True when the cursor has consumed the whole line.
    pub fn at_line_end(&self) -> bool {
        self.pos >= self.line.len()
    }

    /// True for the empty stream used to represent blank lines.
    pub fn is_blank_line(&self) -> bool {
        self.at_line_start() && self.at_line_end()
    }

    /// Character offset of the cursor.
    pub fn column(&self) -> usize {
        self.pos_chars
    }

    /// Character offset at which the current token started.
    pub fn token_start(&self) -> usize {
        self.start_chars
    }

    /// Marks the cursor as the start of the next token.
    pub fn begin_token(&mut self) {
        self.start = self.pos;
        self.start_chars = self.pos_chars;
    }

    /// Text consumed since [`begin_token`](Self::begin_token).
    pub fn current(&self) -> &'a str {
        &self.line[self.start..self.pos]
    }

    /// The unconsumed remainder of the line.
    pub fn rest(&self) -> &'a str {
        &self.line[self.pos..]
    }

    /// Matches a literal at the cursor. Advances past it when `consume` is
    /// set and the literal is present.
    pub fn match_str(&mut self, literal: &str, consume: bool) -> bool {
        if self.rest().starts_with(literal) {
            if consume {
                self.advance_bytes(literal.len());
            }
            true
        } else {
            false
        }
    }

    /// Matches an anchored pattern at the cursor and returns the matched
    /// text. The pattern must carry a leading `^`. Advances when `consume`
    /// is set.
    pub fn match_re(&mut self, pattern: &Regex, consume: bool) -> Option<&'a str> {
        let m = pattern.find(self.rest())?;
        debug_assert_eq!(m.start(), 0);
        let text = &self.rest()[..m.end()];
        if consume {
            self.advance_bytes(m.end());
        }
        Some(text)
    }

    /// Lookahead with capture groups; never consumes.
    pub fn match_captures(&self, pattern: &Regex) -> Option<regex::Captures<'a>> {
        pattern.captures(self.rest())
    }

    /// Applies a nom parser anchored at the cursor, consuming what it
    /// recognized on success.
    pub fn match_parser<O>(
        &mut self,
        parser: impl Fn(&'a str) -> IResult<&'a str, O>,
    ) -> Option<O> {
        let input = self.rest();
        match parser(input) {
            Ok((remaining, value)) => {
                self.advance_bytes(input.len() - remaining.len());
                Some(value)
            }
            Err(_) => None,
        }
    }

    /// Lookahead with a nom parser; never consumes.
    pub fn peek_parser<O>(&self, parser: impl Fn(&'a str) -> IResult<&'a str, O>) -> Option<O> {
        parser(self.rest()).ok().map(|(_, value)| value)
    }

    /// Consumes the rest of the line.
    pub fn skip_to_end(&mut self) {
        self.advance_bytes(self.line.len() - self.pos);
    }

    /// Advances to (but not past) the next occurrence of `ch`. Fails without
    /// moving when `ch` is absent from the remainder.
    pub fn skip_to(&mut self, ch: char) -> bool {
        match self.rest().find(ch) {
            Some(offset) => {
                self.advance_bytes(offset);
                true
            }
            None => false,
        }
    }

    /// Consumes exactly `len` bytes. Used to replay segments of a match
    /// that was already verified by lookahead.
    pub(crate) fn consume_bytes(&mut self, len: usize) {
        self.advance_bytes(len);
    }

    fn advance_bytes(&mut self, len: usize) {
        let consumed = &self.line[self.pos..self.pos + len];
        self.pos += len;
        self.pos_chars += consumed.chars().count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lazy_static::lazy_static;

    lazy_static! {
        static ref WORD: Regex = Regex::new(r"^[a-z]+").unwrap();
    }

    #[test]
    fn literal_match_consumes_on_request() {
        let mut stream = LineStream::new("\\title{x}");
        assert!(stream.match_str("\\title", false));
        assert!(stream.at_line_start());
        assert!(stream.match_str("\\title", true));
        assert_eq!(stream.column(), 6);
        assert!(!stream.match_str("\\title", true));
    }

    #[test]
    fn regex_match_is_anchored() {
        let mut stream = LineStream::new("abc def");
        assert_eq!(stream.match_re(&WORD, true), Some("abc"));
        // The space does not match, even though a word follows it.
        assert_eq!(stream.match_re(&WORD, false), None);
    }

    #[test]
    fn current_tracks_token_extent() {
        let mut stream = LineStream::new("hello world");
        stream.begin_token();
        stream.next_char();
        stream.next_char();
        assert_eq!(stream.current(), "he");
        stream.begin_token();
        stream.skip_to_end();
        assert_eq!(stream.current(), "llo world");
        assert!(stream.at_line_end());
    }

    #[test]
    fn skip_to_stops_before_target() {
        let mut stream = LineStream::new("abc|def");
        assert!(stream.skip_to('|'));
        assert_eq!(stream.peek(), Some('|'));
        assert_eq!(stream.column(), 3);
        let mut missing = LineStream::new("abc");
        assert!(!missing.skip_to('|'));
        assert!(missing.at_line_start());
    }

    #[test]
    fn columns_are_character_offsets() {
        let mut stream = LineStream::new("é$x");
        stream.next_char();
        assert_eq!(stream.column(), 1);
        assert_eq!(stream.peek(), Some('$'));
    }

    #[test]
    fn blank_line_stream_is_empty() {
        let stream = LineStream::empty();
        assert!(stream.is_blank_line());
        assert_eq!(stream.peek(), None);
    }
}
