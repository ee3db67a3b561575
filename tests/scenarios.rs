//! End-to-end scenarios: concrete inputs with exact styles and mark
//! positions, plus the boundary behaviors around them.

use texmark::{
    blank_line, start_state, token, tokenize_line, tokenize_source, LineStream, MarkKind,
    Position, Style, TokenizerState,
};

fn pos(line: usize, column: usize) -> Position {
    Position::new(line, column)
}

fn styles(line: &str, state: &mut TokenizerState) -> Vec<Style> {
    tokenize_line(line, state)
        .unwrap()
        .iter()
        .map(|span| span.style)
        .collect()
}

#[test]
fn title_with_short_and_long_forms() {
    let mut state = start_state();
    let styles = styles("\\title[Short Title]{Long Title}", &mut state);
    assert_eq!(
        styles,
        vec![
            Style::Tag,
            Style::Bracket,
            Style::Plain,
            Style::Bracket,
            Style::Bracket,
            Style::Plain,
            Style::Bracket,
        ]
    );

    let marks = state.marks();
    assert_eq!(marks.len(), 1);
    let title = &marks[0];
    assert_eq!(title.kind, MarkKind::Title);
    assert_eq!(title.from, pos(0, 0));
    assert_eq!(title.to, pos(0, 31));
    assert_eq!(title.content_from, pos(0, 20));
    assert_eq!(title.content_to, pos(0, 30));
}

#[test]
fn inline_math_spans_lines() {
    let mut state = start_state();
    for line in ["foo $x", "+y", "$"] {
        tokenize_line(line, &mut state).unwrap();
    }
    let marks = state.marks();
    assert_eq!(marks.len(), 1);
    let math = &marks[0];
    assert_eq!(math.kind, MarkKind::InlineMath);
    assert_eq!(math.from, pos(0, 4));
    assert_eq!(math.content_from, pos(0, 5));
    assert_eq!(math.to, pos(2, 1));
    assert_eq!(math.content_to, pos(2, 0));
}

#[test]
fn double_dollar_abandons_inline_math() {
    let mut state = start_state();
    tokenize_line("foo $x bar $$x$$", &mut state).unwrap();
    let marks = state.marks();
    assert!(marks.iter().all(|m| m.kind != MarkKind::InlineMath));
    assert_eq!(marks.len(), 1);
    let display = &marks[0];
    assert_eq!(display.kind, MarkKind::DisplayMath);
    assert_eq!(display.from, pos(0, 11));
    assert_eq!(display.to, pos(0, 16));
    assert_eq!(display.content_from, pos(0, 13));
    assert_eq!(display.content_to, pos(0, 14));
}

#[test]
fn math_nested_in_section_closes_first() {
    let mut state = start_state();
    tokenize_line("\\section{test $x$}", &mut state).unwrap();
    let marks = state.marks();
    assert_eq!(marks.len(), 2);
    assert_eq!(marks[0].kind, MarkKind::InlineMath);
    assert_eq!(marks[0].from, pos(0, 14));
    assert_eq!(marks[0].to, pos(0, 17));
    assert_eq!(marks[1].kind, MarkKind::Section);
    assert_eq!(marks[1].from, pos(0, 0));
    assert_eq!(marks[1].to, pos(0, 18));
    // The section was still open when the math mark was, so it is the
    // math's open parent.
    assert_eq!(marks[0].open_parent, Some(marks[1].id));
}

#[test]
fn enumerate_items_are_numbered_under_their_list() {
    let mut state = start_state();
    tokenize_line("\\begin{enumerate}", &mut state).unwrap();
    tokenize_line("\\item okok", &mut state).unwrap();

    let item = state
        .marks()
        .iter()
        .find(|m| m.kind == MarkKind::EnumerateItem)
        .expect("item mark");
    assert_eq!(item.checked.number, Some(1));
    assert_eq!(item.checked.kind, MarkKind::EnumerateItem);
    let parent_id = item.open_parent.expect("enclosing list");
    let parent = state.open_mark_by_id(parent_id).expect("list still open");
    assert_eq!(parent.kind, MarkKind::Enumerate);

    tokenize_line("\\end{enumerate}", &mut state).unwrap();
    assert_eq!(state.marks().len(), 2);
    let list = state.marks().last().unwrap();
    assert_eq!(list.kind, MarkKind::Enumerate);
    assert_eq!(list.checked.from_line, Some(0));
    assert_eq!(list.checked.to_line, Some(2));
}

#[test]
fn blank_line_abandons_equation() {
    let tokens =
        tokenize_source("\\begin{equation}\n\\alpha\n\n\\end{equation}").unwrap();
    assert!(tokens.marks.is_empty());
    // The orphaned \end still gets pass-through styling.
    assert!(!tokens.lines[3].is_empty());
}

#[test]
fn numbers_inside_math() {
    let mut state = start_state();
    let styles = styles("$1024.00$", &mut state);
    assert_eq!(styles, vec![Style::Keyword, Style::Number, Style::Keyword]);
    assert_eq!(state.marks().len(), 1);
    assert_eq!(state.marks()[0].kind, MarkKind::InlineMath);
}

#[test]
fn paren_inline_math_marks() {
    let mut state = start_state();
    let styles = styles("\\(x\\)", &mut state);
    assert_eq!(styles, vec![Style::Keyword, Style::Plain, Style::Keyword]);
    assert_eq!(state.marks().len(), 1);
    assert_eq!(state.marks()[0].kind, MarkKind::InlineMath);
}

#[test]
fn bracket_display_math_marks() {
    let mut state = start_state();
    let styles = styles("\\[ 42 \\]", &mut state);
    assert!(styles.contains(&Style::Number));
    assert_eq!(state.marks().len(), 1);
    assert_eq!(state.marks()[0].kind, MarkKind::DisplayMath);
}

#[test]
fn everything_after_end_document_is_comment() {
    let tokens = tokenize_source("\\end{document}\n\\textbf{abc}").unwrap();
    assert_eq!(tokens.lines[1].len(), 1);
    assert_eq!(tokens.lines[1][0].style, Style::Comment);
    assert!(tokens.marks.is_empty());
}

#[test]
fn item_must_start_at_column_zero() {
    let tokens = tokenize_source(
        "\\begin{itemize}\n\\item ok\nx \\item not an item\n\\end{itemize}",
    )
    .unwrap();
    let items: Vec<_> = tokens
        .marks
        .iter()
        .filter(|m| m.kind == MarkKind::Item)
        .collect();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].from, pos(1, 0));
}

#[test]
fn maketitle_only_as_whole_line() {
    let alone = tokenize_source("\\maketitle").unwrap();
    assert_eq!(alone.marks.len(), 1);
    assert_eq!(alone.marks[0].kind, MarkKind::Maketitle);

    let trailing = tokenize_source("\\maketitle now").unwrap();
    assert!(trailing.marks.is_empty());
    // Still styled as an ordinary command.
    assert_eq!(trailing.lines[0][0].style, Style::Tag);
}

#[test]
fn verb_takes_any_non_letter_delimiter() {
    let mut state = start_state();
    assert_eq!(
        styles("\\verb|code|", &mut state),
        vec![Style::Tag, Style::String, Style::Tag]
    );

    let mut starred = start_state();
    assert_eq!(
        styles("\\verb*!x!", &mut starred),
        vec![Style::Tag, Style::String, Style::Tag]
    );

    // A letter cannot delimit: \verbaXa reads as one ordinary command.
    let mut plain = start_state();
    assert_eq!(styles("\\verbaXa", &mut plain), vec![Style::Tag]);
}

#[test]
fn verb_resumes_on_the_next_line() {
    let mut state = start_state();
    tokenize_line("\\verb|ab", &mut state).unwrap();
    let styles = styles("cd| rest", &mut state);
    assert_eq!(styles, vec![Style::String, Style::Tag, Style::Plain]);
}

#[test]
fn verb_is_abandoned_by_a_blank_line() {
    let mut state = start_state();
    tokenize_line("\\verb|ab", &mut state).unwrap();
    blank_line(&mut state).unwrap();
    let styles = styles("cd| rest", &mut state);
    // Back in ordinary text: the pipe is not special there.
    assert_eq!(styles, vec![Style::Plain]);
}

#[test]
fn marked_command_prefixes_do_not_match() {
    let titled = tokenize_source("\\titlestyle{x}").unwrap();
    assert!(titled.marks.is_empty());
    assert_eq!(titled.lines[0][0].style, Style::Tag);

    let authored = tokenize_source("\\authorblockN{Name}").unwrap();
    assert!(authored.marks.is_empty());
}

#[test]
fn author_styles_without_marking() {
    let mut state = start_state();
    let styles = styles("\\author{A. Author}", &mut state);
    assert_eq!(
        styles,
        vec![Style::Tag, Style::Bracket, Style::Plain, Style::Bracket]
    );
    assert!(state.marks().is_empty());
}

#[test]
fn zero_consumption_keeps_the_line_counter_right() {
    let mut state = start_state();
    tokenize_line("a $b", &mut state).unwrap();
    assert_eq!(state.line, 0);
    assert_eq!(state.open_depth(), 1);

    // `$$` at the start of the next line abandons the inline mark without
    // consuming anything; the speculative line increment is compensated so
    // the re-call counts the line exactly once.
    let mut stream = LineStream::new("$$c$$");
    assert_eq!(token(&mut stream, &mut state).unwrap(), None);
    assert_eq!(state.line, 0);
    assert_eq!(state.open_depth(), 0);
    assert_eq!(token(&mut stream, &mut state).unwrap(), Some(Style::Keyword));
    assert_eq!(state.line, 1);
}

#[test]
fn includegraphics_marks_both_arguments() {
    let tokens = tokenize_source(
        "\\begin{figure}\n\\includegraphics[width=2cm]{plot.png}\n\\caption{A plot}\n\\end{figure}",
    )
    .unwrap();
    let kinds: Vec<MarkKind> = tokens.marks.iter().map(|m| m.kind).collect();
    assert_eq!(
        kinds,
        vec![
            MarkKind::IncludegraphicsOptional,
            MarkKind::Includegraphics,
            MarkKind::Caption,
            MarkKind::Figure,
        ]
    );
    // Both argument marks start at the command.
    assert_eq!(tokens.marks[0].from, pos(1, 0));
    assert_eq!(tokens.marks[1].from, pos(1, 0));
    assert_ne!(tokens.marks[0].to, tokens.marks[1].to);
    // All content marks nest under the still-open figure.
    let figure = tokens.marks.last().unwrap();
    assert!(tokens.marks[..3]
        .iter()
        .all(|m| m.open_parent == Some(figure.id)));
}

#[test]
fn nested_lists_number_independently() {
    let doc = "\\begin{enumerate}\n\\item a\n\\item b\n\\begin{itemize}\n\\item x\n\\end{itemize}\n\\item c\n\\end{enumerate}";
    let tokens = tokenize_source(doc).unwrap();
    let numbers: Vec<(MarkKind, Option<u32>)> = tokens
        .marks
        .iter()
        .filter(|m| matches!(m.kind, MarkKind::Item | MarkKind::EnumerateItem))
        .map(|m| (m.kind, m.checked.number))
        .collect();
    assert_eq!(
        numbers,
        vec![
            (MarkKind::EnumerateItem, Some(1)),
            (MarkKind::EnumerateItem, Some(2)),
            (MarkKind::Item, Some(1)),
            (MarkKind::EnumerateItem, Some(3)),
        ]
    );
}

#[test]
fn abstract_survives_blank_lines() {
    let doc = "\\begin{abstract}\nWe study things.\n\nMore things.\n\\end{abstract}";
    let tokens = tokenize_source(doc).unwrap();
    assert_eq!(tokens.marks.len(), 1);
    let abstract_mark = &tokens.marks[0];
    assert_eq!(abstract_mark.kind, MarkKind::Abstract);
    assert_eq!(abstract_mark.checked.from_line, Some(0));
    assert_eq!(abstract_mark.checked.to_line, Some(4));
}

#[test]
fn verbatim_keeps_content_as_string() {
    let doc = "\\begin{verbatim}\nraw $stuff$ \\here\n\n\\end{verbatim}";
    let tokens = tokenize_source(doc).unwrap();
    assert!(tokens.marks.is_empty());
    // No math mark, no command styling inside: everything is string.
    assert!(tokens.lines[1].iter().all(|s| s.style == Style::String));
}

#[test]
fn comment_environment_styles_as_comment() {
    let doc = "\\begin{comment}\nhidden text\n\\end{comment}";
    let tokens = tokenize_source(doc).unwrap();
    assert!(tokens.marks.is_empty());
    assert!(tokens.lines[1].iter().all(|s| s.style == Style::Comment));
}

#[test]
fn tikzpicture_passes_through_untracked() {
    let doc = "\\begin{tikzpicture}\n\\draw (0,0) -- (1,1);\n\n\\end{tikzpicture}\n$x$";
    let tokens = tokenize_source(doc).unwrap();
    // The blank line did not abandon the environment; afterwards normal
    // text tokenization resumes and the math mark is produced.
    assert_eq!(tokens.marks.len(), 1);
    assert_eq!(tokens.marks[0].kind, MarkKind::InlineMath);
    assert_eq!(tokens.lines[1][0].style, Style::Tag);
}

#[test]
fn list_end_tolerates_trailing_text() {
    let doc = "\\begin{itemize} \\item one\n\\end{itemize} trailing $x$";
    let tokens = tokenize_source(doc).unwrap();
    // The begin matched mid-line; the item did not (not at column 0), and
    // the end closed the list with text following on the same line.
    let list = tokens
        .marks
        .iter()
        .find(|m| m.kind == MarkKind::Itemize)
        .expect("list closed");
    assert_eq!(list.checked.to_line, Some(1));
    assert!(tokens.marks.iter().any(|m| m.kind == MarkKind::InlineMath));
}

#[test]
fn math_environment_begin_must_end_the_line() {
    let tokens = tokenize_source("\\begin{equation} x\n\\end{equation}").unwrap();
    // Fell through to the generic pass-through: no mark tracked.
    assert!(tokens.marks.is_empty());
}

#[test]
fn citation_commands_mark_their_own_kinds() {
    use texmark::CiteKind;
    let tokens = tokenize_source("\\cite{a} \\citep[p.~3]{b} \\Cref{c}").unwrap();
    let kinds: Vec<MarkKind> = tokens.marks.iter().map(|m| m.kind).collect();
    assert_eq!(
        kinds,
        vec![
            MarkKind::Citation(CiteKind::Cite),
            MarkKind::Citation(CiteKind::Citep),
            MarkKind::Citation(CiteKind::CrefCapital),
        ]
    );
}
