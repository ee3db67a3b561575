use lazy_static::lazy_static;
use regex::Regex;

use super::mark::{CiteKind, MarkKind};

/// Whitespace class used in all table patterns. Non-breaking space counts
/// as whitespace for command/argument gaps and blank-line detection.
pub(crate) const WS: &str = r"[\s\x{A0}]";

/// Index of an environment descriptor in [`struct@ENVIRONMENTS`].
pub(crate) type EnvId = usize;

/// Inner tokenizer an environment body delegates to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EnvTokenizer {
    Text,
    Math,
    /// Verbatim content styled `string`.
    Verbatim,
    /// Verbatim content styled `comment`.
    Comment,
    Tikz,
    List,
    Figure,
}

/// Which matcher list an environment belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EnvCategory {
    Figure,
    List,
    Math,
    Ignored,
    Tikz,
    Abstract,
}

/// Descriptor for a command that takes a braced argument.
///
/// `lookahead` requires the argument opener so marked command prefixes do
/// not match (`\titlestyle` never matches `\title`); `matcher` consumes the
/// command name and the gap before the argument.
pub(crate) struct ArgCommandSpec {
    pub name: &'static str,
    /// Mark kind for the required `{…}` argument, or `None` for commands
    /// that style but do not mark (`\author`).
    pub kind: Option<MarkKind>,
    /// Mark kind for optional `[…]` arguments; unmarked groups when `None`.
    pub optional_kind: Option<MarkKind>,
    pub lookahead: Regex,
    pub matcher: Regex,
}

fn arg_command(
    name: &'static str,
    kind: Option<MarkKind>,
    optional_kind: Option<MarkKind>,
) -> ArgCommandSpec {
    let escaped = regex::escape(name);
    ArgCommandSpec {
        name,
        kind,
        optional_kind,
        lookahead: Regex::new(&format!(r"^\\{}{}*[\[{{]", escaped, WS)).unwrap(),
        matcher: Regex::new(&format!(r"^\\{}{}*", escaped, WS)).unwrap(),
    }
}

/// Descriptor for a `\begin{name}…\end{name}` environment.
///
/// `begin` and `end` are written with four capture groups (`\begin`/`\end`,
/// the gap plus `{`, the name, `}`) so the matched text can be replayed as a
/// styled sequence. Begin patterns are anchored to end-of-line unless the
/// environment may sit on a single line.
pub(crate) struct EnvSpec {
    pub name: &'static str,
    pub category: EnvCategory,
    pub kind: Option<MarkKind>,
    pub tokenizer: EnvTokenizer,
    pub allow_blank_lines: bool,
    pub begin: Regex,
    pub end: Regex,
}

fn environment(
    name: &'static str,
    category: EnvCategory,
    kind: Option<MarkKind>,
    tokenizer: EnvTokenizer,
    allow_blank_lines: bool,
    single_line: bool,
) -> EnvSpec {
    let escaped = regex::escape(name);
    let eol = if single_line { "" } else { "$" };
    EnvSpec {
        name,
        category,
        kind,
        tokenizer,
        allow_blank_lines,
        begin: Regex::new(&format!(
            r"^(\\begin)({}*\{{)({})(\}}){}",
            WS, escaped, eol
        ))
        .unwrap(),
        end: Regex::new(&format!(r"^(\\end)({}*\{{)({})(\}})", WS, escaped)).unwrap(),
    }
}

lazy_static! {
    /// Line comments: optional leading whitespace, `%`, rest of the line.
    pub(crate) static ref LINE_COMMENT: Regex =
        Regex::new(&format!(r"^{}*%.*", WS)).unwrap();

    /// A line that counts as blank for the host-side routing into
    /// `blank_line`: whitespace only, with non-breaking space included.
    pub(crate) static ref BLANK_LINE: Regex =
        Regex::new(&format!(r"^{}*$", WS)).unwrap();

    /// Generic `\begin{…}` pass-through for untracked environments.
    pub(crate) static ref GENERIC_BEGIN: Regex =
        Regex::new(&format!(r"^(\\begin)({}*\{{)([A-Za-z]+\*?)(\}})", WS)).unwrap();

    /// Generic `\end{…}` pass-through.
    pub(crate) static ref GENERIC_END: Regex =
        Regex::new(&format!(r"^(\\end)({}*\{{)([A-Za-z]+\*?)(\}})", WS)).unwrap();

    /// The end-of-document trailer.
    pub(crate) static ref END_DOCUMENT: Regex =
        Regex::new(&format!(r"^(\\end)({}*\{{)(document)(\}})", WS)).unwrap();

    /// Commands tried by the top-level tokenizer, in match order.
    pub(crate) static ref TOP_COMMANDS: Vec<ArgCommandSpec> = vec![
        arg_command("title", Some(MarkKind::Title), None),
        arg_command("author", None, None),
        arg_command("chapter*", Some(MarkKind::ChapterStar), None),
        arg_command("chapter", Some(MarkKind::Chapter), None),
        arg_command("section*", Some(MarkKind::SectionStar), None),
        arg_command("section", Some(MarkKind::Section), None),
        arg_command("subsection*", Some(MarkKind::SubsectionStar), None),
        arg_command("subsection", Some(MarkKind::Subsection), None),
        arg_command("subsubsection*", Some(MarkKind::SubsubsectionStar), None),
        arg_command("subsubsection", Some(MarkKind::Subsubsection), None),
    ];

    /// Commands tried by the text tokenizer, in match order.
    pub(crate) static ref TEXT_COMMANDS: Vec<ArgCommandSpec> = {
        let mut commands = vec![
            arg_command("textbf", Some(MarkKind::Textbf), None),
            arg_command("textit", Some(MarkKind::Textit), None),
            arg_command("ref", Some(MarkKind::Ref), None),
        ];
        for cite in CiteKind::ALL {
            commands.push(arg_command(
                cite.command(),
                Some(MarkKind::Citation(cite)),
                None,
            ));
        }
        commands.push(arg_command("label", Some(MarkKind::Label), None));
        commands.push(arg_command("input", Some(MarkKind::Input), None));
        commands.push(arg_command("include", Some(MarkKind::Include), None));
        commands
    };

    /// Commands recognized inside figure environments.
    pub(crate) static ref FIGURE_COMMANDS: Vec<ArgCommandSpec> = vec![
        arg_command("caption", Some(MarkKind::Caption), None),
        arg_command(
            "includegraphics",
            Some(MarkKind::Includegraphics),
            Some(MarkKind::IncludegraphicsOptional),
        ),
    ];

    /// All tracked environments. Referenced by [`EnvId`] from stack entries,
    /// so order is part of the state contract within a session.
    pub(crate) static ref ENVIRONMENTS: Vec<EnvSpec> = {
        let mut envs = vec![
            environment("figure*", EnvCategory::Figure, Some(MarkKind::Figure), EnvTokenizer::Figure, false, false),
            environment("figure", EnvCategory::Figure, Some(MarkKind::Figure), EnvTokenizer::Figure, false, false),
            environment("itemize", EnvCategory::List, Some(MarkKind::Itemize), EnvTokenizer::List, false, true),
            environment("enumerate", EnvCategory::List, Some(MarkKind::Enumerate), EnvTokenizer::List, false, true),
        ];
        for name in [
            "equation*", "equation", "eqnarray*", "eqnarray", "align*", "align",
            "gather*", "gather", "multline*", "multline", "alignat*", "alignat",
            "xalignat*", "xalignat", "math", "displaymath",
        ] {
            envs.push(environment(name, EnvCategory::Math, Some(MarkKind::OuterDisplayMath), EnvTokenizer::Math, false, false));
        }
        envs.push(environment("verbatim*", EnvCategory::Ignored, None, EnvTokenizer::Verbatim, true, false));
        envs.push(environment("verbatim", EnvCategory::Ignored, None, EnvTokenizer::Verbatim, true, false));
        envs.push(environment("lstlisting", EnvCategory::Ignored, None, EnvTokenizer::Verbatim, true, false));
        envs.push(environment("comment", EnvCategory::Ignored, None, EnvTokenizer::Comment, true, false));
        envs.push(environment("tikzpicture", EnvCategory::Tikz, None, EnvTokenizer::Tikz, true, false));
        envs.push(environment("abstract", EnvCategory::Abstract, Some(MarkKind::Abstract), EnvTokenizer::Text, true, false));
        envs
    };
}

/// Looks up an environment descriptor.
pub(crate) fn env(id: EnvId) -> &'static EnvSpec {
    &ENVIRONMENTS[id]
}

/// Environments of one category, in table order.
pub(crate) fn envs_in(category: EnvCategory) -> impl Iterator<Item = (EnvId, &'static EnvSpec)> {
    ENVIRONMENTS
        .iter()
        .enumerate()
        .filter(move |(_, spec)| spec.category == category)
}
