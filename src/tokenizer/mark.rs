use super::position::Position;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Bibliographic citation commands. Each one closes over its own mark kind
/// so hosts can decorate `\citep` differently from `\citet`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CiteKind {
    Cite,
    Citep,
    Citet,
    Footcite,
    Nocite,
    Autocite,
    Autocites,
    Citeauthor,
    Citeyear,
    Parencite,
    Citealt,
    Textcite,
    Cref,
    CrefCapital,
}

impl CiteKind {
    /// The command name, without the backslash.
    pub fn command(self) -> &'static str {
        match self {
            CiteKind::Cite => "cite",
            CiteKind::Citep => "citep",
            CiteKind::Citet => "citet",
            CiteKind::Footcite => "footcite",
            CiteKind::Nocite => "nocite",
            CiteKind::Autocite => "autocite",
            CiteKind::Autocites => "autocites",
            CiteKind::Citeauthor => "citeauthor",
            CiteKind::Citeyear => "citeyear",
            CiteKind::Parencite => "parencite",
            CiteKind::Citealt => "citealt",
            CiteKind::Textcite => "textcite",
            CiteKind::Cref => "cref",
            CiteKind::CrefCapital => "Cref",
        }
    }

    pub const ALL: [CiteKind; 14] = [
        CiteKind::Cite,
        CiteKind::Citep,
        CiteKind::Citet,
        CiteKind::Footcite,
        CiteKind::Nocite,
        CiteKind::Autocite,
        CiteKind::Autocites,
        CiteKind::Citeauthor,
        CiteKind::Citeyear,
        CiteKind::Parencite,
        CiteKind::Citealt,
        CiteKind::Textcite,
        CiteKind::Cref,
        CiteKind::CrefCapital,
    ];
}

/// The closed set of structural mark kinds.
///
/// A mark identifies a semantically meaningful LaTeX construct the host may
/// decorate, fold, or render as rich text. The set is closed: unrecognized
/// constructs degrade to plain styling and produce no mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MarkKind {
    Title,
    Chapter,
    ChapterStar,
    Section,
    SectionStar,
    Subsection,
    SubsectionStar,
    Subsubsection,
    SubsubsectionStar,
    Textbf,
    Textit,
    Caption,
    Label,
    Ref,
    Input,
    Include,
    Includegraphics,
    IncludegraphicsOptional,
    InlineMath,
    DisplayMath,
    OuterDisplayMath,
    Abstract,
    Figure,
    Itemize,
    Enumerate,
    Item,
    EnumerateItem,
    Maketitle,
    Citation(CiteKind),
}

impl MarkKind {
    /// The host-facing tag for this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            MarkKind::Title => "title",
            MarkKind::Chapter => "chapter",
            MarkKind::ChapterStar => "chapter*",
            MarkKind::Section => "section",
            MarkKind::SectionStar => "section*",
            MarkKind::Subsection => "subsection",
            MarkKind::SubsectionStar => "subsection*",
            MarkKind::Subsubsection => "subsubsection",
            MarkKind::SubsubsectionStar => "subsubsection*",
            MarkKind::Textbf => "textbf",
            MarkKind::Textit => "textit",
            MarkKind::Caption => "caption",
            MarkKind::Label => "label",
            MarkKind::Ref => "ref",
            MarkKind::Input => "input",
            MarkKind::Include => "include",
            MarkKind::Includegraphics => "includegraphics",
            MarkKind::IncludegraphicsOptional => "includegraphics-optional",
            MarkKind::InlineMath => "inline-math",
            MarkKind::DisplayMath => "display-math",
            MarkKind::OuterDisplayMath => "outer-display-math",
            MarkKind::Abstract => "abstract",
            MarkKind::Figure => "figure",
            MarkKind::Itemize => "itemize",
            MarkKind::Enumerate => "enumerate",
            MarkKind::Item => "item",
            MarkKind::EnumerateItem => "enumerate-item",
            MarkKind::Maketitle => "maketitle",
            MarkKind::Citation(cite) => cite.command(),
        }
    }

    /// True for the environment kinds that enclose list items.
    pub fn is_list(self) -> bool {
        matches!(self, MarkKind::Itemize | MarkKind::Enumerate)
    }
}

/// Stable handle to a mark, assigned when the mark is opened.
///
/// Handles survive state cloning and mark closing: the closed mark produced
/// for an open mark carries the same id, so `open_parent` references can be
/// resolved whether the parent is still open or already closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MarkId(pub u32);

/// Auxiliary fields consumers read off a closed mark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CheckedProperties {
    /// Duplicate of the mark's kind.
    pub kind: MarkKind,
    /// 1-based enumeration index for list items.
    pub number: Option<u32>,
    /// Open-mark depth surrounding the mark when it closed.
    pub open_marks_count: Option<usize>,
    /// Line of the opening delimiter, for environment marks.
    pub from_line: Option<usize>,
    /// Line of the closing delimiter, for environment marks.
    pub to_line: Option<usize>,
}

impl CheckedProperties {
    pub fn new(kind: MarkKind) -> Self {
        Self {
            kind,
            number: None,
            open_marks_count: None,
            from_line: None,
            to_line: None,
        }
    }
}

/// A mark whose closing delimiter has not been seen yet.
///
/// Open marks live on the state's open-mark stack, innermost on top. They
/// are either closed (replaced by a [`Mark`] mirroring their kind and open
/// positions) or abandoned (discarded without a trace) when an abandon
/// condition such as a blank line fires first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpenMark {
    pub id: MarkId,
    pub kind: MarkKind,
    /// First character of the opening delimiter.
    pub from: Position,
    /// First character after the opening delimiter.
    pub content_from: Position,
    /// Innermost enclosing open mark at the time this mark was opened.
    pub open_parent: Option<MarkId>,
}

/// A closed mark: a region of source with both ends known.
///
/// `from..to` is the outer range including delimiters; `content_from..
/// content_to` is the inner range between them. `content_from ==
/// content_to` is permitted (empty argument); `from == to` is not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Mark {
    pub id: MarkId,
    pub kind: MarkKind,
    pub from: Position,
    pub content_from: Position,
    pub content_to: Position,
    pub to: Position,
    pub open_parent: Option<MarkId>,
    pub checked: CheckedProperties,
}
