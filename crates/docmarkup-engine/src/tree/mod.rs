//! # Markup Tree
//!
//! An owned, immutable block/inline tree built from pulldown-cmark's event
//! stream. The documentation parser only ever reads this tree through the
//! small capability surface below: node-kind tests, ordered children, and
//! [`render`] to normalized text.
//!
//! ## Modules
//!
//! - **`builder`**: `TreeBuilder` turns offset events into [`Block`]s
//! - **`render`**: renders any block or inline subtree back to markup text
//! - **`span`**: byte spans plus the line index used for source ranges

pub mod builder;
pub mod render;
pub mod span;

pub use builder::{ParseOptions, TreeBuilder};
pub use render::{render_block, render_inline, render_inlines};
pub use span::{LineIndex, SourceLocation, SourceRange, Span};

/// A run of plain text, with the source bytes it came from when known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Text {
    pub value: String,
    pub span: Option<Span>,
}

impl Text {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            span: None,
        }
    }

    /// True when the text value is a byte-for-byte copy of its source span,
    /// so offsets inside `value` map directly onto the source.
    pub fn is_verbatim(&self) -> bool {
        self.span.is_some_and(|span| span.len() == self.value.len())
    }
}

/// Text-level content inside a block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(Text),
    /// Inline code span (`` `code` ``).
    Code(String),
    /// Double-backtick symbol reference (``` ``Symbol`` ```).
    SymbolLink(String),
    Emphasis(Vec<Inline>),
    Strong(Vec<Inline>),
    Strikethrough(Vec<Inline>),
    Link {
        destination: String,
        title: String,
        children: Vec<Inline>,
    },
    Image {
        destination: String,
        title: String,
        children: Vec<Inline>,
    },
    Html(String),
    SoftBreak,
    HardBreak,
}

impl Inline {
    pub fn text(value: impl Into<String>) -> Self {
        Inline::Text(Text::new(value))
    }
}

/// A list container. `start` is set for ordered lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub start: Option<u64>,
    pub items: Vec<ListItem>,
}

impl List {
    pub fn unordered(items: Vec<ListItem>) -> Self {
        Self { start: None, items }
    }

    pub fn is_ordered(&self) -> bool {
        self.start.is_some()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub children: Vec<Block>,
    pub span: Option<Span>,
}

impl ListItem {
    pub fn new(children: Vec<Block>) -> Self {
        Self {
            children,
            span: None,
        }
    }

    /// The item's leading paragraph, if its first child is one.
    pub fn first_paragraph(&self) -> Option<&[Inline]> {
        match self.children.first() {
            Some(Block::Paragraph(inlines)) => Some(inlines),
            _ => None,
        }
    }
}

/// Column alignment from a table's delimiter row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableAlignment {
    None,
    Left,
    Center,
    Right,
}

/// A GFM pipe table. Each cell is its inline content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub alignments: Vec<TableAlignment>,
    pub header: Vec<Vec<Inline>>,
    pub rows: Vec<Vec<Vec<Inline>>>,
}

/// A block directive such as `@Comment(draft)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Directive {
    pub name: String,
    pub arguments: Option<String>,
    pub children: Vec<Block>,
}

/// A structural document element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Paragraph(Vec<Inline>),
    Heading {
        level: u8,
        inlines: Vec<Inline>,
    },
    List(List),
    BlockQuote(Vec<Block>),
    CodeBlock {
        language: Option<String>,
        code: String,
    },
    Html(String),
    ThematicBreak,
    Table(Table),
    Directive(Directive),
    /// A `\param name …` command.
    DoxygenParameter {
        name: String,
        children: Vec<Block>,
    },
    /// A `\returns …` command.
    DoxygenReturns {
        children: Vec<Block>,
    },
}

impl Block {
    pub fn is_paragraph(&self) -> bool {
        matches!(self, Block::Paragraph(_))
    }

    pub fn is_unordered_list(&self) -> bool {
        matches!(self, Block::List(list) if !list.is_ordered())
    }

    pub fn is_html(&self) -> bool {
        matches!(self, Block::Html(_))
    }

    /// Block-level children in document order. List items are reached through
    /// [`Block::List`] directly since they are not blocks themselves.
    pub fn children(&self) -> &[Block] {
        match self {
            Block::BlockQuote(children)
            | Block::DoxygenParameter { children, .. }
            | Block::DoxygenReturns { children } => children,
            Block::Directive(directive) => &directive.children,
            _ => &[],
        }
    }
}

/// A parsed markup document: top-level blocks plus the index used to turn
/// spans into line/column ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    pub blocks: Vec<Block>,
    pub line_index: LineIndex,
}

impl Document {
    /// Parses markup text with pulldown-cmark into an owned tree.
    pub fn parse(text: &str, options: &ParseOptions) -> Self {
        TreeBuilder::new(text, options).build()
    }

    /// Wraps an already-built tree. Source ranges are unavailable.
    pub fn from_blocks(blocks: Vec<Block>) -> Self {
        Self {
            blocks,
            line_index: LineIndex::unavailable(),
        }
    }

    pub fn children(&self) -> &[Block] {
        &self.blocks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn node_kind_tests() {
        let list = Block::List(List::unordered(vec![]));
        assert!(list.is_unordered_list());
        assert!(!list.is_paragraph());

        let ordered = Block::List(List {
            start: Some(1),
            items: vec![],
        });
        assert!(!ordered.is_unordered_list());

        assert!(Block::Html("<!-- x -->".into()).is_html());
    }

    #[test]
    fn first_paragraph_requires_leading_paragraph() {
        let item = ListItem::new(vec![Block::ThematicBreak]);
        assert!(item.first_paragraph().is_none());

        let item = ListItem::new(vec![Block::Paragraph(vec![Inline::text("a")])]);
        assert_eq!(item.first_paragraph(), Some(&[Inline::text("a")][..]));
    }

    #[test]
    fn verbatim_text_requires_matching_span() {
        let mut text = Text::new("abc");
        assert!(!text.is_verbatim());
        text.span = Some(Span::new(4, 7));
        assert!(text.is_verbatim());
        text.span = Some(Span::new(4, 9));
        assert!(!text.is_verbatim());
    }
}
