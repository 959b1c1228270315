//! Builds the owned markup tree from pulldown-cmark's offset event stream.
//!
//! # Event flow
//!
//! pulldown-cmark emits a flat, balanced stream of `Start`/`End` events with
//! leaf events (`Text`, `Code`, breaks) in between. The builder keeps a stack
//! of open frames; every `End` pops the top frame and attaches the finished
//! node to whatever frame is now on top (or to the document root).
//!
//! Tight list items are the one irregular shape: their text arrives directly
//! inside `Start(Item)` with no surrounding paragraph. The builder opens an
//! *implicit* paragraph frame for that text and closes it as soon as a block
//! starts or the item ends, so every list item's inline content ends up in a
//! leading [`Block::Paragraph`] exactly as loose items do.

use std::ops::Range;
use std::sync::LazyLock;

use pulldown_cmark::{Alignment, CodeBlockKind, Event, Options, Parser, Tag};
use regex::Regex;

use super::{
    Block, Directive, Document, Inline, LineIndex, List, ListItem, Span, Table, TableAlignment,
    Text,
};

static RE_DIRECTIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^@([A-Za-z][A-Za-z0-9_-]*)(?:\((.*)\))?$").expect("valid directive pattern")
});

static RE_DOXYGEN_PARAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\\param[ \t]+(\S+)[ \t]*").expect("valid param pattern"));

static RE_DOXYGEN_RETURNS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\\(?:returns|return|result)(?:[ \t]+|$)").expect("valid returns pattern")
});

/// Markup features recognized on top of CommonMark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Curly quotes and dashes, as rendered documentation shows them.
    pub smart_punctuation: bool,
    /// Treat ``` ``Symbol`` ``` code spans as symbol references.
    pub symbol_links: bool,
    /// Recognize `\param` and `\returns` commands as their own nodes.
    pub doxygen_commands: bool,
    /// Recognize single-line `@Name(arguments)` paragraphs as directives.
    /// Off by default, so `@MainActor` alone on a line stays a paragraph.
    pub block_directives: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            smart_punctuation: true,
            symbol_links: true,
            doxygen_commands: true,
            block_directives: false,
        }
    }
}

impl ParseOptions {
    fn cmark_options(&self) -> Options {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);
        if self.smart_punctuation {
            options.insert(Options::ENABLE_SMART_PUNCTUATION);
        }
        options
    }
}

enum InlineContainer {
    Emphasis,
    Strong,
    Strikethrough,
    Link { destination: String, title: String },
    Image { destination: String, title: String },
}

impl InlineContainer {
    fn finish(self, children: Vec<Inline>) -> Inline {
        match self {
            InlineContainer::Emphasis => Inline::Emphasis(children),
            InlineContainer::Strong => Inline::Strong(children),
            InlineContainer::Strikethrough => Inline::Strikethrough(children),
            InlineContainer::Link { destination, title } => Inline::Link {
                destination,
                title,
                children,
            },
            InlineContainer::Image { destination, title } => Inline::Image {
                destination,
                title,
                children,
            },
        }
    }
}

enum Frame {
    Paragraph { inlines: Vec<Inline>, implicit: bool },
    Heading { level: u8, inlines: Vec<Inline> },
    BlockQuote(Vec<Block>),
    List { start: Option<u64>, items: Vec<ListItem> },
    Item { children: Vec<Block>, span: Span },
    CodeBlock { language: Option<String>, code: String },
    HtmlBlock(String),
    Table(Table),
    /// The header (`head`) or a body row of the enclosing table.
    TableRow { head: bool, cells: Vec<Vec<Inline>> },
    TableCell(Vec<Inline>),
    Inline { container: InlineContainer, children: Vec<Inline> },
    /// Constructs outside the documentation subset (footnotes, metadata).
    Skipped,
}

impl Frame {
    fn inlines_mut(&mut self) -> Option<&mut Vec<Inline>> {
        match self {
            Frame::Paragraph { inlines, .. } | Frame::Heading { inlines, .. } => Some(inlines),
            Frame::Inline { children, .. } | Frame::TableCell(children) => Some(children),
            _ => None,
        }
    }

    fn hosts_inlines(&self) -> bool {
        matches!(
            self,
            Frame::Paragraph { .. }
                | Frame::Heading { .. }
                | Frame::Inline { .. }
                | Frame::TableCell(_)
                | Frame::Skipped
        )
    }
}

/// Stack-based converter from pulldown-cmark events to a [`Document`].
pub struct TreeBuilder<'a> {
    text: &'a str,
    options: ParseOptions,
    stack: Vec<Frame>,
    blocks: Vec<Block>,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(text: &'a str, options: &ParseOptions) -> Self {
        Self {
            text,
            options: options.clone(),
            stack: Vec::new(),
            blocks: Vec::new(),
        }
    }

    pub fn build(mut self) -> Document {
        let text = self.text;
        let parser = Parser::new_ext(text, self.options.cmark_options());
        for (event, range) in parser.into_offset_iter() {
            self.process_event(event, range);
        }

        // The stream is balanced, so this only drains an open implicit paragraph.
        while let Some(frame) = self.stack.pop() {
            self.finish_frame(frame);
        }

        Document {
            blocks: self.blocks,
            line_index: LineIndex::new(text),
        }
    }

    fn process_event(&mut self, event: Event<'_>, range: Range<usize>) {
        match event {
            Event::Start(tag) => self.start_tag(tag, range),
            Event::End(_) => {
                self.close_implicit_paragraph();
                if let Some(frame) = self.stack.pop() {
                    self.finish_frame(frame);
                }
            }
            Event::Text(text) => {
                if let Some(Frame::CodeBlock { code, .. }) = self.stack.last_mut() {
                    code.push_str(&text);
                } else {
                    self.push_inline(Inline::Text(Text {
                        value: text.into_string(),
                        span: Some(Span::new(range.start, range.end)),
                    }));
                }
            }
            Event::Code(code) => {
                let inline = if self.options.symbol_links && self.is_symbol_link(&range) {
                    Inline::SymbolLink(code.into_string())
                } else {
                    Inline::Code(code.into_string())
                };
                self.push_inline(inline);
            }
            Event::Html(html) => {
                if let Some(Frame::HtmlBlock(buffer)) = self.stack.last_mut() {
                    buffer.push_str(&html);
                } else {
                    self.push_inline(Inline::Html(html.into_string()));
                }
            }
            Event::InlineHtml(html) => self.push_inline(Inline::Html(html.into_string())),
            Event::SoftBreak => self.push_inline(Inline::SoftBreak),
            Event::HardBreak => self.push_inline(Inline::HardBreak),
            Event::Rule => {
                self.close_implicit_paragraph();
                self.attach_block(Block::ThematicBreak);
            }
            _ => {}
        }
    }

    fn start_tag(&mut self, tag: Tag<'_>, range: Range<usize>) {
        let frame = match tag {
            Tag::Paragraph => Frame::Paragraph {
                inlines: Vec::new(),
                implicit: false,
            },
            Tag::Heading { level, .. } => Frame::Heading {
                level: level as u8,
                inlines: Vec::new(),
            },
            Tag::BlockQuote(_) => Frame::BlockQuote(Vec::new()),
            Tag::CodeBlock(kind) => Frame::CodeBlock {
                language: match kind {
                    CodeBlockKind::Fenced(info) if !info.is_empty() => Some(info.into_string()),
                    _ => None,
                },
                code: String::new(),
            },
            Tag::HtmlBlock => Frame::HtmlBlock(String::new()),
            Tag::List(start) => Frame::List {
                start,
                items: Vec::new(),
            },
            Tag::Item => Frame::Item {
                children: Vec::new(),
                span: Span::new(range.start, range.end),
            },
            Tag::Table(alignments) => Frame::Table(Table {
                alignments: alignments.into_iter().map(table_alignment).collect(),
                header: Vec::new(),
                rows: Vec::new(),
            }),
            Tag::TableHead => Frame::TableRow {
                head: true,
                cells: Vec::new(),
            },
            Tag::TableRow => Frame::TableRow {
                head: false,
                cells: Vec::new(),
            },
            Tag::TableCell => Frame::TableCell(Vec::new()),
            Tag::Emphasis => return self.open_inline(InlineContainer::Emphasis),
            Tag::Strong => return self.open_inline(InlineContainer::Strong),
            Tag::Strikethrough => return self.open_inline(InlineContainer::Strikethrough),
            Tag::Link {
                dest_url, title, ..
            } => {
                return self.open_inline(InlineContainer::Link {
                    destination: dest_url.into_string(),
                    title: title.into_string(),
                });
            }
            Tag::Image {
                dest_url, title, ..
            } => {
                return self.open_inline(InlineContainer::Image {
                    destination: dest_url.into_string(),
                    title: title.into_string(),
                });
            }
            _ => Frame::Skipped,
        };
        self.close_implicit_paragraph();
        self.stack.push(frame);
    }

    fn open_inline(&mut self, container: InlineContainer) {
        self.ensure_inline_host();
        self.stack.push(Frame::Inline {
            container,
            children: Vec::new(),
        });
    }

    fn ensure_inline_host(&mut self) {
        if !self.stack.last().is_some_and(Frame::hosts_inlines) {
            self.stack.push(Frame::Paragraph {
                inlines: Vec::new(),
                implicit: true,
            });
        }
    }

    fn push_inline(&mut self, inline: Inline) {
        self.ensure_inline_host();
        if let Some(target) = self.stack.last_mut().and_then(Frame::inlines_mut) {
            append_inline(target, inline);
        }
    }

    fn close_implicit_paragraph(&mut self) {
        if matches!(
            self.stack.last(),
            Some(Frame::Paragraph { implicit: true, .. })
        ) && let Some(frame) = self.stack.pop()
        {
            self.finish_frame(frame);
        }
    }

    fn finish_frame(&mut self, frame: Frame) {
        match frame {
            Frame::Paragraph { inlines, .. } => {
                let block = self.paragraph_block(inlines);
                self.attach_block(block);
            }
            Frame::Heading { level, inlines } => self.attach_block(Block::Heading { level, inlines }),
            Frame::BlockQuote(children) => self.attach_block(Block::BlockQuote(children)),
            Frame::List { start, items } => self.attach_block(Block::List(List { start, items })),
            Frame::Item { children, span } => {
                if let Some(Frame::List { items, .. }) = self.stack.last_mut() {
                    items.push(ListItem {
                        children,
                        span: Some(span),
                    });
                }
            }
            Frame::CodeBlock { language, code } => {
                self.attach_block(Block::CodeBlock { language, code })
            }
            Frame::HtmlBlock(html) => self.attach_block(Block::Html(html)),
            Frame::Table(table) => self.attach_block(Block::Table(table)),
            Frame::TableRow { head, cells } => {
                if let Some(Frame::Table(table)) = self.stack.last_mut() {
                    if head {
                        table.header = cells;
                    } else {
                        table.rows.push(cells);
                    }
                }
            }
            Frame::TableCell(inlines) => {
                if let Some(Frame::TableRow { cells, .. }) = self.stack.last_mut() {
                    cells.push(inlines);
                }
            }
            Frame::Inline {
                container,
                children,
            } => {
                let inline = container.finish(children);
                if let Some(target) = self.stack.last_mut().and_then(Frame::inlines_mut) {
                    append_inline(target, inline);
                }
            }
            Frame::Skipped => {}
        }
    }

    fn attach_block(&mut self, block: Block) {
        match self.stack.last_mut() {
            Some(Frame::BlockQuote(children)) | Some(Frame::Item { children, .. }) => {
                children.push(block)
            }
            Some(_) => log::trace!("dropping block inside an unsupported container"),
            None => self.blocks.push(block),
        }
    }

    fn paragraph_block(&self, inlines: Vec<Inline>) -> Block {
        if self.options.doxygen_commands
            && let Some(command) = doxygen_command(&inlines)
        {
            return command;
        }
        if self.options.block_directives
            && let Some(directive) = directive(&inlines)
        {
            return Block::Directive(directive);
        }
        Block::Paragraph(inlines)
    }

    fn is_symbol_link(&self, range: &Range<usize>) -> bool {
        self.text.get(range.clone()).is_some_and(|source| {
            source.len() >= 4
                && source.starts_with("``")
                && source.ends_with("``")
                && !source.starts_with("```")
        })
    }
}

fn table_alignment(alignment: Alignment) -> TableAlignment {
    match alignment {
        Alignment::None => TableAlignment::None,
        Alignment::Left => TableAlignment::Left,
        Alignment::Center => TableAlignment::Center,
        Alignment::Right => TableAlignment::Right,
    }
}

/// Appends an inline, merging adjacent text runs into one.
fn append_inline(inlines: &mut Vec<Inline>, inline: Inline) {
    if let Inline::Text(next) = &inline
        && let Some(Inline::Text(previous)) = inlines.last_mut()
    {
        previous.value.push_str(&next.value);
        previous.span = previous
            .span
            .zip(next.span)
            .and_then(|(first, second)| first.join_adjacent(second));
        return;
    }
    inlines.push(inline);
}

fn doxygen_command(inlines: &[Inline]) -> Option<Block> {
    let Some((Inline::Text(first), rest)) = inlines.split_first() else {
        return None;
    };

    if let Some(captures) = RE_DOXYGEN_PARAM.captures(&first.value) {
        let remainder = &first.value[captures.get(0)?.end()..];
        return Some(Block::DoxygenParameter {
            name: captures[1].to_string(),
            children: command_body(remainder, rest),
        });
    }

    let found = RE_DOXYGEN_RETURNS.find(&first.value)?;
    Some(Block::DoxygenReturns {
        children: command_body(&first.value[found.end()..], rest),
    })
}

fn command_body(remainder: &str, rest: &[Inline]) -> Vec<Block> {
    let mut inlines = Vec::new();
    if !remainder.is_empty() {
        inlines.push(Inline::text(remainder));
    }
    inlines.extend(
        rest.iter()
            .skip_while(|inline| {
                remainder.is_empty() && matches!(inline, Inline::SoftBreak | Inline::HardBreak)
            })
            .cloned(),
    );

    if inlines.is_empty() {
        Vec::new()
    } else {
        vec![Block::Paragraph(inlines)]
    }
}

fn directive(inlines: &[Inline]) -> Option<Directive> {
    let [Inline::Text(text)] = inlines else {
        return None;
    };
    let captures = RE_DIRECTIVE.captures(text.value.trim())?;
    Some(Directive {
        name: captures[1].to_string(),
        arguments: captures.get(2).map(|m| m.as_str().to_string()),
        children: Vec::new(),
    })
}
