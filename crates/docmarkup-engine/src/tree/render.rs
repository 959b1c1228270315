//! Renders tree nodes back to normalized markup text.
//!
//! Output is canonical rather than lossless: list markers become `- ` (or
//! `N. `), nested content is indented by the marker width, soft breaks are
//! kept as newlines, and inline formatting uses one fixed spelling.

use super::{Block, Directive, Inline, List, Table, TableAlignment};

pub fn render_inlines(inlines: &[Inline]) -> String {
    inlines.iter().map(render_inline).collect()
}

pub fn render_inline(inline: &Inline) -> String {
    match inline {
        Inline::Text(text) => text.value.clone(),
        Inline::Code(code) if code.contains('`') => format!("`` {code} ``"),
        Inline::Code(code) => format!("`{code}`"),
        Inline::SymbolLink(symbol) => format!("``{symbol}``"),
        Inline::Emphasis(children) => format!("*{}*", render_inlines(children)),
        Inline::Strong(children) => format!("**{}**", render_inlines(children)),
        Inline::Strikethrough(children) => format!("~~{}~~", render_inlines(children)),
        Inline::Link {
            destination,
            title,
            children,
        } => format!(
            "[{}]({}{})",
            render_inlines(children),
            destination,
            render_title(title)
        ),
        Inline::Image {
            destination,
            title,
            children,
        } => format!(
            "![{}]({}{})",
            render_inlines(children),
            destination,
            render_title(title)
        ),
        Inline::Html(html) => html.clone(),
        Inline::SoftBreak => "\n".to_string(),
        Inline::HardBreak => "  \n".to_string(),
    }
}

fn render_title(title: &str) -> String {
    if title.is_empty() {
        String::new()
    } else {
        format!(" \"{title}\"")
    }
}

pub fn render_block(block: &Block) -> String {
    match block {
        Block::Paragraph(inlines) => render_inlines(inlines),
        Block::Heading { level, inlines } => {
            format!(
                "{} {}",
                "#".repeat(usize::from(*level)),
                render_inlines(inlines)
            )
        }
        Block::List(list) => render_list(list),
        Block::BlockQuote(children) => render_blocks(children, "\n\n")
            .lines()
            .map(|line| {
                if line.is_empty() {
                    ">".to_string()
                } else {
                    format!("> {line}")
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Block::CodeBlock { language, code } => {
            let newline = if code.ends_with('\n') || code.is_empty() {
                ""
            } else {
                "\n"
            };
            format!(
                "```{}\n{code}{newline}```",
                language.as_deref().unwrap_or_default()
            )
        }
        Block::Html(html) => html.trim_end_matches('\n').to_string(),
        Block::ThematicBreak => "-----".to_string(),
        Block::Table(table) => render_table(table),
        Block::Directive(directive) => render_directive(directive),
        Block::DoxygenParameter { name, children } => {
            render_command(&format!("\\param {name}"), children)
        }
        Block::DoxygenReturns { children } => render_command("\\returns", children),
    }
}

fn render_blocks(blocks: &[Block], separator: &str) -> String {
    blocks
        .iter()
        .map(render_block)
        .collect::<Vec<_>>()
        .join(separator)
}

fn render_list(list: &List) -> String {
    list.items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let marker = match list.start {
                Some(start) => format!("{}. ", start + index as u64),
                None => "- ".to_string(),
            };
            hang(&marker, &render_blocks(&item.children, "\n"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Prefixes the first line with `marker` and indents the rest to match.
fn hang(marker: &str, body: &str) -> String {
    if body.is_empty() {
        return marker.trim_end().to_string();
    }
    let indent = " ".repeat(marker.len());
    body.lines()
        .enumerate()
        .map(|(index, line)| match (index, line.is_empty()) {
            (0, _) => format!("{marker}{line}"),
            (_, true) => String::new(),
            _ => format!("{indent}{line}"),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pipe table with a delimiter row.
fn render_table(table: &Table) -> String {
    let delimiter: Vec<&str> = table
        .alignments
        .iter()
        .map(|alignment| match alignment {
            TableAlignment::None => "---",
            TableAlignment::Left => ":--",
            TableAlignment::Center => ":-:",
            TableAlignment::Right => "--:",
        })
        .collect();

    let mut lines = vec![
        render_table_row(&table.header),
        format!("| {} |", delimiter.join(" | ")),
    ];
    lines.extend(table.rows.iter().map(|cells| render_table_row(cells)));
    lines.join("\n")
}

/// `|` inside a cell is escaped so the row keeps its shape.
fn render_table_row(cells: &[Vec<Inline>]) -> String {
    let cells: Vec<String> = cells
        .iter()
        .map(|cell| render_inlines(cell).replace('|', "\\|"))
        .collect();
    format!("| {} |", cells.join(" | "))
}

fn render_directive(directive: &Directive) -> String {
    let mut out = format!("@{}", directive.name);
    if let Some(arguments) = &directive.arguments {
        out.push_str(&format!("({arguments})"));
    }
    if !directive.children.is_empty() {
        out.push_str(" {\n");
        out.push_str(&hang("    ", &render_blocks(&directive.children, "\n\n")));
        out.push_str("\n}");
    }
    out
}

fn render_command(command: &str, children: &[Block]) -> String {
    let body = render_blocks(children, "\n\n");
    if body.is_empty() {
        command.to_string()
    } else {
        format!("{command} {body}")
    }
}
