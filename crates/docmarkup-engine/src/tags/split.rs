use crate::tree::{Block, Inline, LineIndex, SourceRange, Span, Text};

/// A list item line split at its first colon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplitLine {
    pub name: String,
    /// Where `name` sits in the source, when the text maps onto it exactly.
    pub name_range: Option<SourceRange>,
    /// Everything after the colon rewrapped into one paragraph; `None` when
    /// nothing follows the colon on the line.
    pub content: Option<Block>,
}

/// Splits a tag line like `Parameter foo: The foo.` into name and content.
///
/// Only the first inline is searched, and it must be plain text containing a
/// colon with a non-empty name before it; otherwise the line is not a tag.
pub fn split_name_and_content(inlines: &[Inline], line_index: &LineIndex) -> Option<SplitLine> {
    let Some((Inline::Text(first), siblings)) = inlines.split_first() else {
        return None;
    };

    let colon = first.value.find(':')?;
    let leading = first.value.len() - first.value.trim_start().len();
    let name = first.value.get(leading..colon)?.trim_end();
    if name.is_empty() {
        return None;
    }

    let verbatim_span = first.span.filter(|_| first.is_verbatim());
    let name_range = verbatim_span.and_then(|span| {
        let start = span.start + leading;
        line_index.range(Span::new(start, start + name.len()))
    });

    let after_colon = &first.value[colon + 1..];
    let remainder = after_colon.trim_start();
    let mut content = Vec::new();
    if !remainder.is_empty() {
        let offset = colon + 1 + (after_colon.len() - remainder.len());
        content.push(Inline::Text(Text {
            value: remainder.to_string(),
            span: verbatim_span.map(|span| Span::new(span.start + offset, span.end)),
        }));
    }
    content.extend(
        siblings
            .iter()
            .skip_while(|inline| {
                remainder.is_empty() && matches!(inline, Inline::SoftBreak | Inline::HardBreak)
            })
            .cloned(),
    );

    Some(SplitLine {
        name: name.to_string(),
        name_range,
        content: (!content.is_empty()).then_some(Block::Paragraph(content)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::SourceLocation;
    use pretty_assertions::assert_eq;

    fn split(inlines: &[Inline]) -> Option<SplitLine> {
        split_name_and_content(inlines, &LineIndex::unavailable())
    }

    #[test]
    fn splits_at_first_colon() {
        let line = split(&[Inline::text("Parameter x: d: more")]).unwrap();
        assert_eq!(line.name, "Parameter x");
        assert_eq!(
            line.content,
            Some(Block::Paragraph(vec![Inline::text("d: more")]))
        );
    }

    #[test]
    fn keeps_trailing_siblings_in_the_paragraph() {
        let line = split(&[
            Inline::text("Returns: a "),
            Inline::Code("Value".into()),
            Inline::SoftBreak,
            Inline::text("more"),
        ])
        .unwrap();
        assert_eq!(
            line.content,
            Some(Block::Paragraph(vec![
                Inline::text("a "),
                Inline::Code("Value".into()),
                Inline::SoftBreak,
                Inline::text("more"),
            ]))
        );
    }

    #[test]
    fn empty_remainder_has_no_content() {
        let line = split(&[Inline::text("Parameters:")]).unwrap();
        assert_eq!(line.name, "Parameters");
        assert_eq!(line.content, None);
    }

    #[test]
    fn line_break_after_colon_is_not_content() {
        for line_break in [Inline::SoftBreak, Inline::HardBreak] {
            let line = split(&[Inline::text("Returns:"), line_break, Inline::text("value")]).unwrap();
            assert_eq!(
                line.content,
                Some(Block::Paragraph(vec![Inline::text("value")]))
            );
        }
    }

    #[test]
    fn rejects_lines_that_are_not_tags() {
        assert_eq!(split(&[Inline::text("no colon here")]), None);
        assert_eq!(split(&[Inline::text("  : nameless")]), None);
        assert_eq!(split(&[Inline::Code("x".into()), Inline::text(": y")]), None);
        assert_eq!(split(&[]), None);
    }

    #[test]
    fn name_range_points_into_the_source() {
        let source = "- Parameter x: d";
        let line_index = LineIndex::new(source);
        let text = Text {
            value: "Parameter x: d".into(),
            span: Some(Span::new(2, 16)),
        };
        let line = split_name_and_content(&[Inline::Text(text)], &line_index).unwrap();
        assert_eq!(
            line.name_range,
            Some(SourceRange {
                start: SourceLocation { line: 1, column: 3 },
                end: SourceLocation {
                    line: 1,
                    column: 14
                },
            })
        );
    }
}
