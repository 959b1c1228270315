use crate::tree::{Block, LineIndex, ListItem, SourceRange, render_block};

use super::{KnownTagKind, split_name_and_content};

/// One tag-shaped list item, classified but not yet turned into a record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedTag {
    pub raw_name: String,
    pub kind: Option<KnownTagKind>,
    pub name_range: Option<SourceRange>,
    pub contents: Vec<Block>,
}

impl ExtractedTag {
    /// One rendered string per content block.
    pub fn rendered_contents(&self) -> Vec<String> {
        self.contents.iter().map(render_block).collect()
    }
}

/// Reads a list item as `Name: content`.
///
/// The item must open with a paragraph whose line splits at a colon. Content
/// is the text after the colon followed by the item's remaining blocks.
pub fn extract_tag(item: &ListItem, line_index: &LineIndex) -> Option<ExtractedTag> {
    let inlines = item.first_paragraph()?;
    let line = split_name_and_content(inlines, line_index)?;

    let mut contents: Vec<Block> = line.content.into_iter().collect();
    contents.extend(item.children.iter().skip(1).cloned());

    Some(ExtractedTag {
        kind: KnownTagKind::classify(&line.name),
        raw_name: line.name,
        name_range: line.name_range,
        contents,
    })
}

/// Reads every entry of the unordered lists nested in an outline item such as
/// `Parameters:`. Each entry's own name (e.g. a parameter name) is kept as
/// `raw_name`; entries that don't split are skipped.
pub fn extract_outline(item: &ListItem, line_index: &LineIndex) -> Vec<ExtractedTag> {
    item.children
        .iter()
        .filter_map(|child| match child {
            Block::List(list) if !list.is_ordered() => Some(list),
            _ => None,
        })
        .flat_map(|list| list.items.iter())
        .filter_map(|entry| extract_tag(entry, line_index))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::{Document, Inline, List, ParseOptions};
    use pretty_assertions::assert_eq;

    fn first_item(text: &str) -> (ListItem, LineIndex) {
        let document = Document::parse(text, &ParseOptions::default());
        match document.blocks.into_iter().next() {
            Some(Block::List(list)) => (
                list.items.into_iter().next().expect("list has an item"),
                document.line_index,
            ),
            other => panic!("expected a list, got {other:?}"),
        }
    }

    #[test]
    fn extracts_a_singular_tag() {
        let (item, line_index) = first_item("- Parameter x: d");
        let tag = extract_tag(&item, &line_index).unwrap();
        assert_eq!(tag.raw_name, "Parameter x");
        assert_eq!(tag.kind, Some(KnownTagKind::Parameter("x".into())));
        assert_eq!(tag.rendered_contents(), vec!["d"]);
        assert!(tag.name_range.is_some());
    }

    #[test]
    fn appends_following_blocks_to_the_content() {
        let (item, line_index) = first_item("- Returns: first\n\n  second paragraph\n");
        let tag = extract_tag(&item, &line_index).unwrap();
        assert_eq!(tag.rendered_contents(), vec!["first", "second paragraph"]);
    }

    #[test]
    fn item_without_leading_paragraph_is_not_a_tag() {
        let item = ListItem::new(vec![Block::ThematicBreak]);
        assert_eq!(extract_tag(&item, &LineIndex::unavailable()), None);
    }

    #[test]
    fn unrecognized_name_extracts_without_kind() {
        let (item, line_index) = first_item("- Frobnicate: x");
        let tag = extract_tag(&item, &line_index).unwrap();
        assert_eq!(tag.kind, None);
        assert_eq!(tag.raw_name, "Frobnicate");
    }

    #[test]
    fn outline_entries_are_extracted_in_order() {
        let (item, line_index) = first_item("- Parameters:\n    - foo: A\n    - not a tag\n    - bar: B\n");
        let entries = extract_outline(&item, &line_index);
        let names: Vec<_> = entries.iter().map(|e| e.raw_name.as_str()).collect();
        assert_eq!(names, vec!["foo", "bar"]);
        assert_eq!(entries[1].rendered_contents(), vec!["B"]);
    }

    #[test]
    fn outline_ignores_ordered_lists() {
        let nested = ListItem::new(vec![Block::Paragraph(vec![Inline::text("foo: A")])]);
        let item = ListItem::new(vec![
            Block::Paragraph(vec![Inline::text("Parameters:")]),
            Block::List(List {
                start: Some(1),
                items: vec![nested],
            }),
        ]);
        assert!(extract_outline(&item, &LineIndex::unavailable()).is_empty());
    }
}
