use serde::Serialize;

use crate::comment::normalize_doc_comment;
use crate::model::{AbstractSection, DiscussionSection, TaggedComponents};
use crate::rewriter::TagRewriter;
use crate::splitter::{ParseSection, split_sections};
use crate::tree::{Document, ParseOptions, render_block};

/// The structured documentation recovered from one comment.
///
/// Serializes with empty parts omitted, so a comment with only a summary
/// becomes `{"abstract": [...]}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DocumentationMarkup {
    #[serde(rename = "abstract", skip_serializing_if = "Option::is_none")]
    abstract_section: Option<AbstractSection>,
    #[serde(rename = "discussion", skip_serializing_if = "Option::is_none")]
    discussion_section: Option<DiscussionSection>,
    #[serde(flatten)]
    tags: Option<TaggedComponents>,
}

impl DocumentationMarkup {
    /// Splits `document` into sections, scanning no further than `up_to`.
    pub fn new(document: &Document, up_to: ParseSection) -> Self {
        let blocks = document.children();
        let split = split_sections(blocks, up_to);

        let Some(range) = split.discussion else {
            return Self {
                abstract_section: split.abstract_section,
                ..Self::default()
            };
        };

        let outcome = TagRewriter::new(&document.line_index).rewrite(&blocks[range]);
        let discussion: Vec<String> = outcome.blocks.iter().map(render_block).collect();

        Self {
            abstract_section: split.abstract_section,
            discussion_section: (!discussion.is_empty())
                .then(|| DiscussionSection::new(discussion)),
            tags: (!outcome.components.is_empty()).then_some(outcome.components),
        }
    }

    /// Parses markup text in full.
    pub fn parse(text: &str, options: &ParseOptions) -> Self {
        Self::new(&Document::parse(text, options), ParseSection::End)
    }

    /// Parses a raw `///` or `/** */` comment.
    pub fn from_comment(comment: &str, options: &ParseOptions) -> Self {
        Self::from_comment_up_to(comment, options, ParseSection::End)
    }

    pub fn from_comment_up_to(
        comment: &str,
        options: &ParseOptions,
        up_to: ParseSection,
    ) -> Self {
        let document = Document::parse(&normalize_doc_comment(comment), options);
        Self::new(&document, up_to)
    }

    pub fn abstract_section(&self) -> Option<&AbstractSection> {
        self.abstract_section.as_ref()
    }

    pub fn discussion_section(&self) -> Option<&DiscussionSection> {
        self.discussion_section.as_ref()
    }

    pub fn tags(&self) -> Option<&TaggedComponents> {
        self.tags.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.abstract_section.is_none()
            && self.discussion_section.is_none()
            && self.tags.is_none()
    }
}
