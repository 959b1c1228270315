use serde::{Deserialize, Serialize};

use crate::tree::{Inline, render_inline};

/// The one-paragraph summary at the top of a comment.
///
/// Holds one rendered string per child of the paragraph, not one joined
/// string. Empty content is still an abstract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbstractSection {
    pub content: Vec<String>,
}

impl AbstractSection {
    pub fn new(content: Vec<String>) -> Self {
        Self { content }
    }

    pub fn from_paragraph(inlines: &[Inline]) -> Self {
        Self {
            content: inlines.iter().map(render_inline).collect(),
        }
    }
}

/// Everything after the abstract that wasn't consumed as a tag, one rendered
/// string per top-level block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DiscussionSection {
    pub content: Vec<String>,
}

impl DiscussionSection {
    pub fn new(content: Vec<String>) -> Self {
        Self { content }
    }

    /// The whole discussion as one markup string, blocks separated by a blank line.
    pub fn format(&self) -> String {
        self.content.join("\n\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abstract_keeps_one_string_per_child() {
        let section = AbstractSection::from_paragraph(&[
            Inline::text("Adds "),
            Inline::Code("x".into()),
            Inline::text(" to the total."),
        ]);
        assert_eq!(section.content, vec!["Adds ", "`x`", " to the total."]);
    }

    #[test]
    fn discussion_formats_with_blank_lines() {
        let section = DiscussionSection::new(vec!["One.".into(), "- Two".into()]);
        assert_eq!(section.format(), "One.\n\n- Two");
    }

    #[test]
    fn sections_serialize_as_string_arrays() {
        let section = AbstractSection::new(vec!["Summary.".into()]);
        assert_eq!(
            serde_json::to_value(&section).unwrap(),
            serde_json::json!(["Summary."])
        );
    }
}
