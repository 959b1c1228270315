//! Partitions a document's top-level blocks into abstract and discussion.

use std::ops::RangeInclusive;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::model::AbstractSection;
use crate::tree::Block;

/// The sections of a comment, in the order they appear.
///
/// Used both as the scanner's state and as the caller's bound: parsing stops
/// once the scanner moves past the requested section.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ParseSection {
    Abstract,
    Discussion,
    #[default]
    End,
}

/// Result of one pass over the top-level blocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SectionSplit {
    pub abstract_section: Option<AbstractSection>,
    /// Inclusive indices of the blocks that make up the discussion.
    pub discussion: Option<RangeInclusive<usize>>,
}

/// Scans `blocks` once, left to right.
///
/// The first paragraph (skipping raw HTML such as comments) is the abstract.
/// The first block after it that is neither the abstract nor HTML opens the
/// discussion, which then runs to the end of the document.
pub fn split_sections(blocks: &[Block], up_to: ParseSection) -> SectionSplit {
    let mut current = ParseSection::Abstract;
    let mut split = SectionSplit::default();
    let mut discussion_start = None;
    let last = blocks.len().checked_sub(1);

    for (index, block) in blocks.iter().enumerate() {
        if current == ParseSection::End || current > up_to {
            continue;
        }

        if current == ParseSection::Abstract {
            match block {
                Block::Paragraph(inlines) if split.abstract_section.is_none() => {
                    split.abstract_section = Some(AbstractSection::from_paragraph(inlines));
                    continue;
                }
                Block::Html(_) => continue,
                _ => {
                    debug!("discussion starts at top-level block {index}");
                    current = ParseSection::Discussion;
                    if current > up_to {
                        current = ParseSection::End;
                        continue;
                    }
                }
            }
        }

        let start = *discussion_start.get_or_insert(index);
        if Some(index) == last {
            split.discussion = Some(start..=index);
        }
    }

    split
}
