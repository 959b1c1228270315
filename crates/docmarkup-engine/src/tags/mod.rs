//! # Tag Recognition
//!
//! Turns `- Keyword argument: content` list items into classified tags.
//!
//! - **`grammar`**: the keyword table ([`KnownTagKind`]) and simple-tag set
//! - **`split`**: splits an item's first line at its colon
//! - **`extract`**: combines both for a single item or an outline of items

pub mod extract;
pub mod grammar;
pub mod split;

pub use extract::{ExtractedTag, extract_outline, extract_tag};
pub use grammar::{KnownTagKind, SIMPLE_TAGS, is_simple_tag};
pub use split::{SplitLine, split_name_and_content};
