pub mod comment;
pub mod io;
pub mod markup;
pub mod model;
pub mod rewriter;
pub mod splitter;
pub mod tags;
pub mod tree;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use comment::{DocComment, normalize_doc_comment, scan_doc_comments};
pub use io::*;
pub use markup::DocumentationMarkup;
pub use model::*;
pub use rewriter::{RewriteOutcome, TagRewriter};
pub use splitter::{ParseSection, SectionSplit, split_sections};
pub use tree::{Block, Document, Inline, ParseOptions};
