use serde::{Deserialize, Serialize};

/// A passthrough tag such as `- Author: …`, name kept in its original case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimpleTag {
    pub tag: String,
    pub contents: Vec<String>,
}

impl SimpleTag {
    pub fn new(tag: impl Into<String>, contents: Vec<String>) -> Self {
        Self {
            tag: tag.into(),
            contents,
        }
    }
}
