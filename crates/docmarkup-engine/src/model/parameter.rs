use serde::{Deserialize, Serialize};

use crate::tree::SourceRange;

/// Documentation for one parameter of a symbol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Parameter {
    pub name: String,
    pub contents: Vec<String>,
    /// `true` for a `- Parameter name:` line, `false` for an entry nested
    /// under `- Parameters:`.
    pub is_standalone: bool,
    #[serde(skip)]
    pub name_range: Option<SourceRange>,
}

impl Parameter {
    pub fn new(name: impl Into<String>, contents: Vec<String>, is_standalone: bool) -> Self {
        Self {
            name: name.into(),
            contents,
            is_standalone,
            name_range: None,
        }
    }

    pub fn with_name_range(mut self, name_range: Option<SourceRange>) -> Self {
        self.name_range = name_range;
        self
    }
}
