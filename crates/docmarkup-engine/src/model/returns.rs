use serde::{Deserialize, Serialize};

/// Documentation about a symbol's return value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Return {
    pub contents: Vec<String>,
}

impl Return {
    pub fn new(contents: Vec<String>) -> Self {
        Self { contents }
    }
}

/// Documentation about the errors a symbol can throw.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Throw {
    pub contents: Vec<String>,
}

impl Throw {
    pub fn new(contents: Vec<String>) -> Self {
        Self { contents }
    }
}
