//! Records for REST API documentation tags.

use serde::{Deserialize, Serialize};

/// An opaque reference to a symbol defined elsewhere (e.g. a response type).
///
/// Comment parsing never resolves these; they are filled in by callers that
/// link documentation against a symbol graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolReference(pub String);

/// One documented HTTP response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    /// `0` when the documented code isn't a number.
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    pub contents: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub symbol: Option<SymbolReference>,
}

impl HttpResponse {
    pub fn new(status_code: u16, contents: Vec<String>) -> Self {
        Self {
            status_code,
            reason: None,
            media_type: None,
            contents,
            symbol: None,
        }
    }

    /// Builds a response from a documented status code, degrading anything
    /// that isn't an unsigned number to `0`.
    pub fn from_code(code: &str, contents: Vec<String>) -> Self {
        let status_code = code.trim().parse().unwrap_or_else(|_| {
            log::warn!("HTTP response code {code:?} is not a number, recording 0");
            0
        });
        Self::new(status_code, contents)
    }
}

/// One documented HTTP request parameter (query, path, header or body field).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpParameter {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub contents: Vec<String>,
    pub required: bool,
    #[serde(skip)]
    pub symbol: Option<SymbolReference>,
}

impl HttpParameter {
    pub fn new(name: impl Into<String>, contents: Vec<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
            contents,
            required: true,
            symbol: None,
        }
    }
}

/// The documented request body. Built up across every body-related tag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_type: Option<String>,
    pub parameters: Vec<HttpParameter>,
    pub contents: Vec<String>,
    #[serde(skip)]
    pub symbol: Option<SymbolReference>,
}
