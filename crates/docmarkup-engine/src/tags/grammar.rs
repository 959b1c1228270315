//! The closed table of tag keywords recognized at the start of a list item.

/// Tags that carry no structure beyond a name and content. Kept for
/// compatibility with older comment conventions.
pub const SIMPLE_TAGS: &[&str] = &[
    "attention",
    "author",
    "authors",
    "bug",
    "complexity",
    "copyright",
    "date",
    "experiment",
    "invariant",
    "localizationkey",
    "mutatingvariant",
    "nonmutatingvariant",
    "postcondition",
    "precondition",
    "remark",
    "remarks",
    "returns",
    "throws",
    "requires",
    "since",
    "tag",
    "todo",
    "version",
    "keyword",
    "recommended",
    "recommendedover",
];

/// A structured tag recognized from a list item's name.
///
/// Keywords match case-insensitively; arguments are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KnownTagKind {
    Returns,
    Throws,
    Parameter(String),
    ParametersOutline,
    HttpBody { media_type: Option<String> },
    HttpResponse(String),
    HttpResponsesOutline,
    HttpParameter(String),
    HttpParametersOutline,
    HttpBodyParameter(String),
    HttpBodyParametersOutline,
}

impl KnownTagKind {
    /// Classifies a tag name such as `Parameter foo` or `Returns`.
    ///
    /// Keywords that take an argument only match when one follows; the rest
    /// only match when the name is the bare keyword (`HttpBody` also accepts
    /// an optional media type).
    pub fn classify(name: &str) -> Option<Self> {
        let name = name.trim();
        let (keyword, argument) = match name.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, Some(rest.trim()).filter(|rest| !rest.is_empty())),
            None => (name, None),
        };

        let kind = match (keyword.to_lowercase().as_str(), argument) {
            ("returns", None) => Self::Returns,
            ("throws", None) => Self::Throws,
            ("parameter", Some(name)) => Self::Parameter(name.to_string()),
            ("parameters", None) => Self::ParametersOutline,
            ("httpbody", media_type) => Self::HttpBody {
                media_type: media_type.map(str::to_string),
            },
            ("httpresponse", Some(code)) => Self::HttpResponse(code.to_string()),
            ("httpresponses", None) => Self::HttpResponsesOutline,
            ("httpparameter", Some(name)) => Self::HttpParameter(name.to_string()),
            ("httpparameters", None) => Self::HttpParametersOutline,
            ("httpbodyparameter", Some(name)) => Self::HttpBodyParameter(name.to_string()),
            ("httpbodyparameters", None) => Self::HttpBodyParametersOutline,
            _ => return None,
        };
        Some(kind)
    }
}

/// Case-insensitive membership in [`SIMPLE_TAGS`].
pub fn is_simple_tag(name: &str) -> bool {
    let name = name.trim().to_lowercase();
    SIMPLE_TAGS.contains(&name.as_str())
}
