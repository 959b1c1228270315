//! The documentation model produced for one comment.

pub mod http;
pub mod parameter;
pub mod returns;
pub mod sections;
pub mod simple_tag;
pub mod tagged;

pub use http::{HttpBody, HttpParameter, HttpResponse, SymbolReference};
pub use parameter::Parameter;
pub use returns::{Return, Throw};
pub use sections::{AbstractSection, DiscussionSection};
pub use simple_tag::SimpleTag;
pub use tagged::TaggedComponents;
