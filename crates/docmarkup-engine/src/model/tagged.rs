use serde::{Deserialize, Serialize};

use super::{HttpBody, HttpParameter, HttpResponse, Parameter, Return, SimpleTag, Throw};

/// Every tag recorded for one comment, each collection in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TaggedComponents {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub http_responses: Vec<HttpResponse>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub http_parameters: Vec<HttpParameter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub http_body: Option<HttpBody>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub returns: Vec<Return>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub throws: Vec<Throw>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub other_tags: Vec<SimpleTag>,
}

impl TaggedComponents {
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
            && self.http_responses.is_empty()
            && self.http_parameters.is_empty()
            && self.http_body.is_none()
            && self.returns.is_empty()
            && self.throws.is_empty()
            && self.other_tags.is_empty()
    }

    /// The request body, created empty on first use.
    pub fn http_body_mut(&mut self) -> &mut HttpBody {
        self.http_body.get_or_insert_with(HttpBody::default)
    }

    /// Replaces the body contents, creating the body if needed. Parameters
    /// already recorded are kept.
    pub fn set_http_body_contents(&mut self, contents: Vec<String>, media_type: Option<String>) {
        let body = self.http_body_mut();
        body.contents = contents;
        if media_type.is_some() {
            body.media_type = media_type;
        }
    }

    pub fn push_http_body_parameter(&mut self, parameter: HttpParameter) {
        self.http_body_mut().parameters.push(parameter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_components_serialize_to_an_empty_object() {
        let tags = TaggedComponents::default();
        assert!(tags.is_empty());
        assert_eq!(serde_json::to_value(&tags).unwrap(), json!({}));
    }

    #[test]
    fn body_contents_are_overwritten_and_parameters_appended() {
        let mut tags = TaggedComponents::default();
        tags.set_http_body_contents(vec!["first".into()], None);
        tags.push_http_body_parameter(HttpParameter::new("a", vec![]));
        tags.set_http_body_contents(vec!["second".into()], Some("text/plain".into()));
        tags.push_http_body_parameter(HttpParameter::new("b", vec![]));

        let body = tags.http_body.as_ref().unwrap();
        assert_eq!(body.contents, vec!["second"]);
        assert_eq!(body.media_type.as_deref(), Some("text/plain"));
        let names: Vec<_> = body.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn returns_serialize_as_nested_arrays() {
        let tags = TaggedComponents {
            returns: vec![Return::new(vec!["a".into()]), Return::new(vec!["b".into()])],
            ..TaggedComponents::default()
        };
        assert_eq!(
            serde_json::to_value(&tags).unwrap(),
            json!({ "returns": [["a"], ["b"]] })
        );
    }
}
