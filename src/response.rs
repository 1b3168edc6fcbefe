use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;
use typed_builder::TypedBuilder;

use crate::Object;

/// A graphql error as carried in a response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct Error {
    /// The error message.
    pub message: String,

    /// The optional graphql extensions.
    #[serde(skip_serializing_if = "Object::is_empty", default)]
    #[builder(default)]
    pub extensions: Object,
}

/// The single response emitted for a request.
///
/// A request is a single-shot request/response contract: the caller observes
/// exactly one of these or one terminal failure, never a stream.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
#[builder(field_defaults(setter(into)))]
pub struct Response {
    /// The response data.
    #[serde(default)]
    #[builder(default = Value::Object(Default::default()))]
    pub data: Value,

    /// The graphql errors carried over from the upstream emission.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    #[builder(default)]
    pub errors: Vec<Error>,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_default_response_has_empty_data() {
        let response = Response::builder().build();
        assert_eq!(response.data, json!({}));
        assert!(response.errors.is_empty());
    }

    #[test]
    fn test_response_serialization_skips_empty_errors() {
        let serialized =
            serde_json::to_value(Response::builder().data(json!({"post": null})).build()).unwrap();
        assert_eq!(serialized, json!({"data": {"post": null}}));
    }
}
