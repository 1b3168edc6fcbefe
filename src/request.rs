use serde::Deserialize;
use serde::Serialize;
use typed_builder::TypedBuilder;

use crate::Object;

/// A graphql request issued against the content delivery backend.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
#[serde(rename_all = "camelCase")]
#[builder(field_defaults(setter(into)))]
pub struct Request {
    /// The graphql query.
    pub query: String,

    /// The optional graphql operation name.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[builder(default)]
    pub operation_name: Option<String>,

    /// The runtime variables in the form of a json object.
    #[serde(skip_serializing_if = "Object::is_empty", default)]
    #[builder(default)]
    pub variables: Object,
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_request_deserialization() {
        let request: Request = serde_json::from_value(json!({
            "query": "query Post($id: String) { post(id: $id) { title } }",
            "operationName": "Post",
            "variables": { "id": "abc123" },
        }))
        .unwrap();
        assert_eq!(
            request,
            Request::builder()
                .query("query Post($id: String) { post(id: $id) { title } }")
                .operation_name(Some("Post".to_string()))
                .variables(
                    json!({ "id": "abc123" })
                        .as_object()
                        .cloned()
                        .unwrap_or_default()
                )
                .build()
        );
    }

    #[test]
    fn test_request_defaults() {
        let request: Request = serde_json::from_value(json!({
            "query": "{ post { title } }",
        }))
        .unwrap();
        assert_eq!(request.operation_name, None);
        assert!(request.variables.is_empty());
    }
}
