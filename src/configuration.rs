use serde::Deserialize;
use serde::Serialize;
use typed_builder::TypedBuilder;

use crate::Object;

/// Default host of the content delivery backend.
pub const DELIVERY_HOST: &str = "https://cdn.contentful.com";

/// Default host of the preview backend.
pub const PREVIEW_HOST: &str = "https://preview.contentful.com";

/// Connection options for one content delivery client.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, TypedBuilder)]
#[builder(field_defaults(setter(into)))]
pub struct ClientOptions {
    /// The space to address.
    pub space: String,

    /// The environment within the space.
    #[serde(default = "default_environment")]
    #[builder(default = default_environment())]
    pub environment: String,

    /// The token sent as the `access_token` parameter on every call.
    pub access_token: String,

    /// Base url of the backend host.
    #[serde(default = "default_host")]
    #[builder(default = default_host())]
    pub host: String,
}

impl ClientOptions {
    /// The entry collection url for this client.
    pub(crate) fn entries_url(&self) -> String {
        format!(
            "{}/spaces/{}/environments/{}/entries",
            self.host, self.space, self.environment
        )
    }
}

fn default_environment() -> String {
    "master".to_string()
}

fn default_host() -> String {
    DELIVERY_HOST.to_string()
}

/// Configuration for the content service: a default client, an optional
/// preview client, and defaults merged into every outgoing parameter set at
/// lowest precedence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, TypedBuilder)]
pub struct Configuration {
    /// Options for the default client.
    pub client: ClientOptions,

    /// Options for the preview client, if preview queries are supported.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    #[builder(default)]
    pub preview_client: Option<ClientOptions>,

    /// Parameters merged into every outgoing parameter set, overridden by
    /// anything the translation produces.
    #[serde(skip_serializing_if = "Object::is_empty", default)]
    #[builder(default)]
    pub query_defaults: Object,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_defaults() {
        let options = ClientOptions::builder()
            .space("s1")
            .access_token("token")
            .build();
        assert_eq!(options.environment, "master");
        assert_eq!(options.host, DELIVERY_HOST);
        assert_eq!(
            options.entries_url(),
            "https://cdn.contentful.com/spaces/s1/environments/master/entries"
        );
    }

    #[test]
    fn test_configuration_deserialization() {
        let configuration: Configuration = serde_json::from_value(serde_json::json!({
            "client": { "space": "s1", "access_token": "token" },
            "query_defaults": { "include": "10" },
        }))
        .unwrap();
        assert!(configuration.preview_client.is_none());
        assert_eq!(
            configuration.query_defaults.get("include"),
            Some(&serde_json::Value::String("10".to_string()))
        );
    }
}
