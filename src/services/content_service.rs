use std::sync::Arc;

use serde_json::Value;
use typed_builder::TypedBuilder;

use super::ContentFetcher;
use super::Evaluator;
use super::Forwarder;
use super::HttpContentFetcher;
use super::Reshaper;
use crate::configuration::Configuration;
use crate::error::ContentServiceError;
use crate::error::TranslationError;
use crate::request::Request;
use crate::response::Response;
use crate::spec::is_falsy;
use crate::spec::operation_shapes;
use crate::spec::translate_variables;
use crate::spec::Query;
use crate::Object;

/// Orchestrates one operation end to end: forward upstream, translate the
/// query into a backend parameter set, select method and client, fetch, then
/// hand the payload to the reshaping and evaluation collaborators.
///
/// Each call emits exactly one result: the response, or a terminal error.
/// Reshape and evaluate failures surface as errors rather than leaving the
/// caller waiting.
#[derive(TypedBuilder)]
pub struct ContentService {
    /// The client used for regular queries.
    default_client: Arc<dyn ContentFetcher>,

    /// The client used when the translated `preview` flag is truthy.
    #[builder(default)]
    preview_client: Option<Arc<dyn ContentFetcher>>,

    /// Parameters merged into every call at lowest precedence.
    #[builder(default)]
    query_defaults: Object,

    reshaper: Arc<dyn Reshaper>,

    evaluator: Arc<dyn Evaluator>,

    /// The next handler in the middleware chain, if any.
    #[builder(default)]
    forwarder: Option<Arc<dyn Forwarder>>,
}

impl ContentService {
    /// Build a service whose clients are http fetchers derived from the
    /// configuration. Use [`ContentService::builder`] to supply custom
    /// fetchers or a forwarder.
    pub fn from_configuration(
        configuration: &Configuration,
        reshaper: Arc<dyn Reshaper>,
        evaluator: Arc<dyn Evaluator>,
    ) -> Self {
        let default_client: Arc<dyn ContentFetcher> =
            Arc::new(HttpContentFetcher::new(configuration.client.clone()));
        let preview_client = configuration.preview_client.clone().map(|options| {
            Arc::new(HttpContentFetcher::new(options)) as Arc<dyn ContentFetcher>
        });
        ContentService::builder()
            .default_client(default_client)
            .preview_client(preview_client)
            .query_defaults(configuration.query_defaults.clone())
            .reshaper(reshaper)
            .evaluator(evaluator)
            .build()
    }

    /// Handle one operation.
    pub async fn call(&self, request: Request) -> Result<Response, ContentServiceError> {
        let upstream = match &self.forwarder {
            Some(forwarder) => forwarder
                .forward(&request)
                .await
                .map_err(ContentServiceError::Upstream)?,
            None => Response::builder().build(),
        };

        let query = Query::parse(&request)?;
        if query.operation_definition().is_none() {
            return Err(TranslationError::MissingQueryDefinition.into());
        }
        let root_key = query
            .root_field_name()
            .ok_or(TranslationError::MissingRootField)?
            .to_string();

        let mut params = translate_variables(&query, &request.variables);
        let preview = params
            .remove("preview")
            .map_or(false, |value| !is_falsy(&value));
        let client = match (&self.preview_client, preview) {
            (Some(preview_client), true) => preview_client,
            _ => &self.default_client,
        };

        let payload = match params.remove("id") {
            Some(id) => {
                let id = match id {
                    Value::String(id) => id,
                    other => other.to_string(),
                };
                tracing::debug!(%id, root_key = root_key.as_str(), "fetching single entry");
                client.get_entry(&id, &self.merged(params)).await?
            }
            None => {
                params.insert(
                    "content_type".to_string(),
                    Value::String(content_type(&root_key).to_string()),
                );
                tracing::debug!(root_key = root_key.as_str(), "fetching entry collection");
                client.get_entries(&self.merged(params)).await?
            }
        };

        let shapes = operation_shapes(&query);
        let shape = request
            .operation_name
            .as_deref()
            .and_then(|name| shapes.get(name));
        let reshaped = self
            .reshaper
            .reshape(&root_key, &payload, shape)
            .map_err(ContentServiceError::Reshape)?;
        let data = self
            .evaluator
            .evaluate(&request, &reshaped)
            .await
            .map_err(ContentServiceError::Evaluate)?;

        Ok(Response::builder()
            .data(data)
            .errors(upstream.errors)
            .build())
    }

    fn merged(&self, params: Object) -> Object {
        let mut merged = self.query_defaults.clone();
        merged.extend(params);
        merged
    }
}

/// Derive the backend content type from the root resource key by stripping a
/// trailing `Collection` suffix, e.g. `postCollection` to `post`.
fn content_type(root_key: &str) -> &str {
    root_key.strip_suffix("Collection").unwrap_or(root_key)
}
