use async_trait::async_trait;
use serde_json::Value;

use crate::configuration::ClientOptions;
use crate::error::FetchError;
use crate::Object;

/// A client able to fetch entries from the content delivery backend.
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    /// Fetch a single entry by id.
    async fn get_entry(&self, id: &str, params: &Object) -> Result<Value, FetchError>;

    /// Fetch a filtered collection of entries.
    async fn get_entries(&self, params: &Object) -> Result<Value, FetchError>;
}

/// A fetcher for the content delivery backend that uses http.
#[derive(Clone, Debug)]
pub struct HttpContentFetcher {
    options: ClientOptions,
    http_client: reqwest::Client,
}

impl HttpContentFetcher {
    /// Construct a fetcher addressing the space and environment named by the
    /// options.
    pub fn new(options: ClientOptions) -> Self {
        Self {
            options,
            http_client: reqwest::Client::new(),
        }
    }

    async fn get_json(&self, url: String, params: &Object) -> Result<Value, FetchError> {
        let response = self
            .http_client
            .get(url)
            .query(&query_pairs(&self.options, params))
            .send()
            .await
            .map_err(|err| FetchError::TransportError {
                reason: err.to_string(),
            })?;
        let status = response.status();
        if !status.is_success() {
            let reason = response.text().await.unwrap_or_default();
            return Err(FetchError::BackendError {
                status: status.as_u16(),
                reason,
            });
        }
        response
            .json()
            .await
            .map_err(|err| FetchError::MalformedResponse {
                reason: err.to_string(),
            })
    }
}

/// Query-string pairs for one call: the access token followed by the
/// translated parameter set, non-string values rendered as json.
fn query_pairs(options: &ClientOptions, params: &Object) -> Vec<(String, String)> {
    let mut pairs = vec![("access_token".to_string(), options.access_token.clone())];
    pairs.extend(params.iter().map(|(name, value)| {
        let value = match value {
            Value::String(string) => string.clone(),
            other => other.to_string(),
        };
        (name.clone(), value)
    }));
    pairs
}

#[async_trait]
impl ContentFetcher for HttpContentFetcher {
    async fn get_entry(&self, id: &str, params: &Object) -> Result<Value, FetchError> {
        self.get_json(format!("{}/{}", self.options.entries_url(), id), params)
            .await
    }

    async fn get_entries(&self, params: &Object) -> Result<Value, FetchError> {
        self.get_json(self.options.entries_url(), params).await
    }
}
