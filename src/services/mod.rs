mod content_service;
mod fetch;

use async_trait::async_trait;
use serde_json::Value;

pub use content_service::*;
pub use fetch::*;

use crate::error::BoxError;
use crate::request::Request;
use crate::response::Response;
use crate::spec::ShapeDescriptor;

/// Forwards the request to the next handler in the middleware chain.
///
/// When no forwarder is configured the service behaves as if the chain
/// produced an empty-data response.
#[async_trait]
pub trait Forwarder: Send + Sync {
    async fn forward(&self, request: &Request) -> Result<Response, BoxError>;
}

/// Reshapes a raw backend payload into the nested tree the query expects,
/// guided by the shape descriptor when one is available.
pub trait Reshaper: Send + Sync {
    fn reshape(
        &self,
        root_key: &str,
        payload: &Value,
        shape: Option<&ShapeDescriptor>,
    ) -> Result<Value, BoxError>;
}

/// Evaluates the original query against the reshaped tree to produce the
/// final response data.
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(&self, request: &Request, reshaped: &Value) -> Result<Value, BoxError>;
}
