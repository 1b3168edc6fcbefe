use displaydoc::Display;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Boxed error used at the collaborator seams.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised while analyzing a query, before any network call is
/// attempted.
#[derive(Error, Display, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TranslationError {
    /// query could not be parsed: {reason}
    MalformedQuery {
        /// The parser diagnostics.
        reason: String,
    },

    /// query has no root query operation definition
    MissingQueryDefinition,

    /// query operation has no root field to map to a backend resource
    MissingRootField,
}

/// Errors raised while fetching from the content delivery backend.
#[derive(Error, Display, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum FetchError {
    /// HTTP fetch failed: {reason}
    TransportError {
        /// The reason the fetch failed.
        reason: String,
    },

    /// backend returned status {status}: {reason}
    BackendError {
        /// The http status code.
        status: u16,

        /// The backend's error body, if any.
        reason: String,
    },

    /// backend response was malformed: {reason}
    MalformedResponse {
        /// The reason deserialization failed.
        reason: String,
    },
}

/// Terminal failure of a content service request.
///
/// The caller observes exactly one of a single success emission or one of
/// these per request; reshape and evaluate failures surface here instead of
/// leaving the caller waiting.
#[derive(Error, Display, Debug)]
pub enum ContentServiceError {
    /// upstream forward failed: {0}
    Upstream(#[source] BoxError),

    /// {0}
    Translation(#[from] TranslationError),

    /// {0}
    Fetch(#[from] FetchError),

    /// reshaping the backend payload failed: {0}
    Reshape(#[source] BoxError),

    /// evaluating the reshaped tree failed: {0}
    Evaluate(#[source] BoxError),
}
