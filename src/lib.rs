//! Translates graphql query operations onto a rest-style content delivery
//! api that has no query language of its own.
//!
//! The analysis side walks the typed query AST to decide which backend
//! resource, method and parameters satisfy the operation; the shape side
//! records the exact nested selection the caller expects back so a flat
//! backend payload can be reshaped to match. Fetching, reshaping and
//! evaluation are collaborator seams, see [`ContentFetcher`], [`Reshaper`]
//! and [`Evaluator`].

mod configuration;
mod error;
mod request;
mod response;
mod services;
mod spec;

pub use configuration::*;
pub use error::*;
pub use request::*;
pub use response::*;
pub use services::*;
pub use spec::*;

/// A json object.
pub type Object = serde_json::Map<String, serde_json::Value>;
