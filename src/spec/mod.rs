mod bindings;
mod ordering;
mod search_key;
mod shape;
mod translate;

use apollo_compiler::ast;

pub use bindings::*;
pub use ordering::*;
pub use search_key::*;
pub use shape::*;
pub use translate::*;

use crate::error::TranslationError;
use crate::request::Request;

/// A parsed query plus the request metadata needed to resolve which
/// operation definition is active.
#[derive(Debug)]
pub struct Query {
    document: ast::Document,
    operation_name: Option<String>,
}

impl Query {
    /// Parse the request's query text.
    pub fn parse(request: &Request) -> Result<Self, TranslationError> {
        let document = ast::Document::parse(request.query.clone(), "query.graphql").map_err(
            |err| TranslationError::MalformedQuery {
                reason: err.errors.to_string(),
            },
        )?;
        Ok(Self {
            document,
            operation_name: request.operation_name.clone(),
        })
    }

    /// The active operation definition: the query-typed definition matching
    /// the request's operation name if there is one, else the first
    /// query-typed definition in the document.
    pub(crate) fn operation_definition(&self) -> Option<&ast::OperationDefinition> {
        let mut first = None;
        for definition in &self.document.definitions {
            let operation = match definition {
                ast::Definition::OperationDefinition(operation)
                    if operation.operation_type == ast::OperationType::Query =>
                {
                    &**operation
                }
                _ => continue,
            };
            match (self.operation_name.as_deref(), operation.name.as_ref()) {
                (Some(wanted), Some(name)) if name.as_str() == wanted => return Some(operation),
                _ => {
                    if first.is_none() {
                        first = Some(operation);
                    }
                }
            }
        }
        first
    }

    /// Every operation definition in the document, regardless of kind.
    pub(crate) fn operation_definitions(
        &self,
    ) -> impl Iterator<Item = &ast::OperationDefinition> {
        self.document
            .definitions
            .iter()
            .filter_map(|definition| match definition {
                ast::Definition::OperationDefinition(operation) => Some(&**operation),
                _ => None,
            })
    }

    /// Look up a fragment definition by name.
    pub(crate) fn fragment(&self, name: &str) -> Option<&ast::FragmentDefinition> {
        self.document
            .definitions
            .iter()
            .find_map(|definition| match definition {
                ast::Definition::FragmentDefinition(fragment)
                    if fragment.name.as_str() == name =>
                {
                    Some(&**fragment)
                }
                _ => None,
            })
    }

    /// Name of the first field selected by the active operation. This is the
    /// root resource key the backend call is derived from.
    pub(crate) fn root_field_name(&self) -> Option<&str> {
        self.operation_definition()?
            .selection_set
            .iter()
            .find_map(|selection| match selection {
                ast::Selection::Field(field) => Some(field.name.as_str()),
                ast::Selection::FragmentSpread(_) | ast::Selection::InlineFragment(_) => None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(text: &str, operation_name: Option<&str>) -> Query {
        let request = Request::builder()
            .query(text)
            .operation_name(operation_name.map(str::to_string))
            .build();
        Query::parse(&request).unwrap()
    }

    #[test]
    fn test_active_operation_prefers_operation_name() {
        let query = query(
            "query First { a { id } } query Second { b { id } }",
            Some("Second"),
        );
        assert_eq!(query.root_field_name(), Some("b"));
    }

    #[test]
    fn test_active_operation_falls_back_to_first_query() {
        let query = query(
            "query First { a { id } } query Second { b { id } }",
            Some("Missing"),
        );
        assert_eq!(query.root_field_name(), Some("a"));
    }

    #[test]
    fn test_mutations_are_not_active_operations() {
        let query = query("mutation Create { createPost { id } }", None);
        assert!(query.operation_definition().is_none());
        assert_eq!(query.root_field_name(), None);
    }

    #[test]
    fn test_malformed_query_is_a_translation_error() {
        let request = Request::builder().query("query {").build();
        assert!(matches!(
            Query::parse(&request),
            Err(TranslationError::MalformedQuery { .. })
        ));
    }
}
