use apollo_compiler::ast;
use indexmap::IndexMap;
use serde::Deserialize;
use serde::Serialize;

use super::Query;

/// The nested shape a query expects back: field name (or `...FragmentName`)
/// to subtree, with `None` marking a scalar leaf.
///
/// Handed unmodified to the external reshaping collaborator; never mutated
/// after construction.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ShapeDescriptor(IndexMap<String, Option<ShapeDescriptor>>);

impl ShapeDescriptor {
    fn from_selection_set(selection_set: &[ast::Selection], query: &Query) -> Option<Self> {
        if selection_set.is_empty() {
            return None;
        }
        let mut fields = IndexMap::new();
        for selection in selection_set {
            match selection {
                ast::Selection::Field(field) => {
                    fields.insert(
                        field.name.to_string(),
                        Self::from_selection_set(&field.selection_set, query),
                    );
                }
                ast::Selection::FragmentSpread(spread) => {
                    // Unresolvable fragments are omitted rather than raised:
                    // the reshaping contract is best effort.
                    match query.fragment(spread.fragment_name.as_str()) {
                        Some(fragment) => {
                            fields.insert(
                                format!("...{}", spread.fragment_name),
                                Self::from_selection_set(&fragment.selection_set, query),
                            );
                        }
                        None => {
                            tracing::debug!(
                                fragment = spread.fragment_name.as_str(),
                                "omitting unresolvable fragment spread from shape"
                            );
                        }
                    }
                }
                ast::Selection::InlineFragment(_) => {}
            }
        }
        Some(Self(fields))
    }

    /// The subtree recorded under `name`: `Some(None)` for a scalar leaf,
    /// `None` if the field was not selected.
    pub fn get(&self, name: &str) -> Option<Option<&ShapeDescriptor>> {
        self.0.get(name).map(Option::as_ref)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&ShapeDescriptor>)> {
        self.0
            .iter()
            .map(|(name, subtree)| (name.as_str(), subtree.as_ref()))
    }
}

/// Shape descriptors keyed by operation definition name: exactly one entry
/// for the active operation, or empty if no named query definition exists.
///
/// The orchestrator looks the entry up by the request's operation name; a
/// miss means "no shape hint available", not a failure.
pub fn operation_shapes(query: &Query) -> IndexMap<String, ShapeDescriptor> {
    let mut shapes = IndexMap::new();
    if let Some(operation) = query.operation_definition() {
        if let Some(name) = &operation.name {
            if let Some(shape) = ShapeDescriptor::from_selection_set(&operation.selection_set, query)
            {
                shapes.insert(name.to_string(), shape);
            }
        }
    }
    shapes
}
