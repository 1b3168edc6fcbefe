use std::collections::HashMap;

use apollo_compiler::ast;

use super::Query;

/// Whether a declared variable feeds an argument directly or a field nested
/// inside an object-valued argument.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BindingKind {
    Argument,
    ObjectField,
}

/// The backend field one declared variable ultimately feeds.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    pub kind: BindingKind,
    pub field: String,
}

/// Per-request map from declared variable name to its [`Binding`].
///
/// Built once from the AST alone, read-only afterwards. Later bindings for a
/// previously seen variable name overwrite earlier ones; there is no
/// conflict detection.
#[derive(Debug, Default, PartialEq)]
pub struct VariableBindings {
    map: HashMap<String, Binding>,
}

impl VariableBindings {
    pub fn new(query: &Query) -> Self {
        let mut map = HashMap::new();
        for operation in query.operation_definitions() {
            for selection in &operation.selection_set {
                let ast::Selection::Field(field) = selection else {
                    continue;
                };
                for argument in &field.arguments {
                    bind_argument(&mut map, argument);
                }
            }
        }
        Self { map }
    }

    pub fn get(&self, variable: &str) -> Option<&Binding> {
        self.map.get(variable)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

fn bind_argument(map: &mut HashMap<String, Binding>, argument: &ast::Argument) {
    match &*argument.value {
        ast::Value::Object(object_fields) => {
            for (name, value) in object_fields {
                if let ast::Value::Variable(variable) = &**value {
                    map.insert(
                        variable.to_string(),
                        Binding {
                            kind: BindingKind::ObjectField,
                            field: name.to_string(),
                        },
                    );
                }
            }
        }
        ast::Value::Variable(variable) => {
            map.insert(
                variable.to_string(),
                Binding {
                    kind: BindingKind::Argument,
                    field: argument.name.to_string(),
                },
            );
        }
        _ => {}
    }
}
