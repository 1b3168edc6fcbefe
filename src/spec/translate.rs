use std::collections::HashSet;

use apollo_compiler::ast;
use apollo_compiler::Name;
use itertools::Itertools;
use serde_json::Value;

use super::normalize_order;
use super::normalize_order_expression;
use super::search_key;
use super::Binding;
use super::BindingKind;
use super::Query;
use super::VariableBindings;
use crate::Object;

/// Backend-recognized top-level parameter names. A bound variable whose
/// target field is one of these passes through verbatim; anything else is
/// assumed to be a content-field filter.
const RESERVED_PARAMETERS: &[&str] = &[
    "access_token",
    "id",
    "include",
    "locale",
    "content_type",
    "select",
    "query",
    "links_to_entry",
    "links_to_asset",
    "order",
    "limit",
    "skip",
    "mimetype_group",
    "preview",
    "where",
];

/// Combine inline literal arguments, bound variables and raw passthrough
/// variables into the finalized flat backend parameter set.
///
/// Later layers win on key collision: literals, then translated bound
/// variables, then runtime variables that are not declared by the operation.
pub fn translate_variables(query: &Query, variables: &Object) -> Object {
    let bindings = VariableBindings::new(query);
    let mut params = inline_argument_params(query);

    for (name, value) in variables {
        let Some(binding) = bindings.get(name) else {
            continue;
        };
        match translate_bound_variable(binding, value) {
            Ok(ParamUpdate::Insert(key, value)) => {
                params.insert(key, value);
            }
            Ok(ParamUpdate::Remove(key)) => {
                params.remove(&key);
            }
            Ok(ParamUpdate::None) => {}
            Err(reason) => {
                // Per-variable isolation: a failing variable is skipped and
                // the rest of the translation proceeds.
                tracing::warn!(
                    variable = name.as_str(),
                    %reason,
                    "skipping untranslatable variable"
                );
            }
        }
    }

    let declared: HashSet<&str> = query
        .operation_definition()
        .map(|operation| {
            operation
                .variables
                .iter()
                .map(|variable| variable.name.as_str())
                .collect()
        })
        .unwrap_or_default();
    for (name, value) in variables {
        if !declared.contains(name.as_str()) {
            params.insert(name.clone(), value.clone());
        }
    }

    params
}

/// Evaluate the literal arguments on the first selection of the active
/// operation definition.
fn inline_argument_params(query: &Query) -> Object {
    let mut params = Object::new();
    let Some(operation) = query.operation_definition() else {
        return params;
    };
    let Some(ast::Selection::Field(field)) = operation.selection_set.first() else {
        return params;
    };
    for argument in &field.arguments {
        let Some(value) = evaluate_literal(&argument.name, &argument.value) else {
            continue;
        };
        if is_falsy(&value) {
            continue;
        }
        params.insert(argument.name.to_string(), value);
    }
    params
}

fn evaluate_literal(name: &Name, value: &ast::Value) -> Option<Value> {
    match value {
        ast::Value::List(items) => {
            let joined = items
                .iter()
                .filter_map(|item| scalar_token(item))
                .map(|token| {
                    if name.as_str() == "order" {
                        normalize_order_expression(&token)
                    } else {
                        token
                    }
                })
                .join(",");
            Some(Value::String(joined))
        }
        // At this stage a variable reference resolves to the referenced
        // variable's name, not its runtime value; the bound-variable layer
        // overwrites it when the variable is actually provided.
        ast::Value::Variable(variable) => Some(Value::String(variable.to_string())),
        ast::Value::Boolean(boolean) => Some(Value::Bool(*boolean)),
        other => scalar_token(other).map(Value::String),
    }
}

/// The literal token of a scalar-kinded value, as a string.
fn scalar_token(value: &ast::Value) -> Option<String> {
    match value {
        ast::Value::String(string) => Some(string.clone()),
        ast::Value::Enum(name) => Some(name.to_string()),
        ast::Value::Int(int) => Some(int.as_str().to_string()),
        ast::Value::Float(float) => Some(float.as_str().to_string()),
        ast::Value::Boolean(boolean) => Some(boolean.to_string()),
        ast::Value::Null
        | ast::Value::Variable(_)
        | ast::Value::List(_)
        | ast::Value::Object(_) => None,
    }
}

/// The effect one bound variable has on the parameter set.
enum ParamUpdate {
    Insert(String, Value),
    /// Drop the key entirely, including any placeholder an inline variable
    /// reference left behind.
    Remove(String),
    None,
}

fn translate_bound_variable(binding: &Binding, value: &Value) -> Result<ParamUpdate, String> {
    match binding.kind {
        BindingKind::ObjectField => Ok(ParamUpdate::Insert(
            search_key(&binding.field),
            value.clone(),
        )),
        BindingKind::Argument => translate_reserved(&binding.field, value),
    }
}

fn translate_reserved(field: &str, value: &Value) -> Result<ParamUpdate, String> {
    if !RESERVED_PARAMETERS.contains(&field) {
        // A variable bound to a plain argument outside the reserved set
        // emits no parameter at all. Kept as observable behavior; the log
        // line makes the gap visible.
        tracing::debug!(field, "dropping variable bound to non-reserved argument");
        return Ok(ParamUpdate::None);
    }
    match field {
        "preview" if is_falsy(value) => Ok(ParamUpdate::Remove(field.to_string())),
        "order" => {
            let Value::Array(items) = value else {
                return Err(format!("order value must be a list, got {value}"));
            };
            let joined = items
                .iter()
                .map(|item| match normalize_order(item) {
                    Value::String(normalized) => normalized,
                    other => other.to_string(),
                })
                .join(",");
            Ok(ParamUpdate::Insert(field.to_string(), Value::String(joined)))
        }
        // TODO: expand nested `where` arguments into individual filter
        // parameters instead of skipping the variable.
        "where" => Err("where expansion is not implemented".to_string()),
        _ => Ok(ParamUpdate::Insert(field.to_string(), value.clone())),
    }
}

pub(crate) fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(boolean) => !boolean,
        Value::String(string) => string.is_empty(),
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}
