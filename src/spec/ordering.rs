use serde_json::Value;

/// Convert one order expression from query-variable syntax into the
/// backend's sort syntax, e.g. `publishedAt_DESC` into
/// `-fields.publishedAt`. Anything that is not a string passes through
/// unchanged.
pub fn normalize_order(expression: &Value) -> Value {
    match expression {
        Value::String(expression) => Value::String(normalize_order_expression(expression)),
        other => other.clone(),
    }
}

pub(crate) fn normalize_order_expression(expression: &str) -> String {
    let mut field = expression.replace('_', ".");
    if !field.starts_with("sys.") {
        field = format!("fields.{field}");
    }
    let (field, descending) = if let Some(base) = field.strip_suffix(".DESC") {
        (base.to_string(), true)
    } else if let Some(base) = field.strip_suffix(".ASC") {
        (base.to_string(), false)
    } else {
        (field, false)
    };
    // Two legacy pseudo-fields the backend no longer exposes under these
    // names.
    let field = match field.as_str() {
        "sys.firstPublishedAt" => "sys.createdAt",
        "sys.publishedAt" => "sys.updatedAt",
        _ => field.as_str(),
    };
    if descending {
        format!("-{field}")
    } else {
        field.to_string()
    }
}
