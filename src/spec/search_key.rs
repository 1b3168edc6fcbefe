/// Suffix conventions understood on filtered-field variable names, paired
/// with the backend operator they map to. `_not_in` is listed first because
/// the shorter `_not` and `_in` suffixes would partially match it.
const SUFFIX_OPERATORS: &[(&str, &str)] = &[
    ("_not_in", "nin"),
    ("_not", "ne"),
    ("_in", "in"),
    ("_exists", "exists"),
];

/// Map a filtered-field variable name onto the backend's filter-operator
/// syntax, e.g. `title_not_in` onto `fields.title[nin]`.
///
/// The `contains`, `gt`, `gte`, `lt`, `lte`, `near`, `within`, `match` and
/// `all` operators are not supported; names carrying those suffixes fall
/// through to the plain `fields.<name>` form.
pub fn search_key(field: &str) -> String {
    for (suffix, operator) in SUFFIX_OPERATORS {
        if let Some(base) = field.strip_suffix(suffix) {
            return format!("fields.{base}[{operator}]");
        }
    }
    format!("fields.{field}")
}
