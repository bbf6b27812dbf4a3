//! Filter equality analysis.
//!
//! A top-level filter condition either pins its field to a known value
//! (pure equality, so the field needs no default on insert) or constrains
//! it through operators (`$ne`, `$gt`, ...), in which case the field's
//! final value is not determined by the filter and stays eligible for a
//! default.

use dotted_path::PathSet;
use serde_json::{Map, Value};

use crate::update::OPERATOR_MARKER;

/// Classification of a single top-level filter condition.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterCondition<'a> {
    /// A literal value, or a mapping with no operator keys (schema-shaped
    /// equality). The field's value is pinned by the filter.
    Equality(&'a Value),
    /// A mapping containing at least one operator key. The field's final
    /// value is not determined by the filter alone.
    Operators(&'a Map<String, Value>),
}

/// Classify one filter condition value.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use upsert_defaults::filter::{classify_condition, FilterCondition};
///
/// let eq = json!("active");
/// assert!(matches!(classify_condition(&eq), FilterCondition::Equality(_)));
///
/// let ne = json!({ "$ne": "inactive" });
/// assert!(matches!(classify_condition(&ne), FilterCondition::Operators(_)));
/// ```
pub fn classify_condition(condition: &Value) -> FilterCondition<'_> {
    if let Value::Object(map) = condition {
        if map.keys().any(|key| key.starts_with(OPERATOR_MARKER)) {
            return FilterCondition::Operators(map);
        }
    }
    FilterCondition::Equality(condition)
}

/// Record the paths of all equality conditions in `filter` into `modified`.
///
/// Operator conditions are skipped. A non-object filter is a no-op.
pub fn mark_pinned_paths(filter: &Value, modified: &mut PathSet) {
    let Value::Object(map) = filter else {
        return;
    };
    for (path, condition) in map {
        match classify_condition(condition) {
            FilterCondition::Equality(_) => modified.insert(path.clone()),
            FilterCondition::Operators(_) => continue,
        }
    }
}
