//! Update-descriptor classification and modified-path collection.

use dotted_path::{join, PathSet};
use serde_json::{Map, Value};

/// Marker character introducing an operator key (`$set`, `$inc`, ...).
pub const OPERATOR_MARKER: char = '$';

/// Shape of an update descriptor, decided once at the boundary.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateForm<'a> {
    /// At least one top-level key is an operator key. Non-operator keys in a
    /// mixed descriptor are ignored for modification tracking.
    Operators(Vec<(&'a str, &'a Value)>),
    /// No operator keys: whole-document replacement intent.
    Replacement(&'a Map<String, Value>),
    /// Absent or non-object descriptor.
    Empty,
}

impl UpdateForm<'_> {
    pub fn is_operator_style(&self) -> bool {
        matches!(self, UpdateForm::Operators(_))
    }
}

/// Classify an update descriptor by scanning its top-level keys.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use upsert_defaults::update::{classify, UpdateForm};
///
/// let update = json!({ "$set": { "a": 1 } });
/// assert!(classify(&update).is_operator_style());
///
/// let replacement = json!({ "name": "x" });
/// assert!(!classify(&replacement).is_operator_style());
///
/// assert_eq!(classify(&json!(null)), UpdateForm::Empty);
/// ```
pub fn classify(update: &Value) -> UpdateForm<'_> {
    let Value::Object(map) = update else {
        return UpdateForm::Empty;
    };
    let operators: Vec<(&str, &Value)> = map
        .iter()
        .filter(|(key, _)| key.starts_with(OPERATOR_MARKER))
        .map(|(key, value)| (key.as_str(), value))
        .collect();
    if operators.is_empty() {
        UpdateForm::Replacement(map)
    } else {
        UpdateForm::Operators(operators)
    }
}

/// Record every dotted path `node` explicitly modifies into `modified`.
///
/// Mappings mark each joined path and then recurse into its value, so both
/// a parent path and all descendant paths it touches are recorded. Terminal
/// values (including arrays) mark the accumulated prefix itself. Nothing is
/// recorded for a terminal at the root.
///
/// # Example
///
/// ```
/// use dotted_path::PathSet;
/// use serde_json::json;
/// use upsert_defaults::update::collect_modified_paths;
///
/// let mut modified = PathSet::new();
/// collect_modified_paths(&json!({ "a": { "b": 1 }, "c": 2 }), "", &mut modified);
///
/// assert!(modified.contains("a"));
/// assert!(modified.contains("a.b"));
/// assert!(modified.contains("c"));
/// ```
pub fn collect_modified_paths(node: &Value, prefix: &str, modified: &mut PathSet) {
    match node {
        Value::Object(map) => {
            for (key, value) in map {
                let path = join(prefix, key);
                modified.insert(path.clone());
                collect_modified_paths(value, &path, modified);
            }
        }
        _ => {
            if !prefix.is_empty() {
                modified.insert(prefix);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_classify_operator_form() {
        let update = json!({ "$set": { "a": 1 }, "$inc": { "b": 2 } });
        let UpdateForm::Operators(sections) = classify(&update) else {
            panic!("expected operator form");
        };
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].0, "$set");
        assert_eq!(sections[1].0, "$inc");
    }

    #[test]
    fn test_classify_replacement_form() {
        let update = json!({ "name": "x", "score": 1 });
        let UpdateForm::Replacement(map) = classify(&update) else {
            panic!("expected replacement form");
        };
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_classify_mixed_is_operator_form() {
        // Mixed shapes classify as operator-style; the plain key is dropped
        // from the operator sections.
        let update = json!({ "$set": { "a": 1 }, "name": "x" });
        let UpdateForm::Operators(sections) = classify(&update) else {
            panic!("expected operator form");
        };
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].0, "$set");
    }

    #[test]
    fn test_classify_empty() {
        assert_eq!(classify(&json!(null)), UpdateForm::Empty);
        assert_eq!(classify(&json!("not a map")), UpdateForm::Empty);
        // An empty object is still a replacement descriptor.
        assert!(matches!(classify(&json!({})), UpdateForm::Replacement(_)));
    }

    #[test]
    fn test_collect_flat() {
        let mut modified = PathSet::new();
        collect_modified_paths(&json!({ "a": 1, "b": "x" }), "", &mut modified);
        assert!(modified.contains("a"));
        assert!(modified.contains("b"));
        assert_eq!(modified.len(), 2);
    }

    #[test]
    fn test_collect_nested_records_parents_and_leaves() {
        let mut modified = PathSet::new();
        collect_modified_paths(&json!({ "a": { "b": { "c": 1 } } }), "", &mut modified);
        assert!(modified.contains("a"));
        assert!(modified.contains("a.b"));
        assert!(modified.contains("a.b.c"));
    }

    #[test]
    fn test_collect_with_prefix() {
        let mut modified = PathSet::new();
        collect_modified_paths(&json!({ "b": 1 }), "a", &mut modified);
        assert!(modified.contains("a.b"));
        assert!(!modified.contains("a"));
    }

    #[test]
    fn test_collect_array_is_terminal() {
        let mut modified = PathSet::new();
        collect_modified_paths(&json!({ "tags": ["x", "y"] }), "", &mut modified);
        assert!(modified.contains("tags"));
        assert!(!modified.contains("tags.0"));
    }

    #[test]
    fn test_collect_terminal_at_root_records_nothing() {
        let mut modified = PathSet::new();
        collect_modified_paths(&json!(42), "", &mut modified);
        assert!(modified.is_empty());
    }
}
