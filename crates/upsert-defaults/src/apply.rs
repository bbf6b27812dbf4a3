//! The defaults orchestrator.

use dotted_path::{join, PathSet};
use serde_json::{Map, Value};

use crate::filter::mark_pinned_paths;
use crate::schema::{DocumentSchema, SchemaPath};
use crate::update::{classify, collect_modified_paths, UpdateForm};

/// Operator section applied only when the upsert results in an insert.
pub const SET_ON_INSERT: &str = "$setOnInsert";

/// Nested sub-document schemas are traversed exactly one level deep. Deeper
/// traversal is cut off so that sub-document schemas referencing each other
/// cannot cause unbounded recursion.
const MAX_NESTING_DEPTH: usize = 1;

/// Options recognized by [`apply_insert_defaults`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Insert a new document when the filter matches nothing.
    pub upsert: bool,
    /// Stage schema defaults for the insert case.
    pub set_defaults_on_insert: bool,
    /// Replace the whole matched document instead of applying operators.
    pub overwrite: bool,
}

/// Stage schema defaults into an upsert's `$setOnInsert` section.
///
/// For every path the schema declares (one nested level deep), a default is
/// staged unless the path is already touched by the update descriptor or
/// pinned by an equality condition in `filter`. The descriptor is taken by
/// value and returned, possibly augmented; a fresh object is produced when
/// the input was not an object and at least one default must be staged.
///
/// Never fails: absent or empty filters, descriptors, and schemas all
/// degrade to no-ops or minimal staging.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use upsert_defaults::{apply_insert_defaults, DocumentSchema, SchemaPath, UpdateOptions};
///
/// let schema = DocumentSchema::builder()
///     .path("status", SchemaPath::new().default_literal(json!("active")))
///     .build()
///     .unwrap();
/// let options = UpdateOptions {
///     upsert: true,
///     set_defaults_on_insert: true,
///     ..Default::default()
/// };
///
/// // The filter pins `status` by equality, so nothing is staged.
/// let result = apply_insert_defaults(
///     &json!({ "status": "archived" }),
///     &schema,
///     json!({ "$inc": { "visits": 1 } }),
///     options,
/// );
/// assert_eq!(result.get("$setOnInsert"), None);
/// ```
pub fn apply_insert_defaults(
    filter: &Value,
    schema: &DocumentSchema,
    update: Value,
    options: UpdateOptions,
) -> Value {
    if !options.upsert || !options.set_defaults_on_insert {
        return update;
    }

    let mut modified = PathSet::new();
    let mut operator_style = false;
    match classify(&update) {
        UpdateForm::Operators(sections) => {
            for (_, section) in sections {
                collect_modified_paths(section, "", &mut modified);
            }
            operator_style = true;
        }
        UpdateForm::Replacement(_) => collect_modified_paths(&update, "", &mut modified),
        UpdateForm::Empty => {}
    }

    mark_pinned_paths(filter, &mut modified);

    if options.overwrite && !operator_style {
        // Overwrite casts the whole update to a document downstream, and
        // defaults are applied there; staging here would apply them twice.
        return update;
    }

    let staged = collect_insert_defaults(schema, &modified);
    if staged.is_empty() {
        return update;
    }

    let mut map = match update {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    let section = map
        .entry(SET_ON_INSERT.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if let Value::Object(section) = section {
        for (path, value) in staged {
            section.entry(path).or_insert(value);
        }
    }
    Value::Object(map)
}

/// Compute the defaults an upsert would stage, without touching a descriptor.
///
/// Walks the schema's declared paths one nested level deep and returns a
/// `(path, default)` pair for every path that is not covered by `modified`
/// and has a defined default.
pub fn collect_insert_defaults(
    schema: &DocumentSchema,
    modified: &PathSet,
) -> Vec<(String, Value)> {
    let mut staged = Vec::new();
    walk(schema, "", MAX_NESTING_DEPTH, modified, &mut staged);
    staged
}

fn walk(
    schema: &DocumentSchema,
    prefix: &str,
    depth: usize,
    modified: &PathSet,
    staged: &mut Vec<(String, Value)>,
) {
    schema.each_path(|path, descriptor| {
        let full = join(prefix, path);
        if let Some(nested) = descriptor.nested_schema() {
            if depth > 0 {
                walk(nested, &full, depth - 1, modified, staged);
                return;
            }
            // Depth exhausted: fall through and treat it as a plain path.
        }
        if !prefix.is_empty() && descriptor.is_auto_identity() {
            // Staging a generated identity would materialize an empty
            // sub-document purely to hold it.
            return;
        }
        stage_default(descriptor, full, modified, staged);
    });
}

fn stage_default(
    descriptor: &SchemaPath,
    path: String,
    modified: &PathSet,
    staged: &mut Vec<(String, Value)>,
) {
    if modified.covers(&path) {
        return;
    }
    if let Some(value) = descriptor.default_value() {
        staged.push((path, value));
    }
}
