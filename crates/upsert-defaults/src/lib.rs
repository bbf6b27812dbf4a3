//! Schema-default staging for upsert operations.
//!
//! When an update with `upsert: true` creates a new document, fields the
//! caller did not set — and that are not already pinned by an equality
//! condition in the selection filter — should still receive their
//! schema-declared defaults. [`apply_insert_defaults`] stages those defaults
//! under the `$setOnInsert` operator section, so a data store that supports
//! on-insert-only assignments applies them atomically, and only when the
//! operation actually inserts.
//!
//! # Example
//!
//! ```
//! use serde_json::json;
//! use upsert_defaults::{apply_insert_defaults, DocumentSchema, SchemaPath, UpdateOptions};
//!
//! let schema = DocumentSchema::builder()
//!     .path("status", SchemaPath::new().default_literal(json!("active")))
//!     .path("score", SchemaPath::new().default_literal(json!(0)))
//!     .build()
//!     .unwrap();
//!
//! let update = json!({ "$set": { "score": 10 } });
//! let options = UpdateOptions {
//!     upsert: true,
//!     set_defaults_on_insert: true,
//!     ..Default::default()
//! };
//!
//! // `score` is modified by the update, so only `status` gets its default.
//! let result = apply_insert_defaults(&json!({}), &schema, update, options);
//! assert_eq!(result["$setOnInsert"], json!({ "status": "active" }));
//! ```

pub mod apply;
pub mod filter;
pub mod schema;
pub mod update;

pub use apply::{apply_insert_defaults, collect_insert_defaults, UpdateOptions, SET_ON_INSERT};
pub use filter::{classify_condition, mark_pinned_paths, FilterCondition};
pub use schema::{DefaultSource, DocumentSchema, DocumentSchemaBuilder, SchemaError, SchemaPath};
pub use update::{classify, collect_modified_paths, UpdateForm, OPERATOR_MARKER};
