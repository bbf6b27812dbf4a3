//! The schema capability consumed by the defaults orchestrator.
//!
//! A [`DocumentSchema`] declares dotted field paths in insertion order. Each
//! declared path may carry a default source (a literal value or a closure
//! computing one), a nested schema when the path holds a single nested
//! sub-document, and an auto-generated-identity flag.

use std::fmt;
use std::sync::Arc;

use dotted_path::{validate, PathError};
use indexmap::IndexMap;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("invalid declared path {path:?}: {source}")]
    InvalidPath { path: String, source: PathError },
    #[error("duplicate declared path {0:?}")]
    DuplicatePath(String),
}

/// Source of a declared path's default value.
#[derive(Clone)]
pub enum DefaultSource {
    /// A fixed value, cloned on every use.
    Literal(Value),
    /// A closure invoked on every use (timestamps, generated ids, ...).
    Computed(Arc<dyn Fn() -> Value + Send + Sync>),
}

impl fmt::Debug for DefaultSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DefaultSource::Literal(value) => f.debug_tuple("Literal").field(value).finish(),
            DefaultSource::Computed(_) => f.debug_tuple("Computed").field(&"<fn>").finish(),
        }
    }
}

/// Descriptor for one declared field path.
#[derive(Debug, Clone, Default)]
pub struct SchemaPath {
    default: Option<DefaultSource>,
    nested: Option<DocumentSchema>,
    auto_identity: bool,
}

impl SchemaPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a literal default value.
    pub fn default_literal(mut self, value: Value) -> Self {
        self.default = Some(DefaultSource::Literal(value));
        self
    }

    /// Declare a computed default value.
    pub fn default_computed(mut self, f: impl Fn() -> Value + Send + Sync + 'static) -> Self {
        self.default = Some(DefaultSource::Computed(Arc::new(f)));
        self
    }

    /// Declare this path as holding a single nested sub-document with its
    /// own schema.
    pub fn nested(mut self, schema: DocumentSchema) -> Self {
        self.nested = Some(schema);
        self
    }

    /// Mark this path as an auto-generated identity.
    pub fn auto_identity(mut self) -> Self {
        self.auto_identity = true;
        self
    }

    pub fn is_single_nested(&self) -> bool {
        self.nested.is_some()
    }

    pub fn nested_schema(&self) -> Option<&DocumentSchema> {
        self.nested.as_ref()
    }

    pub fn is_auto_identity(&self) -> bool {
        self.auto_identity
    }

    /// Produce this path's default value, if one is declared.
    pub fn default_value(&self) -> Option<Value> {
        match &self.default {
            Some(DefaultSource::Literal(value)) => Some(value.clone()),
            Some(DefaultSource::Computed(f)) => Some(f()),
            None => None,
        }
    }
}

/// An ordered collection of declared field paths.
///
/// # Example
///
/// ```
/// use serde_json::json;
/// use upsert_defaults::{DocumentSchema, SchemaPath};
///
/// let schema = DocumentSchema::builder()
///     .path("status", SchemaPath::new().default_literal(json!("active")))
///     .path("name", SchemaPath::new())
///     .build()
///     .unwrap();
///
/// assert_eq!(schema.len(), 2);
/// assert_eq!(
///     schema.get("status").and_then(|p| p.default_value()),
///     Some(json!("active")),
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct DocumentSchema {
    paths: IndexMap<String, SchemaPath>,
}

impl DocumentSchema {
    pub fn builder() -> DocumentSchemaBuilder {
        DocumentSchemaBuilder::default()
    }

    /// Visit every declared path in declaration order.
    pub fn each_path(&self, mut visitor: impl FnMut(&str, &SchemaPath)) {
        for (path, descriptor) in &self.paths {
            visitor(path, descriptor);
        }
    }

    pub fn get(&self, path: &str) -> Option<&SchemaPath> {
        self.paths.get(path)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}

/// Builder validating declared paths.
#[derive(Debug, Default)]
pub struct DocumentSchemaBuilder {
    paths: IndexMap<String, SchemaPath>,
    error: Option<SchemaError>,
}

impl DocumentSchemaBuilder {
    /// Declare a field path. The first invalid or duplicate declaration is
    /// reported by [`DocumentSchemaBuilder::build`].
    pub fn path(mut self, path: impl Into<String>, descriptor: SchemaPath) -> Self {
        if self.error.is_some() {
            return self;
        }
        let path = path.into();
        if let Err(source) = validate(&path) {
            self.error = Some(SchemaError::InvalidPath { path, source });
            return self;
        }
        if self.paths.contains_key(&path) {
            self.error = Some(SchemaError::DuplicatePath(path));
            return self;
        }
        self.paths.insert(path, descriptor);
        self
    }

    pub fn build(self) -> Result<DocumentSchema, SchemaError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(DocumentSchema { paths: self.paths }),
        }
    }
}
