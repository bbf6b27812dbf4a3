//! Dotted field-path utilities.
//!
//! A dotted path addresses nested document structure: `"profile.bio"` names
//! the `bio` field inside the `profile` sub-document. This crate provides
//! join/split helpers, path validation, and [`PathSet`], a set of dotted
//! paths with prefix-inclusive containment.
//!
//! # Example
//!
//! ```
//! use dotted_path::{join, PathSet};
//!
//! let mut modified = PathSet::new();
//! modified.insert(join("profile", "bio"));
//!
//! assert!(modified.covers("profile.bio"));
//! assert!(modified.covers("profile.bio.length"));
//! assert!(!modified.covers("profile"));
//! assert!(!modified.covers("profile.name"));
//! ```

use thiserror::Error;

pub mod set;
pub use set::PathSet;

/// Maximum allowed number of dotted segments in a path.
const MAX_PATH_DEPTH: usize = 256;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("EMPTY_PATH")]
    EmptyPath,
    #[error("EMPTY_SEGMENT")]
    EmptySegment,
    #[error("PATH_TOO_DEEP")]
    PathTooDeep,
}

/// Join a path prefix and a segment with a `.` separator.
///
/// An empty prefix yields the segment alone, so paths can be built
/// incrementally starting from the document root.
///
/// # Example
///
/// ```
/// use dotted_path::join;
///
/// assert_eq!(join("", "name"), "name");
/// assert_eq!(join("profile", "bio"), "profile.bio");
/// ```
pub fn join(prefix: &str, segment: &str) -> String {
    if prefix.is_empty() {
        return segment.to_string();
    }
    let mut out = String::with_capacity(prefix.len() + 1 + segment.len());
    out.push_str(prefix);
    out.push('.');
    out.push_str(segment);
    out
}

/// Split a dotted path into its segments.
///
/// # Example
///
/// ```
/// use dotted_path::split;
///
/// let segments: Vec<&str> = split("a.b.c").collect();
/// assert_eq!(segments, vec!["a", "b", "c"]);
/// ```
pub fn split(path: &str) -> impl Iterator<Item = &str> {
    path.split('.')
}

/// Validate a dotted path.
///
/// # Errors
///
/// - [`PathError::EmptyPath`] - the path is the empty string
/// - [`PathError::EmptySegment`] - the path contains an empty segment
///   (leading, trailing, or doubled `.`)
/// - [`PathError::PathTooDeep`] - the path exceeds the maximum depth
///
/// # Example
///
/// ```
/// use dotted_path::validate;
///
/// validate("profile.bio").unwrap();
/// validate("").unwrap_err();
/// validate("a..b").unwrap_err();
/// validate("a.").unwrap_err();
/// ```
pub fn validate(path: &str) -> Result<(), PathError> {
    if path.is_empty() {
        return Err(PathError::EmptyPath);
    }
    let mut depth = 0;
    for segment in split(path) {
        if segment.is_empty() {
            return Err(PathError::EmptySegment);
        }
        depth += 1;
    }
    if depth > MAX_PATH_DEPTH {
        return Err(PathError::PathTooDeep);
    }
    Ok(())
}
