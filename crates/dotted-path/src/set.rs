//! Dotted-path sets with prefix-inclusive containment.

use std::collections::HashSet;

/// A set of dotted paths.
///
/// Beyond plain membership, [`PathSet::covers`] implements prefix-inclusive
/// containment: a path is covered when it is present verbatim or when any
/// strict dotted prefix of it is present. Inserting `a.b` covers `a.b.c`
/// but not `a` or `a.c`.
///
/// # Example
///
/// ```
/// use dotted_path::PathSet;
///
/// let mut set = PathSet::new();
/// set.insert("a.b");
///
/// assert!(set.contains("a.b"));
/// assert!(set.covers("a.b.c"));
/// assert!(!set.covers("a"));
/// assert!(!set.covers("a.c"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet {
    paths: HashSet<String>,
}

impl PathSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a path as present.
    pub fn insert(&mut self, path: impl Into<String>) {
        self.paths.insert(path.into());
    }

    /// Exact membership, no prefix logic.
    pub fn contains(&self, path: &str) -> bool {
        self.paths.contains(path)
    }

    /// Prefix-inclusive containment.
    ///
    /// True when `path` is present verbatim, or when any strict dotted
    /// prefix of it (built incrementally from the first segment) is present.
    pub fn covers(&self, path: &str) -> bool {
        if self.paths.contains(path) {
            return true;
        }
        let mut segments = path.split('.');
        let Some(first) = segments.next() else {
            return false;
        };
        let mut prefix = String::with_capacity(path.len());
        prefix.push_str(first);
        for segment in segments {
            if self.paths.contains(prefix.as_str()) {
                return true;
            }
            prefix.push('.');
            prefix.push_str(segment);
        }
        false
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Iterate the recorded paths in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.paths.iter().map(String::as_str)
    }
}
