//! Source locations.
//!
//! A node's location is purely informational: it never participates in
//! identity or equality of the node, and it may be absent.

use cranelift_entity::PrimaryMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::refs::PathId;

/// A span of source code as byte offsets.
#[derive(
    Copy, Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }
}

/// A location in source code: interned path plus span. Copy-able.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Location {
    pub path: PathId,
    pub span: Span,
}

impl Location {
    pub const fn new(path: PathId, span: Span) -> Self {
        Self { path, span }
    }
}

/// Deduplicating interner for source path strings (typically URIs).
pub struct PathInterner {
    paths: PrimaryMap<PathId, String>,
    dedup: HashMap<String, PathId>,
}

impl PathInterner {
    pub fn new() -> Self {
        Self {
            paths: PrimaryMap::new(),
            dedup: HashMap::new(),
        }
    }

    /// Intern a path string, returning the existing id if already present.
    pub fn intern(&mut self, path: String) -> PathId {
        if let Some(&existing) = self.dedup.get(&path) {
            return existing;
        }
        let id = self.paths.push(path.clone());
        self.dedup.insert(path, id);
        id
    }

    /// Look up the path string for an id.
    pub fn get(&self, id: PathId) -> &str {
        &self.paths[id]
    }
}

impl Default for PathInterner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_interner_dedups() {
        let mut paths = PathInterner::new();
        let a = paths.intern("file:///main.st".to_owned());
        let b = paths.intern("file:///main.st".to_owned());
        assert_eq!(a, b);
        assert_eq!(paths.get(a), "file:///main.st");
    }

    #[test]
    fn path_interner_distinguishes() {
        let mut paths = PathInterner::new();
        let a = paths.intern("file:///a.st".to_owned());
        let b = paths.intern("file:///b.st".to_owned());
        assert_ne!(a, b);
    }
}
