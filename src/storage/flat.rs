//! Flat path index for prefix completion
//!
//! Maps the full dotted path of every documented symbol to its tree node.
//! Lookups are a linear scan in registration order; the working sets this
//! serves are a few thousand paths at most.

use crate::storage::tree::NodeId;
use indexmap::IndexMap;
use tracing::debug;

/// One registered path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatEntry {
    pub path: String,
    pub node: NodeId,
    pub parent: NodeId,
}

/// Outcome of [`FlatIndex::register`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Registration {
    Added,
    /// The path was already registered; the earlier entry was kept
    Collision,
}

#[derive(Debug, Clone, Default)]
pub struct FlatIndex {
    entries: IndexMap<String, FlatEntry>,
    collisions: usize,
}

impl FlatIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `path` unless it is already present. A repeat registration
    /// is logged and counted, never an error.
    pub fn register(&mut self, path: String, node: NodeId, parent: NodeId) -> Registration {
        if let Some(existing) = self.entries.get(&path) {
            debug!(
                path = %path,
                existing = ?existing.node,
                new = ?node,
                "doc collision, keeping earlier entry"
            );
            self.collisions += 1;
            return Registration::Collision;
        }

        self.entries.insert(
            path.clone(),
            FlatEntry {
                path,
                node,
                parent,
            },
        );
        Registration::Added
    }

    pub fn get(&self, path: &str) -> Option<&FlatEntry> {
        self.entries.get(path)
    }

    /// Entries whose path starts with `query`, in registration order,
    /// at most `limit` of them
    pub fn lookup_prefix<'a>(
        &'a self,
        query: &'a str,
        limit: usize,
    ) -> impl Iterator<Item = &'a FlatEntry> + 'a {
        self.entries
            .values()
            .filter(move |entry| entry.path.starts_with(query))
            .take(limit)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Repeat registrations seen since creation
    pub fn collisions(&self) -> usize {
        self.collisions
    }

    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}
