//! The documentation index: symbol tree plus flat path index
//!
//! Every insertion goes through [`DocIndex::insert`], which updates the tree
//! and mirrors the path into the flat index. Flat entries point at tree
//! nodes rather than holding copies, so a definition merged into the tree
//! is what prefix lookups see, even when the flat registration itself was a
//! collision.

use crate::error::IndexResult;
use crate::storage::flat::FlatIndex;
use crate::storage::tree::{NodeId, SymbolNode, SymbolTree, split_path};
use crate::symbol::Definition;
use serde_json::{Map, Value};
use tracing::debug;

/// A prefix lookup hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixMatch<'a> {
    pub path: &'a str,
    pub node: NodeId,
    pub definition: &'a Definition,
}

#[derive(Debug, Clone, Default)]
pub struct DocIndex {
    tree: SymbolTree,
    flat: FlatIndex,
}

impl DocIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a definition at a path split on `.` and `#`
    pub fn insert(&mut self, path: &str, record: Definition) -> IndexResult<NodeId> {
        self.insert_segments(&split_path(path), record)
    }

    pub fn insert_segments(&mut self, segments: &[&str], record: Definition) -> IndexResult<NodeId> {
        let inserted = self.tree.insert(segments, record)?;
        let flat_path = segments.join(".");

        debug!(
            path = %flat_path,
            merged = inserted.merged,
            "indexed definition"
        );

        self.flat.register(flat_path, inserted.node, inserted.parent);
        Ok(inserted.node)
    }

    /// Definition at an exact path
    pub fn lookup(&self, path: &str) -> Option<&Definition> {
        self.tree.definition(path)
    }

    /// Definitions whose flat path starts with `query`, in registration
    /// order, at most `limit`
    pub fn lookup_prefix<'a>(&'a self, query: &'a str, limit: usize) -> Vec<PrefixMatch<'a>> {
        self.flat
            .lookup_prefix(query, limit)
            .filter_map(|entry| {
                let definition = self.tree.node(entry.node)?.definition()?;
                Some(PrefixMatch {
                    path: entry.path.as_str(),
                    node: entry.node,
                    definition,
                })
            })
            .collect()
    }

    /// Top-level symbols in insertion order; placeholders yield `None`
    pub fn top_level(&self) -> impl Iterator<Item = (&str, NodeId, Option<&Definition>)> + '_ {
        self.tree.root().children().map(|(segment, id)| {
            let definition = self.tree.node(id).and_then(SymbolNode::definition);
            (segment, id, definition)
        })
    }

    pub fn tree(&self) -> &SymbolTree {
        &self.tree
    }

    pub fn flat(&self) -> &FlatIndex {
        &self.flat
    }

    /// Documented paths
    pub fn len(&self) -> usize {
        self.flat.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.is_empty() && self.flat.is_empty()
    }

    pub fn collisions(&self) -> usize {
        self.flat.collisions()
    }

    /// Drop every entry. The previous tree and flat index are replaced, not
    /// cleared in place.
    pub fn reset(&mut self) {
        debug!(paths = self.flat.len(), "resetting doc index");
        *self = Self::new();
    }

    /// Nested export in tern definition format: `!name`, `!type` and `!doc`
    /// keys next to child symbols
    pub fn to_json(&self) -> Value {
        self.node_json(self.tree.root())
    }

    fn node_json(&self, node: &SymbolNode) -> Value {
        let mut map = match node.definition().map(serde_json::to_value) {
            Some(Ok(Value::Object(map))) => map,
            _ => Map::new(),
        };
        for (segment, id) in node.children() {
            if let Some(child) = self.tree.node(id) {
                map.insert(segment.to_string(), self.node_json(child));
            }
        }
        Value::Object(map)
    }
}
