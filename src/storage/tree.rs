//! Arena-backed symbol tree
//!
//! Nodes live in a `Vec` and refer to each other by [`NodeId`]. Every node
//! keeps its children in an insertion-ordered map keyed by path segment, so
//! enumerating the top level yields symbols in the order they were first
//! seen.

use crate::error::{IndexError, IndexResult};
use crate::symbol::Definition;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Deepest path the tree accepts, in segments
pub const MAX_PATH_DEPTH: usize = 10;

/// Split a symbol path on `.` and `#`
pub fn split_path(path: &str) -> Vec<&str> {
    path.split(['.', '#']).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The tree root
    pub const ROOT: NodeId = NodeId(0);

    pub fn value(&self) -> u32 {
        self.0
    }

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// What a node holds
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeBody {
    /// Created for an intermediate segment; no comment documented it yet
    Placeholder,
    Definition(Definition),
}

/// Shape of a node, combining its body with whether it has children
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Placeholder,
    Definition,
    DefinitionWithChildren,
}

#[derive(Debug, Clone)]
pub struct SymbolNode {
    pub segment: String,
    pub parent: Option<NodeId>,
    pub body: NodeBody,
    children: IndexMap<String, NodeId>,
}

impl SymbolNode {
    fn new(segment: &str, parent: Option<NodeId>, body: NodeBody) -> Self {
        Self {
            segment: segment.to_string(),
            parent,
            body,
            children: IndexMap::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        match (&self.body, self.children.is_empty()) {
            (NodeBody::Placeholder, _) => NodeKind::Placeholder,
            (NodeBody::Definition(_), true) => NodeKind::Definition,
            (NodeBody::Definition(_), false) => NodeKind::DefinitionWithChildren,
        }
    }

    pub fn definition(&self) -> Option<&Definition> {
        match &self.body {
            NodeBody::Definition(def) => Some(def),
            NodeBody::Placeholder => None,
        }
    }

    /// Children in insertion order
    pub fn children(&self) -> impl Iterator<Item = (&str, NodeId)> + '_ {
        self.children.iter().map(|(segment, id)| (segment.as_str(), *id))
    }

    pub fn child(&self, segment: &str) -> Option<NodeId> {
        self.children.get(segment).copied()
    }
}

/// Where an insertion landed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inserted {
    pub node: NodeId,
    pub parent: NodeId,
    /// The node already existed and the record was merged into it
    pub merged: bool,
}

#[derive(Debug, Clone)]
pub struct SymbolTree {
    nodes: Vec<SymbolNode>,
}

impl Default for SymbolTree {
    fn default() -> Self {
        Self::new()
    }
}

impl SymbolTree {
    pub fn new() -> Self {
        Self {
            nodes: vec![SymbolNode::new("", None, NodeBody::Placeholder)],
        }
    }

    pub fn root(&self) -> &SymbolNode {
        &self.nodes[NodeId::ROOT.index()]
    }

    pub fn node(&self, id: NodeId) -> Option<&SymbolNode> {
        self.nodes.get(id.index())
    }

    /// Number of nodes below the root
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Follow `segments` from the root
    pub fn resolve(&self, segments: &[&str]) -> Option<NodeId> {
        segments.iter().try_fold(NodeId::ROOT, |current, segment| {
            self.node(current)?.child(segment)
        })
    }

    /// Definition stored at a dotted or hashed path
    pub fn definition(&self, path: &str) -> Option<&Definition> {
        let id = self.resolve(&split_path(path))?;
        self.node(id)?.definition()
    }

    /// Insert `record` at `segments`, creating placeholders along the way
    /// and merging into an existing node at the terminal segment.
    ///
    /// Paths longer than [`MAX_PATH_DEPTH`] are rejected before the tree is
    /// touched.
    pub fn insert(&mut self, segments: &[&str], mut record: Definition) -> IndexResult<Inserted> {
        let Some((terminal, intermediate)) = segments.split_last() else {
            return Err(IndexError::General("cannot insert at an empty path".to_string()));
        };
        if segments.len() > MAX_PATH_DEPTH {
            return Err(IndexError::DepthExceeded {
                path: segments.join("."),
                depth: segments.len(),
                max: MAX_PATH_DEPTH,
            });
        }

        let mut parent = NodeId::ROOT;
        for segment in intermediate {
            parent = match self.nodes[parent.index()].child(segment) {
                Some(existing) => existing,
                None => self.push_child(parent, segment, NodeBody::Placeholder),
            };
        }

        let existing = self.nodes[parent.index()].child(terminal);
        let merged = existing.is_some();
        let node = match existing {
            Some(id) => {
                let slot = &mut self.nodes[id.index()].body;
                match slot {
                    NodeBody::Definition(def) => def.merge(record),
                    NodeBody::Placeholder => *slot = NodeBody::Definition(record),
                }
                id
            }
            None => {
                if record.name.is_none() {
                    record.name = Some(terminal.to_string());
                }
                self.push_child(parent, terminal, NodeBody::Definition(record))
            }
        };

        if let NodeBody::Definition(def) = &mut self.nodes[node.index()].body {
            if def.name.is_none() {
                def.name = Some(terminal.to_string());
            }
        }

        Ok(Inserted {
            node,
            parent,
            merged,
        })
    }

    fn push_child(&mut self, parent: NodeId, segment: &str, body: NodeBody) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(SymbolNode::new(segment, Some(parent), body));
        self.nodes[parent.index()]
            .children
            .insert(segment.to_string(), id);
        id
    }

    /// Dotted path of a node, `#` separators folded to `.`
    pub fn path_of(&self, id: NodeId) -> String {
        let mut segments = Vec::new();
        let mut current = Some(id);
        while let Some(node_id) = current {
            if node_id == NodeId::ROOT {
                break;
            }
            let Some(node) = self.node(node_id) else {
                break;
            };
            segments.push(node.segment.as_str());
            current = node.parent;
        }
        segments.reverse();
        segments.join(".")
    }
}
