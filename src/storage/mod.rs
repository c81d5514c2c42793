//! In-memory storage for documented symbols

pub mod flat;
pub mod index;
pub mod tree;

pub use flat::{FlatEntry, FlatIndex, Registration};
pub use index::{DocIndex, PrefixMatch};
pub use tree::{MAX_PATH_DEPTH, NodeBody, NodeId, NodeKind, SymbolNode, SymbolTree, split_path};
