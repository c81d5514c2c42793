//! Documentation-comment symbol index for code completion

pub mod completion;
pub mod config;
pub mod error;
pub mod indexing;
pub mod logging;
pub mod parsing;
pub mod storage;
pub mod symbol;

// Explicit exports for better API clarity
pub use completion::{CompletionRecord, Gather, TokenSpan};
pub use config::Settings;
pub use error::{IndexError, IndexResult, ParseError, ParseResult};
pub use indexing::{DocSession, FileWalker, IndexStats, ParseOutcome, SharedSession};
pub use parsing::{CommentParser, DocComment, JsDocParser, Tag, TagKind};
pub use storage::{DocIndex, MAX_PATH_DEPTH, NodeId, NodeKind};
pub use symbol::Definition;
