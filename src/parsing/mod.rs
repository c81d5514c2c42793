pub mod comment;
pub mod jsdoc;
pub mod tag;

pub use comment::{CommentSpan, CommentSpans, extract_comments};
pub use jsdoc::{CommentParser, JsDocParser, unwrap_comment};
pub use tag::{DocComment, Tag, TagKind, TypeExpression};
