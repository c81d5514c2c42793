//! Cursor-driven completion over the documentation index

pub mod cursor;
pub mod resolver;

pub use cursor::{
    MAX_EXTENSIONS, MAX_TOKEN_SCAN, TokenSpan, dotted_key, expand_leftward, word_before,
};
pub use resolver::{CompletionRecord, Gather, member_completion, variable_completion};
