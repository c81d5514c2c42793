//! Block comment extraction
//!
//! Scans raw source text for `/* ... */` spans. The scan is purely lexical:
//! comment markers inside string literals are picked up as well, matching
//! how the host engine hands us whole files without token information.

use regex::Regex;
use std::sync::LazyLock;

/// Spans at or below this length carry no content (`/**/`)
const MIN_COMMENT_LEN: usize = 5;

/// Non-greedy block comment: stops at the first `*/`, allows `*` that is
/// not followed by `/`
static BLOCK_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/\*[^*]*\*+(?:[^/*][^*]*\*+)*/").expect("Invalid block comment regex")
});

/// A block comment located in the source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CommentSpan<'a> {
    /// Byte offset of the opening `/*`
    pub start: usize,
    /// Byte offset one past the closing `*/`
    pub end: usize,
    /// The comment including its delimiters
    pub text: &'a str,
}

/// Lazy iterator over the block comments of a source text
pub struct CommentSpans<'a> {
    matches: regex::Matches<'static, 'a>,
}

impl<'a> Iterator for CommentSpans<'a> {
    type Item = CommentSpan<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.matches
            .by_ref()
            .find(|m| m.len() >= MIN_COMMENT_LEN)
            .map(|m| CommentSpan {
                start: m.start(),
                end: m.end(),
                text: m.as_str(),
            })
    }
}

/// Extract every non-empty block comment from `source`, in source order
pub fn extract_comments(source: &str) -> CommentSpans<'_> {
    CommentSpans {
        matches: BLOCK_COMMENT.find_iter(source),
    }
}
