//! Backward token walk from the cursor
//!
//! Given the token under the cursor, reconstructs the dotted access
//! expression in front of it (`foo.bar.ba|` yields `foo`, `bar`, `ba`).
//! Preceding tokens must be joined by a single `.` with no whitespace and
//! consist of ASCII letters only. The walk never mutates the buffer.

use tracing::trace;

/// Letters scanned backward for one preceding token
pub const MAX_TOKEN_SCAN: usize = 100;

/// Preceding tokens added in front of the cursor token
pub const MAX_EXTENSIONS: usize = 5;

/// Byte span of a token in the buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenSpan {
    pub start: usize,
    pub end: usize,
}

impl TokenSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Token text, trimmed. Spans that fall outside the buffer or off a
    /// char boundary read as empty.
    pub fn text<'a>(&self, buffer: &'a str) -> &'a str {
        buffer.get(self.start..self.end).unwrap_or_default().trim()
    }
}

/// States of the backward scan for one preceding token
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scan {
    /// Expect a `.` right before the current token
    Dot,
    /// Consuming letters leftward from the byte before `end`
    Letters { end: usize, consumed: usize },
    /// Scan finished; a token exists if anything was consumed
    Done { end: usize, consumed: usize },
}

/// Find the token joined to `current` by a dot, if any
fn preceding_token(bytes: &[u8], current: TokenSpan) -> Option<TokenSpan> {
    let mut state = Scan::Dot;
    loop {
        state = match state {
            Scan::Dot => match current.start.checked_sub(1) {
                Some(dot) if bytes.get(dot) == Some(&b'.') => Scan::Letters {
                    end: dot,
                    consumed: 0,
                },
                _ => return None,
            },
            Scan::Letters { end, consumed } if consumed == MAX_TOKEN_SCAN => {
                Scan::Done { end, consumed }
            }
            Scan::Letters { end, consumed } => {
                let next = (end - consumed).checked_sub(1).and_then(|i| bytes.get(i));
                match next {
                    Some(byte) if byte.is_ascii_alphabetic() => Scan::Letters {
                        end,
                        consumed: consumed + 1,
                    },
                    _ => Scan::Done { end, consumed },
                }
            }
            Scan::Done { consumed: 0, .. } => return None,
            Scan::Done { end, consumed } => return Some(TokenSpan::new(end - consumed, end)),
        };
    }
}

/// Expand the cursor token leftward into at most `MAX_EXTENSIONS + 1`
/// tokens, ordered left to right (the cursor token is last)
pub fn expand_leftward(buffer: &str, token_start: usize, token_end: usize) -> Vec<TokenSpan> {
    let bytes = buffer.as_bytes();
    let mut tokens = vec![TokenSpan::new(token_start, token_end)];

    for _ in 0..MAX_EXTENSIONS {
        match preceding_token(bytes, tokens[0]) {
            Some(token) => tokens.insert(0, token),
            None => break,
        }
    }

    trace!(count = tokens.len(), "expanded cursor token");
    tokens
}

/// Join token texts with `.`
pub fn dotted_key(buffer: &str, tokens: &[TokenSpan]) -> String {
    tokens
        .iter()
        .map(|token| token.text(buffer))
        .collect::<Vec<_>>()
        .join(".")
}

/// The identifier ending at `offset`: letters, digits, `_` and `$`
pub fn word_before(buffer: &str, offset: usize) -> TokenSpan {
    let end = offset.min(buffer.len());
    let start = buffer.as_bytes()[..end]
        .iter()
        .rposition(|byte| !(byte.is_ascii_alphanumeric() || *byte == b'_' || *byte == b'$'))
        .map_or(0, |pos| pos + 1);
    TokenSpan::new(start, end)
}
