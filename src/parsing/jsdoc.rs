//! JSDoc comment grammar
//!
//! Turns a raw `/** ... */` block into a [`DocComment`]. Only the shape the
//! normalizer consumes is produced: a free-text description and an ordered
//! tag list where each tag may carry a `{type}`, a name and a description.
//! Hosts with a richer grammar can plug in their own [`CommentParser`].

use crate::error::{ParseError, ParseResult};
use crate::parsing::tag::{DocComment, Tag, TagKind, TypeExpression};

/// Parses raw comment text into structured tags
pub trait CommentParser: Send + Sync {
    /// Parse one comment, delimiters included
    fn parse(&self, raw: &str) -> ParseResult<DocComment>;
}

/// Line-oriented JSDoc parser
#[derive(Debug, Default, Clone, Copy)]
pub struct JsDocParser;

impl JsDocParser {
    pub fn new() -> Self {
        Self
    }
}

impl CommentParser for JsDocParser {
    fn parse(&self, raw: &str) -> ParseResult<DocComment> {
        let body = unwrap_comment(raw)?;
        parse_body(&body)
    }
}

/// Strip the delimiters and the leading `*` gutter of every line
pub fn unwrap_comment(raw: &str) -> ParseResult<String> {
    let inner = raw
        .strip_prefix("/*")
        .and_then(|rest| rest.strip_suffix("*/"))
        .ok_or(ParseError::NotAComment)?;
    let inner = inner.strip_prefix('*').unwrap_or(inner);

    let lines: Vec<&str> = inner
        .lines()
        .map(|line| {
            let line = line.trim_start().trim_start_matches('*');
            line.strip_prefix(' ').unwrap_or(line).trim_end()
        })
        .collect();

    Ok(lines.join("\n"))
}

/// A tag's source text and where it starts in the unwrapped body
struct TagBlock {
    offset: usize,
    text: String,
}

fn parse_body(body: &str) -> ParseResult<DocComment> {
    let mut description = Vec::new();
    let mut blocks: Vec<TagBlock> = Vec::new();
    let mut offset = 0;

    for line in body.split('\n') {
        let trimmed = line.trim_start();
        if trimmed.starts_with('@') {
            blocks.push(TagBlock {
                offset: offset + (line.len() - trimmed.len()),
                text: trimmed.to_string(),
            });
        } else if let Some(block) = blocks.last_mut() {
            block.text.push('\n');
            block.text.push_str(line);
        } else {
            description.push(line);
        }
        offset += line.len() + 1;
    }

    let description = non_empty(description.join("\n"));
    let tags = blocks
        .iter()
        .map(parse_tag)
        .collect::<ParseResult<Vec<_>>>()?;

    Ok(DocComment::new(description, tags))
}

fn parse_tag(block: &TagBlock) -> ParseResult<Tag> {
    let text = &block.text[1..];
    let title_end = text.find(char::is_whitespace).unwrap_or(text.len());
    let title = &text[..title_end];
    let mut rest = text[title_end..].trim_start();

    let mut tag = Tag::new(title);

    if rest.starts_with('{') {
        let brace_offset = block.offset + 1 + (text.len() - rest.len());
        let close = matching_brace(rest).ok_or(ParseError::UnterminatedType {
            offset: brace_offset,
        })?;
        tag.ty = Some(TypeExpression::new(rest[1..close].trim()));
        rest = rest[close + 1..].trim_start();
    }

    if TagKind::takes_name(title) && !rest.is_empty() {
        let (name, remainder) = split_name(rest);
        if !name.is_empty() {
            tag.name = Some(name);
        }
        rest = remainder.trim_start();
    }

    tag.description = non_empty(rest.to_string());
    Ok(tag)
}

/// Index of the `}` closing the `{` at position 0, honouring nesting
fn matching_brace(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    for (index, c) in text.char_indices() {
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}

/// Split a tag name from the text following it. `[name]` and
/// `[name=default]` mark optional parameters.
fn split_name(text: &str) -> (String, &str) {
    if let Some(inner) = text.strip_prefix('[') {
        if let Some(close) = inner.find(']') {
            let name = inner[..close]
                .split('=')
                .next()
                .unwrap_or_default()
                .trim()
                .to_string();
            return (name, &inner[close + 1..]);
        }
    }

    let end = text.find(char::is_whitespace).unwrap_or(text.len());
    (text[..end].to_string(), &text[end..])
}

fn non_empty(text: String) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
