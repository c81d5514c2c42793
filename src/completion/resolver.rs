//! Completion resolvers
//!
//! Two lookups over a [`DocIndex`]:
//! - variable completion matches the cursor token against top-level symbols
//! - member completion reconstructs the dotted expression in front of the
//!   cursor and prefix-matches it against the flat path index
//!
//! Candidates are reported through the host's [`Gather`] callback. Every
//! candidate produced here is backed by a doc comment, so `guess` is always
//! `false`.

use crate::completion::cursor::{TokenSpan, dotted_key, expand_leftward};
use crate::storage::{DocIndex, NodeId};
use crate::symbol::Definition;
use serde::Serialize;
use tracing::debug;

/// Candidate record the host asks us to populate
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompletionRecord {
    pub name: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub ty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
    /// Inferred by the host rather than documented
    pub guess: bool,
}

impl CompletionRecord {
    fn fill_from(&mut self, definition: Option<&Definition>) {
        self.ty = definition.and_then(|def| def.ty.clone());
        self.doc = definition.and_then(|def| def.doc.clone());
        self.guess = false;
    }
}

/// The host's completion-gathering callback
pub trait Gather {
    /// Offer one candidate. `populate` annotates the record the host
    /// creates for it.
    fn gather(
        &mut self,
        name: &str,
        owner: Option<NodeId>,
        depth: usize,
        populate: &mut dyn FnMut(&mut CompletionRecord),
    );
}

/// Collects every candidate into the vector
impl Gather for Vec<CompletionRecord> {
    fn gather(
        &mut self,
        name: &str,
        _owner: Option<NodeId>,
        _depth: usize,
        populate: &mut dyn FnMut(&mut CompletionRecord),
    ) {
        let mut record = CompletionRecord {
            name: name.to_string(),
            ..Default::default()
        };
        populate(&mut record);
        self.push(record);
    }
}

/// Offer every top-level symbol starting with `word` (all of them when
/// `word` is empty), in insertion order, at most `limit`. Returns the
/// number of candidates offered.
pub fn variable_completion(
    index: &DocIndex,
    word: &str,
    limit: usize,
    gather: &mut dyn Gather,
) -> usize {
    let mut offered = 0;
    for (key, _, definition) in index
        .top_level()
        .filter(|(key, _, _)| word.is_empty() || key.starts_with(word))
        .take(limit)
    {
        gather.gather(key, None, 0, &mut |record: &mut CompletionRecord| {
            record.fill_from(definition)
        });
        offered += 1;
    }
    debug!(word, offered, "variable completion");
    offered
}

/// Offer documented members matching the dotted expression that ends with
/// `token`. Returns the number of candidates offered.
pub fn member_completion(
    index: &DocIndex,
    buffer: &str,
    token: TokenSpan,
    limit: usize,
    gather: &mut dyn Gather,
) -> usize {
    let tokens = expand_leftward(buffer, token.start, token.end);
    let key = dotted_key(buffer, &tokens);

    let matches = index.lookup_prefix(&key, limit);
    for hit in &matches {
        let definition = hit.definition;
        gather.gather(definition.name(), None, 0, &mut |record: &mut CompletionRecord| {
            record.fill_from(Some(definition))
        });
    }
    debug!(key = %key, offered = matches.len(), "member completion");
    matches.len()
}
