//! Session-owned documentation index
//!
//! A [`DocSession`] is the context object a host drives: it receives the
//! source text of every parse pass, receives reset notifications, and
//! answers completion requests. Each session owns its own [`DocIndex`], so
//! several sessions can live in one process without sharing state.

use crate::Settings;
use crate::completion::{self, CompletionRecord, Gather, TokenSpan};
use crate::error::{IndexError, IndexResult};
use crate::indexing::stats::IndexStats;
use crate::indexing::walker::FileWalker;
use crate::parsing::{CommentParser, DocComment, JsDocParser, extract_comments};
use crate::storage::DocIndex;
use crate::symbol::{Normalized, normalize};
use parking_lot::RwLock;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// A session shared between threads. Parse passes take the write lock,
/// completion requests the read lock.
pub type SharedSession = Arc<RwLock<DocSession>>;

/// What one parse pass contributed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ParseOutcome {
    /// Block comments found in the source
    pub comments: usize,
    /// Definitions inserted, properties included
    pub definitions: usize,
    /// Comments dropped as private or unnamed
    pub dropped: usize,
    /// Malformed comments skipped (non-strict mode only)
    pub skipped: usize,
}

/// Comments of one source, parsed but not yet inserted
#[derive(Debug, Default)]
struct ParsedSource {
    docs: Vec<DocComment>,
    comments: usize,
    skipped: usize,
}

/// Extract and parse every comment of `text`.
///
/// In strict mode the first malformed comment fails the whole source and
/// nothing from it reaches the index. Otherwise it is skipped with a warning.
fn parse_source(
    parser: &dyn CommentParser,
    text: &str,
    strict: bool,
) -> IndexResult<ParsedSource> {
    let mut parsed = ParsedSource::default();

    for span in extract_comments(text) {
        parsed.comments += 1;
        match parser.parse(span.text) {
            Ok(doc) => parsed.docs.push(doc),
            Err(source) if strict => {
                return Err(IndexError::CommentParse {
                    offset: span.start,
                    source,
                });
            }
            Err(e) => {
                warn!(offset = span.start, error = %e, "skipping malformed doc comment");
                parsed.skipped += 1;
            }
        }
    }

    Ok(parsed)
}

pub struct DocSession {
    settings: Arc<Settings>,
    parser: Box<dyn CommentParser>,
    index: DocIndex,
}

impl DocSession {
    /// Session using the built-in JSDoc grammar
    pub fn new(settings: Arc<Settings>) -> Self {
        Self::with_parser(settings, Box::new(JsDocParser::new()))
    }

    /// Session using a host-provided comment grammar
    pub fn with_parser(settings: Arc<Settings>, parser: Box<dyn CommentParser>) -> Self {
        Self {
            settings,
            parser,
            index: DocIndex::new(),
        }
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn index(&self) -> &DocIndex {
        &self.index
    }

    /// Wrap the session for sharing between threads
    pub fn shared(self) -> SharedSession {
        Arc::new(RwLock::new(self))
    }

    /// Parse-pass hook: index every doc comment in `source`.
    ///
    /// A depth overflow aborts the pass; definitions inserted before it stay
    /// in the index.
    pub fn post_parse(&mut self, source: &str) -> IndexResult<ParseOutcome> {
        let parsed = parse_source(
            self.parser.as_ref(),
            source,
            self.settings.indexing.strict_comments,
        )?;
        self.apply(parsed)
    }

    /// Normalize parsed comments and insert them in source order
    fn apply(&mut self, parsed: ParsedSource) -> IndexResult<ParseOutcome> {
        let mut outcome = ParseOutcome {
            comments: parsed.comments,
            skipped: parsed.skipped,
            ..Default::default()
        };

        for doc in &parsed.docs {
            match normalize(doc) {
                Normalized::Dropped(reason) => {
                    debug!(?reason, "dropped doc comment");
                    outcome.dropped += 1;
                }
                Normalized::Definition(normalized) => {
                    self.index.insert(&normalized.path, normalized.definition)?;
                    outcome.definitions += 1;

                    for (path, definition) in normalized.properties {
                        self.index.insert(&path, definition)?;
                        outcome.definitions += 1;
                    }
                }
            }
        }

        Ok(outcome)
    }

    /// Read `path` and run a parse pass over its contents
    pub fn index_file(&mut self, path: &Path) -> IndexResult<ParseOutcome> {
        let source = read_source(path)?;
        self.post_parse(&source)
    }

    /// Index files and directories. Directories are walked with the
    /// configured extensions and ignore rules.
    ///
    /// Parsing may run on the rayon pool; insertion always happens on the
    /// calling thread in file order, so the result does not depend on
    /// scheduling. Per-file failures are recorded in the returned stats; a
    /// structural error such as a depth overflow aborts the run.
    pub fn index_paths(&mut self, paths: &[PathBuf]) -> IndexResult<IndexStats> {
        let mut stats = IndexStats::new();
        let files = self.collect_files(paths)?;
        info!(files = files.len(), "indexing doc comments");

        let strict = self.settings.indexing.strict_comments;
        let parser = self.parser.as_ref();
        let load = |path: &PathBuf| {
            read_source(path).and_then(|source| parse_source(parser, &source, strict))
        };

        let parsed: Vec<IndexResult<ParsedSource>> = if self.settings.indexing.parallel {
            files.par_iter().map(load).collect()
        } else {
            files.iter().map(load).collect()
        };

        for (path, result) in files.into_iter().zip(parsed) {
            match result.and_then(|parsed| self.apply(parsed)) {
                Ok(outcome) => {
                    stats.files_indexed += 1;
                    stats.comments_found += outcome.comments;
                    stats.definitions_indexed += outcome.definitions;
                    stats.definitions_dropped += outcome.dropped;
                    stats.comments_skipped += outcome.skipped;
                }
                Err(e) if e.is_structural() => return Err(e),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to index file");
                    stats.add_error(path, e.to_string());
                }
            }
        }

        stats.stop_timing();
        Ok(stats)
    }

    fn collect_files(&self, paths: &[PathBuf]) -> IndexResult<Vec<PathBuf>> {
        let walker = FileWalker::new(Arc::clone(&self.settings));
        let mut files = Vec::new();
        for path in paths {
            if path.is_dir() {
                let mut found: Vec<PathBuf> = walker.walk(path)?.collect();
                found.sort();
                files.extend(found);
            } else {
                files.push(path.clone());
            }
        }
        Ok(files)
    }

    /// Reset hook: discard the index and start from an empty one
    pub fn reset(&mut self) {
        self.index.reset();
    }

    /// Variable completion for the token at `start..end` of `buffer`
    pub fn variable_completion(
        &self,
        buffer: &str,
        start: usize,
        end: usize,
        gather: &mut dyn Gather,
    ) -> usize {
        let word = TokenSpan::new(start, end).text(buffer);
        completion::variable_completion(
            &self.index,
            word,
            self.settings.completion.max_results,
            gather,
        )
    }

    /// Member completion for the token at `start..end` of `buffer`
    pub fn member_completion(
        &self,
        buffer: &str,
        start: usize,
        end: usize,
        gather: &mut dyn Gather,
    ) -> usize {
        completion::member_completion(
            &self.index,
            buffer,
            TokenSpan::new(start, end),
            self.settings.completion.max_results,
            gather,
        )
    }

    /// Convenience wrapper collecting candidates into records
    pub fn complete(
        &self,
        buffer: &str,
        start: usize,
        end: usize,
        member: bool,
    ) -> Vec<CompletionRecord> {
        let mut records = Vec::new();
        if member {
            self.member_completion(buffer, start, end, &mut records);
        } else {
            self.variable_completion(buffer, start, end, &mut records);
        }
        records
    }
}

impl std::fmt::Debug for DocSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocSession")
            .field("paths", &self.index.len())
            .field("strict_comments", &self.settings.indexing.strict_comments)
            .finish_non_exhaustive()
    }
}

fn read_source(path: &Path) -> IndexResult<String> {
    std::fs::read_to_string(path).map_err(|source| IndexError::FileRead {
        path: path.to_path_buf(),
        source,
    })
}
