//! File system walker for discovering source files to index
//!
//! This module provides directory traversal with support for:
//! - .gitignore rules
//! - `.docindexignore` files
//! - Ignore patterns from configuration
//! - Extension filtering

use crate::Settings;
use crate::error::{IndexError, IndexResult};
use ignore::WalkBuilder;
use ignore::overrides::{Override, OverrideBuilder};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Per-directory ignore file, same syntax as .gitignore
pub const IGNORE_FILENAME: &str = ".docindexignore";

/// Walks directories to find source files to index
#[derive(Debug)]
pub struct FileWalker {
    settings: Arc<Settings>,
}

impl FileWalker {
    /// Create a new file walker with the given settings
    pub fn new(settings: Arc<Settings>) -> Self {
        Self { settings }
    }

    /// Walk a directory and return the files to index
    pub fn walk(&self, root: &Path) -> IndexResult<impl Iterator<Item = PathBuf> + use<>> {
        let mut builder = WalkBuilder::new(root);

        builder
            .hidden(true) // Skip hidden files and directories
            .git_ignore(true)
            .git_global(true)
            .git_exclude(true)
            .follow_links(false)
            .require_git(false) // Allow gitignore to work in non-git directories
            .overrides(self.overrides(root)?);

        builder.add_custom_ignore_filename(IGNORE_FILENAME);

        let extensions = self.settings.indexing.extensions.clone();

        Ok(builder
            .build()
            .filter_map(Result::ok) // Skip files we can't access
            .filter(|entry| entry.file_type().is_some_and(|ft| ft.is_file()))
            .filter_map(move |entry| {
                let path = entry.path();
                let ext = path.extension()?.to_str()?;
                extensions
                    .iter()
                    .any(|enabled| enabled == ext)
                    .then(|| path.to_path_buf())
            }))
    }

    /// Configured ignore patterns as negated override globs
    fn overrides(&self, root: &Path) -> IndexResult<Override> {
        let mut overrides = OverrideBuilder::new(root);
        for pattern in &self.settings.indexing.ignore_patterns {
            overrides
                .add(&format!("!{pattern}"))
                .map_err(|e| IndexError::ConfigError {
                    reason: format!("invalid ignore pattern '{pattern}': {e}"),
                })?;
        }
        overrides.build().map_err(|e| IndexError::ConfigError {
            reason: format!("failed to build ignore patterns: {e}"),
        })
    }

    /// Count files that would be indexed (useful for dry runs)
    pub fn count_files(&self, root: &Path) -> IndexResult<usize> {
        Ok(self.walk(root)?.count())
    }
}
