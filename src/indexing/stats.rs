//! Statistics for indexing runs

use std::path::PathBuf;
use std::time::{Duration, Instant};

/// Errors kept for display
const MAX_RECORDED_ERRORS: usize = 100;

/// Statistics collected during indexing
#[derive(Debug, Default)]
pub struct IndexStats {
    /// Number of files successfully indexed
    pub files_indexed: usize,

    /// Number of files that failed to index
    pub files_failed: usize,

    /// Block comments seen
    pub comments_found: usize,

    /// Definitions inserted (owners and their properties)
    pub definitions_indexed: usize,

    /// Comments dropped as private or unnamed
    pub definitions_dropped: usize,

    /// Malformed comments skipped in non-strict mode
    pub comments_skipped: usize,

    /// Time elapsed during indexing
    pub elapsed: Duration,

    /// Errors encountered (limited to first N errors)
    pub errors: Vec<(PathBuf, String)>,

    /// Start time of indexing
    start_time: Option<Instant>,
}

impl IndexStats {
    /// Create new stats and start timing
    pub fn new() -> Self {
        Self {
            start_time: Some(Instant::now()),
            ..Default::default()
        }
    }

    /// Stop timing and record elapsed time
    pub fn stop_timing(&mut self) {
        if let Some(start) = self.start_time {
            self.elapsed = start.elapsed();
            self.start_time = None;
        }
    }

    /// Add an error (limited to first 100 errors)
    pub fn add_error(&mut self, path: PathBuf, error: String) {
        if self.errors.len() < MAX_RECORDED_ERRORS {
            self.errors.push((path, error));
        }
        self.files_failed += 1;
    }

    /// Display the statistics in a human-readable format
    pub fn display(&self) {
        println!("\nIndexing Complete:");
        println!("  Files indexed: {}", self.files_indexed);
        println!("  Files failed: {}", self.files_failed);
        println!("  Comments found: {}", self.comments_found);
        println!("  Definitions indexed: {}", self.definitions_indexed);
        println!("  Definitions dropped: {}", self.definitions_dropped);
        if self.comments_skipped > 0 {
            println!("  Malformed comments skipped: {}", self.comments_skipped);
        }
        println!("  Time elapsed: {:.2}s", self.elapsed.as_secs_f64());

        if !self.errors.is_empty() {
            println!("\nErrors (showing first {}):", self.errors.len().min(5));
            for (path, error) in &self.errors[..5.min(self.errors.len())] {
                println!("  {}: {}", path.display(), error);
            }
            if self.errors.len() > 5 {
                println!("  ... and {} more errors", self.errors.len() - 5);
            }
        }
    }
}
