pub mod session;
pub mod stats;
pub mod walker;

pub use session::{DocSession, ParseOutcome, SharedSession};
pub use stats::IndexStats;
pub use walker::{FileWalker, IGNORE_FILENAME};
