//! Indexing files and directories from disk

use docindex::{DocSession, IndexError, Settings};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, contents: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, contents).unwrap();
    path
}

fn session_with(configure: impl FnOnce(&mut Settings)) -> DocSession {
    let mut settings = Settings::default();
    configure(&mut settings);
    DocSession::new(Arc::new(settings))
}

#[test]
fn test_index_directory_respects_extensions_and_ignores() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write(root, "src/a.js", "/** @var {number} alpha */");
    write(root, "src/b.ts", "/** @var {string} beta */");
    write(root, "src/notes.md", "/** @var {string} notes */");
    write(root, "node_modules/dep/index.js", "/** @var {string} dep */");

    let mut session = session_with(|_| {});
    let stats = session.index_paths(&[root.to_path_buf()]).unwrap();

    assert_eq!(stats.files_indexed, 2);
    assert_eq!(stats.files_failed, 0);
    assert_eq!(stats.definitions_indexed, 2);

    let index = session.index();
    assert!(index.lookup("alpha").is_some());
    assert!(index.lookup("beta").is_some());
    assert!(index.lookup("notes").is_none());
    assert!(index.lookup("dep").is_none());
}

#[test]
fn test_later_file_merges_into_tree_and_collides_in_flat_index() {
    for parallel in [true, false] {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        write(root, "a.js", "/** @var {number} shared */");
        write(root, "b.js", "/**\n * Shared value\n * @var {string} shared\n */");

        let mut session = session_with(|settings| settings.indexing.parallel = parallel);
        session.index_paths(&[root.to_path_buf()]).unwrap();

        let index = session.index();
        assert_eq!(index.collisions(), 1, "parallel = {parallel}");
        assert_eq!(index.len(), 1);

        // Both views agree: the flat entry points at the merged node
        let merged = index.lookup("shared").unwrap();
        assert_eq!(merged.ty.as_deref(), Some("string"));
        assert_eq!(merged.doc.as_deref(), Some("Shared value"));

        let hits = index.lookup_prefix("sha", 100);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].definition, merged);
    }
}

#[test]
fn test_malformed_file_fails_alone_in_strict_mode() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write(root, "good.js", "/** @var {number} good */");
    let bad = write(root, "bad.js", "/** @var {number} early */\n/** @var {oops late */");

    let mut session = session_with(|_| {});
    let stats = session.index_paths(&[root.to_path_buf()]).unwrap();

    assert_eq!(stats.files_indexed, 1);
    assert_eq!(stats.files_failed, 1);
    assert_eq!(stats.errors.len(), 1);
    assert_eq!(stats.errors[0].0, bad);

    assert!(session.index().lookup("good").is_some());
    assert!(session.index().lookup("early").is_none());
}

#[test]
fn test_depth_overflow_aborts_the_run() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    write(root, "a.js", "/** @var {number} a.b.c.d.e.f.g.h.i.j.k */");
    write(root, "b.js", "/** @var {number} fine */");

    let mut session = session_with(|_| {});
    let err = session.index_paths(&[root.to_path_buf()]).unwrap_err();

    assert!(err.is_structural());
    assert!(matches!(err, IndexError::DepthExceeded { depth: 11, max: 10, .. }));
    assert!(session.index().lookup("fine").is_none());
}

#[test]
fn test_malformed_comment_skipped_when_lenient() {
    let temp_dir = TempDir::new().unwrap();
    let path = write(
        temp_dir.path(),
        "mixed.js",
        "/** @var {number} early */\n/** @var {oops late */",
    );

    let mut session = session_with(|settings| settings.indexing.strict_comments = false);
    let outcome = session.index_file(&path).unwrap();

    assert_eq!(outcome.comments, 2);
    assert_eq!(outcome.skipped, 1);
    assert!(session.index().lookup("early").is_some());
}

#[test]
fn test_explicit_file_paths_bypass_extension_filter() {
    let temp_dir = TempDir::new().unwrap();
    let path = write(temp_dir.path(), "types.jsdoc", "/** @typedef {Object} Config */");

    let mut session = session_with(|_| {});
    let stats = session.index_paths(&[path]).unwrap();

    assert_eq!(stats.files_indexed, 1);
    assert_eq!(
        session.index().lookup("Config").unwrap().ty.as_deref(),
        Some("+Config")
    );
}

#[test]
fn test_missing_file_is_read_error() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("missing.js");

    let mut session = session_with(|_| {});
    let err = session.index_file(&missing).unwrap_err();

    assert!(matches!(err, IndexError::FileRead { .. }));
    assert_eq!(err.status_code(), "FILE_READ_ERROR");
}

#[test]
fn test_reset_between_runs() {
    let temp_dir = TempDir::new().unwrap();
    let first = write(temp_dir.path(), "first.js", "/** @var {number} first */");
    let second = write(temp_dir.path(), "second.js", "/** @var {number} second */");

    let mut session = session_with(|_| {});
    session.index_file(&first).unwrap();
    session.reset();
    session.index_file(&second).unwrap();

    let paths: Vec<&str> = session.index().flat().paths().collect();
    assert_eq!(paths, vec!["second"]);
}

#[test]
fn test_settings_file_drives_session() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = write(
        temp_dir.path(),
        ".docindex/settings.toml",
        "[indexing]\nextensions = [\"mjs\"]\n\n[completion]\nmax_results = 1\n",
    );
    write(temp_dir.path(), "src/a.mjs", "/** @var {number} a.one */\n/** @var {number} a.two */");
    write(temp_dir.path(), "src/b.js", "/** @var {number} b */");

    let settings = Settings::load_from(&config_path).unwrap();
    let mut session = DocSession::new(Arc::new(settings));
    session
        .index_paths(&[temp_dir.path().join("src")])
        .unwrap();

    assert!(session.index().lookup("b").is_none());
    assert_eq!(session.complete("a.", 2, 2, true).len(), 1);
}
