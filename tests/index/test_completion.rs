//! Completion requests against an indexed session

use docindex::completion::word_before;
use docindex::storage::DocIndex;
use docindex::{CompletionRecord, Definition, DocSession, Gather, NodeId, Settings};
use std::sync::Arc;

const GEOMETRY: &str = include_str!("../fixtures/jsdoc/geometry.js");

fn geometry_session() -> DocSession {
    let mut session = DocSession::new(Arc::new(Settings::default()));
    session.post_parse(GEOMETRY).unwrap();
    session
}

/// Complete at the end of `buffer` the way an editor host would
fn complete_at_end(session: &DocSession, buffer: &str, member: bool) -> Vec<CompletionRecord> {
    let token = word_before(buffer, buffer.len());
    session.complete(buffer, token.start, token.end, member)
}

fn names(records: &[CompletionRecord]) -> Vec<&str> {
    records.iter().map(|record| record.name.as_str()).collect()
}

#[test]
fn test_member_completion_after_dot() {
    let session = geometry_session();
    let records = complete_at_end(&session, "const p = geo.Point.", true);

    assert_eq!(names(&records), vec!["x", "y"]);
    assert_eq!(records[0].ty.as_deref(), Some("number"));
    assert_eq!(records[0].doc.as_deref(), Some("Horizontal position"));
    assert!(records.iter().all(|record| !record.guess));
}

#[test]
fn test_member_completion_partial_word() {
    let session = geometry_session();
    let records = complete_at_end(&session, "geo.di", true);

    assert_eq!(names(&records), vec!["distance"]);
    assert_eq!(
        records[0].ty.as_deref(),
        Some("fn(a: +geo.Point, b: +geo.Point) -> number")
    );
}

#[test]
fn test_member_prefix_is_not_word_bounded() {
    // `geo.` matches every path under geo, nested ones included
    let session = geometry_session();
    let records = complete_at_end(&session, "geo.", true);

    assert_eq!(
        names(&records),
        vec!["Point", "x", "y", "distance", "origin", "scale"]
    );
}

#[test]
fn test_member_completion_stops_at_whitespace() {
    let session = geometry_session();
    // The dot is separated from `geo` by a space, so only `x` is looked up
    let records = complete_at_end(&session, "geo .x", true);
    assert!(records.is_empty());
}

#[test]
fn test_variable_completion() {
    let session = geometry_session();

    let records = complete_at_end(&session, "let g = ge", false);
    assert_eq!(names(&records), vec!["geo"]);
    assert_eq!(records[0].doc.as_deref(), Some("Geometry helpers"));

    assert!(complete_at_end(&session, "zz", false).is_empty());
}

#[test]
fn test_empty_session_never_fails() {
    let session = DocSession::new(Arc::new(Settings::default()));

    assert!(complete_at_end(&session, "", false).is_empty());
    assert!(complete_at_end(&session, "a.b.", true).is_empty());
    assert!(session.complete("", 10, 20, true).is_empty());
}

#[test]
fn test_prefix_correctness() {
    let mut index = DocIndex::new();
    for path in ["a.b", "a.bc", "ab.c"] {
        index.insert(path, Definition::new().with_type("number")).unwrap();
    }

    let hits: Vec<&str> = index
        .lookup_prefix("a.b", 100)
        .iter()
        .map(|hit| hit.path)
        .collect();
    assert_eq!(hits, vec!["a.b", "a.bc"]);
}

#[test]
fn test_gather_receives_populated_records() {
    #[derive(Default)]
    struct Counting {
        documented: usize,
        seen: Vec<(String, Option<NodeId>, usize)>,
    }

    impl Gather for Counting {
        fn gather(
            &mut self,
            name: &str,
            owner: Option<NodeId>,
            depth: usize,
            populate: &mut dyn FnMut(&mut CompletionRecord),
        ) {
            let mut record = CompletionRecord {
                name: name.to_string(),
                guess: true,
                ..Default::default()
            };
            populate(&mut record);
            if !record.guess {
                self.documented += 1;
            }
            self.seen.push((name.to_string(), owner, depth));
        }
    }

    let session = geometry_session();
    let buffer = "geo.Point.";
    let mut gather = Counting::default();
    let offered = session.member_completion(buffer, buffer.len(), buffer.len(), &mut gather);

    assert_eq!(offered, 2);
    assert_eq!(gather.documented, 2);
    assert_eq!(
        gather.seen,
        vec![("x".to_string(), None, 0), ("y".to_string(), None, 0)]
    );
}

#[test]
fn test_completion_after_reset() {
    let mut session = geometry_session();
    session.reset();

    assert!(complete_at_end(&session, "geo.", true).is_empty());
    assert!(complete_at_end(&session, "g", false).is_empty());
}

#[test]
fn test_records_serialize_for_hosts() {
    let session = geometry_session();
    let records = complete_at_end(&session, "geo.or", true);
    let json = serde_json::to_value(&records).unwrap();

    assert_eq!(json[0]["name"], "origin");
    assert_eq!(json[0]["type"], "+geo.Point");
    assert_eq!(json[0]["guess"], false);
}
