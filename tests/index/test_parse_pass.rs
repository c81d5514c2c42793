//! Full parse passes over documented sources
//!
//! Exercises extraction, the JSDoc grammar, normalization and insertion
//! together through the session hook.

use docindex::{DocSession, NodeKind, Settings};
use std::sync::Arc;

const GEOMETRY: &str = include_str!("../fixtures/jsdoc/geometry.js");

fn parsed(source: &str) -> DocSession {
    let mut session = DocSession::new(Arc::new(Settings::default()));
    session.post_parse(source).unwrap();
    session
}

#[test]
fn test_geometry_fixture_outcome() {
    let mut session = DocSession::new(Arc::new(Settings::default()));
    let outcome = session.post_parse(GEOMETRY).unwrap();

    assert_eq!(outcome.comments, 6);
    assert_eq!(outcome.dropped, 1);
    assert_eq!(outcome.definitions, 7);
    assert_eq!(outcome.skipped, 0);

    let paths: Vec<&str> = session.index().flat().paths().collect();
    assert_eq!(
        paths,
        vec![
            "geo",
            "geo.Point",
            "geo.Point.x",
            "geo.Point.y",
            "geo.distance",
            "geo.origin",
            "geo.scale",
        ]
    );
}

#[test]
fn test_synthesized_types() {
    let session = parsed(GEOMETRY);
    let index = session.index();

    let cases = [
        ("geo.Point", "+geo.Point"),
        ("geo.Point.x", "number"),
        ("geo.distance", "fn(a: +geo.Point, b: +geo.Point) -> number"),
        ("geo.origin", "+geo.Point"),
        // Nested option params are left out, a bare @returns defaults to ?
        ("geo.scale", "fn(options: {}) -> ?"),
    ];

    for (path, expected) in cases {
        let definition = index
            .lookup(path)
            .unwrap_or_else(|| panic!("'{path}' should be indexed"));
        assert_eq!(
            definition.ty.as_deref(),
            Some(expected),
            "type of '{path}'"
        );
    }

    assert!(index.lookup("geo").unwrap().ty.is_none());
}

#[test]
fn test_names_and_docs() {
    let session = parsed(GEOMETRY);
    let index = session.index();

    let geo = index.lookup("geo").unwrap();
    assert_eq!(geo.name(), "geo");
    assert_eq!(geo.doc.as_deref(), Some("Geometry helpers"));

    let x = index.lookup("geo.Point.x").unwrap();
    assert_eq!(x.name(), "x");
    assert_eq!(x.doc.as_deref(), Some("Horizontal position"));

    assert_eq!(index.lookup("geo.distance").unwrap().name(), "distance");
    assert!(index.lookup("geo.scale").unwrap().doc.is_none());
}

#[test]
fn test_private_definitions_absent_everywhere() {
    let session = parsed(GEOMETRY);
    let index = session.index();

    assert!(index.lookup("geo.cache").is_none());
    assert!(index.flat().paths().all(|path| !path.contains("cache")));
    assert!(index.lookup_prefix("geo.c", 100).is_empty());
    assert!(index.to_json()["geo"].get("cache").is_none());
}

#[test]
fn test_node_kinds() {
    let session = parsed(GEOMETRY);
    let tree = session.index().tree();

    let kind_of = |path: &[&str]| tree.node(tree.resolve(path).unwrap()).unwrap().kind();
    assert_eq!(kind_of(&["geo"]), NodeKind::DefinitionWithChildren);
    assert_eq!(kind_of(&["geo", "Point"]), NodeKind::DefinitionWithChildren);
    assert_eq!(kind_of(&["geo", "origin"]), NodeKind::Definition);
}

#[test]
fn test_placeholder_filled_by_later_comment() {
    let source = "/** @var {number} app.count */\n\
                  /**\n * Application root\n * @namespace app\n */";
    let session = parsed(source);
    let index = session.index();

    assert_eq!(index.lookup("app").unwrap().doc.as_deref(), Some("Application root"));
    assert_eq!(index.lookup("app.count").unwrap().ty.as_deref(), Some("number"));
}

#[test]
fn test_arrival_order_does_not_matter() {
    let typed = "/** @var {number} app.count */";
    let documented = "/**\n * How many\n * @var app.count\n */";

    let forward = parsed(&format!("{typed}\n{documented}"));
    let backward = parsed(&format!("{documented}\n{typed}"));

    assert_eq!(
        forward.index().lookup("app.count"),
        backward.index().lookup("app.count")
    );
    assert_eq!(forward.index().to_json(), backward.index().to_json());
}

#[test]
fn test_property_named_with_owner_kept_verbatim() {
    let source = "/**\n * @namespace util\n * @property {string} util.version\n */";
    let session = parsed(source);

    assert_eq!(
        session.index().lookup("util.version").unwrap().ty.as_deref(),
        Some("string")
    );
    assert!(session.index().lookup("util.util").is_none());
}

#[test]
fn test_builtins_are_case_insensitive() {
    let source = "/**\n * @function fmt\n * @param {Number} width\n * @param {Function} cb\n * @return {String}\n */";
    let session = parsed(source);

    assert_eq!(
        session.index().lookup("fmt").unwrap().ty.as_deref(),
        Some("fn(width: number, cb: fn()) -> string")
    );
}

#[test]
fn test_unnamed_comments_are_dropped() {
    let source = "/* licence header */\n/**\n * Just prose\n * @see other\n */";
    let mut session = DocSession::new(Arc::new(Settings::default()));
    let outcome = session.post_parse(source).unwrap();

    assert_eq!(outcome.comments, 2);
    assert_eq!(outcome.dropped, 2);
    assert!(session.index().is_empty());
}

#[test]
fn test_nameless_method_tag_clears_var_name() {
    let session = parsed("/**\n * @var {number} foo\n * @method\n */");

    assert!(session.index().lookup("foo").is_none());
    assert!(session.index().is_empty());
}

#[test]
fn test_json_export_shape() {
    let session = parsed(GEOMETRY);
    let json = session.index().to_json();

    assert_eq!(json["geo"]["!doc"], "Geometry helpers");
    assert_eq!(json["geo"]["Point"]["x"]["!type"], "number");
    assert_eq!(json["geo"]["distance"]["!name"], "distance");

    // Children keep insertion order
    let keys: Vec<&String> = json["geo"].as_object().unwrap().keys().collect();
    assert_eq!(
        keys,
        vec!["!name", "!doc", "Point", "distance", "origin", "scale"]
    );
}
