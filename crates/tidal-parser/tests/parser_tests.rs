//! Integration tests for the tidal parser.
//!
//! Covers: objects over literals and variables, filter chains and their
//! argument grammar, if/endif nesting and the silent close at end of
//! input, whitespace handling in both lexing modes, and error cases.

use tidal_lexer::{tokenize, tokenize_with_whitespace};
use tidal_parser::{parse, ParseError};
use tidal_types::ast::{FilterSpec, Node, Root};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn parse_source(source: &str) -> Root {
    parse(tokenize(source).expect("lexing should succeed")).expect("parsing should succeed")
}

fn parse_err(source: &str) -> ParseError {
    parse(tokenize(source).expect("lexing should succeed")).expect_err("parsing should fail")
}

fn object(child: Node) -> Node {
    Node::Object(Box::new(child))
}

fn variable(name: &str, filters: Vec<FilterSpec>) -> Node {
    Node::Variable {
        name: name.into(),
        filters,
    }
}

// ─────────────────────────────────────────────────────────────────────
// Text and objects
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_plain_text() {
    let root = parse_source("hello world");
    assert_eq!(root.nodes, vec![Node::Text("hello world".into())]);
}

#[test]
fn test_string_literal_object() {
    let root = parse_source("{{ \"x\" }}");
    assert_eq!(root.nodes, vec![object(Node::StringLit("x".into()))]);
}

#[test]
fn test_number_literal_object() {
    let root = parse_source("{{ 42 }}");
    assert_eq!(root.nodes, vec![object(Node::NumberLit(42.0))]);
}

#[test]
fn test_keyword_literal_objects() {
    assert_eq!(
        parse_source("{{ true }}").nodes,
        vec![object(Node::BoolLit(true))]
    );
    assert_eq!(
        parse_source("{{ false }}").nodes,
        vec![object(Node::BoolLit(false))]
    );
    assert_eq!(parse_source("{{ nil }}").nodes, vec![object(Node::NilLit)]);
    assert_eq!(parse_source("{{ null }}").nodes, vec![object(Node::NilLit)]);
}

#[test]
fn test_other_keyword_is_opaque_string() {
    let root = parse_source("{{ empty }}");
    assert_eq!(root.nodes, vec![object(Node::StringLit("empty".into()))]);
}

#[test]
fn test_variable_object() {
    let root = parse_source("{{ name }}");
    assert_eq!(root.nodes, vec![object(variable("name", vec![]))]);
}

#[test]
fn test_text_around_objects() {
    let root = parse_source("a {{ x }} b");
    assert_eq!(
        root.nodes,
        vec![
            Node::Text("a ".into()),
            object(variable("x", vec![])),
            Node::Text(" b".into()),
        ]
    );
}

// ─────────────────────────────────────────────────────────────────────
// Filter chains
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_single_filter_no_args() {
    let root = parse_source("{{ name | upcase }}");
    assert_eq!(
        root.nodes,
        vec![object(variable(
            "name",
            vec![FilterSpec::new("upcase", vec![])]
        ))]
    );
}

#[test]
fn test_filter_chain_preserves_order() {
    let root = parse_source("{{ name | upcase | downcase }}");
    assert_eq!(
        root.nodes,
        vec![object(variable(
            "name",
            vec![
                FilterSpec::new("upcase", vec![]),
                FilterSpec::new("downcase", vec![]),
            ]
        ))]
    );
}

#[test]
fn test_filter_arguments() {
    let root = parse_source("{{ v | append:\"x\",123 }}");
    assert_eq!(
        root.nodes,
        vec![object(variable(
            "v",
            vec![FilterSpec::new(
                "append",
                vec![Node::StringLit("x".into()), Node::NumberLit(123.0)]
            )]
        ))]
    );
}

#[test]
fn test_filter_keyword_literal_arguments() {
    let root = parse_source("{{ v | default:nil,true }}");
    assert_eq!(
        root.nodes,
        vec![object(variable(
            "v",
            vec![FilterSpec::new(
                "default",
                vec![Node::NilLit, Node::BoolLit(true)]
            )]
        ))]
    );
}

#[test]
fn test_filter_bare_ident_argument_is_string() {
    // A bare identifier where a literal is expected is an opaque string,
    // not a variable lookup.
    let root = parse_source("{{ v | append:other }}");
    assert_eq!(
        root.nodes,
        vec![object(variable(
            "v",
            vec![FilterSpec::new(
                "append",
                vec![Node::StringLit("other".into())]
            )]
        ))]
    );
}

#[test]
fn test_filter_name_may_be_reserved_word() {
    let root = parse_source("{{ items | first }}");
    assert_eq!(
        root.nodes,
        vec![object(variable(
            "items",
            vec![FilterSpec::new("first", vec![])]
        ))]
    );
}

// ─────────────────────────────────────────────────────────────────────
// If tags
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_if_with_text_body() {
    let root = parse_source("{% if show %}yes{% endif %}");
    assert_eq!(
        root.nodes,
        vec![Node::If {
            condition: "show".into(),
            body: vec![Node::Text("yes".into())],
        }]
    );
}

#[test]
fn test_if_body_recurses_into_objects() {
    let root = parse_source("{% if show %}hi {{ name }}{% endif %}");
    assert_eq!(
        root.nodes,
        vec![Node::If {
            condition: "show".into(),
            body: vec![Node::Text("hi ".into()), object(variable("name", vec![]))],
        }]
    );
}

#[test]
fn test_nested_if() {
    let root = parse_source("{% if a %}x{% if b %}y{% endif %}z{% endif %}");
    assert_eq!(
        root.nodes,
        vec![Node::If {
            condition: "a".into(),
            body: vec![
                Node::Text("x".into()),
                Node::If {
                    condition: "b".into(),
                    body: vec![Node::Text("y".into())],
                },
                Node::Text("z".into()),
            ],
        }]
    );
}

#[test]
fn test_unterminated_if_closes_at_eof() {
    let root = parse_source("{% if a %}tail text");
    assert_eq!(
        root.nodes,
        vec![Node::If {
            condition: "a".into(),
            body: vec![Node::Text("tail text".into())],
        }]
    );
}

#[test]
fn test_content_after_endif_is_top_level() {
    let root = parse_source("{% if a %}x{% endif %}y");
    assert_eq!(
        root.nodes,
        vec![
            Node::If {
                condition: "a".into(),
                body: vec![Node::Text("x".into())],
            },
            Node::Text("y".into()),
        ]
    );
}

// ─────────────────────────────────────────────────────────────────────
// Whitespace handling
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_reported_whitespace_parses_to_same_tree_for_values() {
    let source = "{{ name | append:\"!\" }}";
    let suppressed = parse(tokenize(source).unwrap()).unwrap();
    let reported = parse(tokenize_with_whitespace(source).unwrap()).unwrap();
    assert_eq!(suppressed, reported);
}

#[test]
fn test_reported_whitespace_endif_still_matches() {
    let source = "{% if a %}x{% endif %}";
    let reported = parse(tokenize_with_whitespace(source).unwrap()).unwrap();
    assert_eq!(
        reported.nodes,
        vec![Node::If {
            condition: "a".into(),
            body: vec![Node::Text("x".into())],
        }]
    );
}

// ─────────────────────────────────────────────────────────────────────
// Errors
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_unsupported_tag_names_the_keyword() {
    match parse_err("{% bogus %}") {
        ParseError::UnsupportedTag { keyword, .. } => assert_eq!(keyword, "bogus"),
        other => panic!("expected UnsupportedTag, got {other:?}"),
    }
}

#[test]
fn test_unsupported_reserved_tag_is_still_named() {
    match parse_err("{% for x %}") {
        ParseError::UnsupportedTag { keyword, .. } => assert_eq!(keyword, "for"),
        other => panic!("expected UnsupportedTag, got {other:?}"),
    }
}

#[test]
fn test_missing_object_close() {
    match parse_err("{{ name {{") {
        ParseError::Unexpected { expected, found, .. } => {
            assert_eq!(expected, "'}}'");
            assert_eq!(found, "{{");
        }
        other => panic!("expected Unexpected, got {other:?}"),
    }
}

#[test]
fn test_empty_object_is_an_error() {
    match parse_err("{{ }}") {
        ParseError::Unexpected { expected, .. } => {
            assert_eq!(expected, "a literal or variable");
        }
        other => panic!("expected Unexpected, got {other:?}"),
    }
}

#[test]
fn test_literal_object_takes_no_filters() {
    match parse_err("{{ \"x\" | upcase }}") {
        ParseError::Unexpected { expected, found, .. } => {
            assert_eq!(expected, "'}}'");
            assert_eq!(found, "|");
        }
        other => panic!("expected Unexpected, got {other:?}"),
    }
}

#[test]
fn test_if_requires_condition_variable() {
    match parse_err("{% if %}x{% endif %}") {
        ParseError::Unexpected { expected, .. } => {
            assert_eq!(expected, "a condition variable");
        }
        other => panic!("expected Unexpected, got {other:?}"),
    }
}

#[test]
fn test_filter_argument_must_be_literal() {
    match parse_err("{{ v | append: }}") {
        ParseError::Unexpected { expected, .. } => {
            assert_eq!(expected, "a literal");
        }
        other => panic!("expected Unexpected, got {other:?}"),
    }
}
