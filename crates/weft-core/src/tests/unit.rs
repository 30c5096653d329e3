//! Unit tests for weft-core.

use rstest::rstest;

use crate::{
    ClassMode, CompileOptions, CompiledNode, HighlightEvent, HighlightMapping, compile,
    compile_with, concatenate, normalize, trim_trailing_newline,
};

// =============================================================================
// Pipeline Tests
// =============================================================================

/// Builds an event stream that leaves every byte of `text` unhighlighted,
/// with the final newline as its own span.
fn plain_events(text: &str) -> Vec<HighlightEvent> {
    match text.strip_suffix('\n') {
        Some(body) if !body.is_empty() => vec![
            HighlightEvent::source(0, body.len()),
            HighlightEvent::source(body.len(), text.len()),
        ],
        _ => vec![HighlightEvent::source(0, text.len())],
    }
}

#[rstest]
#[case("\n    fn main() {}\n")]
#[case("  let a = 1;\n    let b = 2;\n")]
#[case("x")]
#[case("\t\tprint('ü')\n")]
fn pipeline_reproduces_normalized_text_without_final_newline(#[case] raw: &str) {
    let source = normalize(raw);
    let nodes = compile(&plain_events(source.text()), source.text()).expect("compile");

    let trimmed = trim_trailing_newline(nodes);

    let expected = source.text().strip_suffix('\n').unwrap_or(source.text());
    assert_eq!(concatenate(&trimmed), expected);
}

#[test]
fn blank_code_compiles_to_no_nodes() {
    let source = normalize("\n   \n");

    let nodes = compile(&[], source.text()).expect("compile");

    assert!(trim_trailing_newline(nodes).is_empty());
}

#[test]
fn every_span_is_a_single_leaf() {
    let text = "a\nb\n";
    let events = [
        HighlightEvent::start("comment"),
        HighlightEvent::source(0, 3),
        HighlightEvent::End,
        HighlightEvent::source(3, 4),
    ];

    let nodes = compile(&events, text).expect("compile");

    assert_eq!(nodes.len(), 2);
    assert!(
        nodes
            .iter()
            .all(|node| matches!(node, CompiledNode::Span { .. }))
    );
}

// =============================================================================
// Options Tests
// =============================================================================

#[rstest]
#[case(ClassMode::Innermost, &["type"])]
#[case(ClassMode::Nested, &["function", "type"])]
fn class_mode_controls_rendered_classes(#[case] mode: ClassMode, #[case] expected: &[&str]) {
    let options = CompileOptions {
        class_mode: mode,
        mapping: HighlightMapping::new(),
    };
    let events = [
        HighlightEvent::start("function"),
        HighlightEvent::start("type"),
        HighlightEvent::source(0, 3),
        HighlightEvent::End,
        HighlightEvent::End,
    ];

    let nodes = compile_with(&events, "Vec", &options).expect("compile");

    let classes: Vec<&str> = nodes
        .first()
        .map(|node| node.classes().iter().map(String::as_str).collect())
        .unwrap_or_default();
    assert_eq!(classes, expected);
}

#[test]
fn mapping_falls_back_to_the_highlight_name() {
    let mut mapping = HighlightMapping::new();
    mapping.insert("keyword", "hl-keyword");

    assert_eq!(mapping.class_for("keyword"), "hl-keyword");
    assert_eq!(mapping.class_for("string"), "string");
    assert!(!mapping.is_empty());
}

#[test]
fn default_options_render_the_innermost_tag() {
    let options = CompileOptions::default();

    assert_eq!(options.class_mode, ClassMode::Innermost);
    assert!(options.mapping.is_empty());
}
