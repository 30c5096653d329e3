//! Behaviour-driven development (BDD) step definitions for weft-core scenarios.

use std::cell::RefCell;

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};

use crate::{
    CompiledNode, HighlightEvent, ProtocolViolation, compile, normalize, trim_trailing_newline,
};

// =============================================================================
// Test World
// =============================================================================

/// State shared across BDD steps.
#[derive(Default)]
struct TestWorld {
    /// Text the events index into.
    source: String,
    /// Raw code awaiting normalization.
    raw: String,
    /// Normalized text produced from `raw`.
    normalized: Option<String>,
    /// Events to replay.
    events: Vec<HighlightEvent>,
    /// Outcome of the last compilation.
    outcome: Option<Result<Vec<CompiledNode>, ProtocolViolation>>,
}

impl TestWorld {
    fn nodes(&self) -> &[CompiledNode] {
        match self.outcome.as_ref() {
            Some(Ok(nodes)) => nodes,
            other => panic!("expected compiled nodes, got {other:?}"),
        }
    }
}

#[fixture]
fn world() -> RefCell<TestWorld> {
    RefCell::new(TestWorld::default())
}

/// Strips surrounding double quotes and expands `\n` escapes.
fn unquote(s: &str) -> String {
    s.trim_matches('"').replace("\\n", "\n")
}

/// Parses the compact event notation used by the feature file.
///
/// `+name` opens a scope, `-` closes one and `a..b` is a source range.
fn parse_events(notation: &str) -> Vec<HighlightEvent> {
    notation
        .split_whitespace()
        .map(|token| {
            if token == "-" {
                return HighlightEvent::End;
            }
            if let Some(name) = token.strip_prefix('+') {
                return HighlightEvent::start(name);
            }
            let (start, end) = token.split_once("..").expect("range token");
            HighlightEvent::source(
                start.parse().expect("range start"),
                end.parse().expect("range end"),
            )
        })
        .collect()
}

// =============================================================================
// Given Steps
// =============================================================================

#[given("the source text {text}")]
fn given_source_text(world: &RefCell<TestWorld>, text: String) {
    world.borrow_mut().source = unquote(&text);
}

#[given("the events {notation}")]
fn given_events(world: &RefCell<TestWorld>, notation: String) {
    world.borrow_mut().events = parse_events(&unquote(&notation));
}

#[given("the raw code {raw}")]
fn given_raw_code(world: &RefCell<TestWorld>, raw: String) {
    world.borrow_mut().raw = unquote(&raw);
}

// =============================================================================
// When Steps
// =============================================================================

#[when("the events are compiled")]
fn when_compiled(world: &RefCell<TestWorld>) {
    let mut w = world.borrow_mut();
    let outcome = compile(&w.events, &w.source);
    w.outcome = Some(outcome);
}

#[when("the output is trimmed")]
fn when_trimmed(world: &RefCell<TestWorld>) {
    let mut w = world.borrow_mut();
    let nodes = w.nodes().to_vec();
    w.outcome = Some(Ok(trim_trailing_newline(nodes)));
}

#[when("the raw code is normalized")]
fn when_normalized(world: &RefCell<TestWorld>) {
    let mut w = world.borrow_mut();
    let text = normalize(&w.raw).into_text();
    w.normalized = Some(text);
}

// =============================================================================
// Then Steps
// =============================================================================

#[then("there are {count} nodes")]
fn then_node_count(world: &RefCell<TestWorld>, count: usize) {
    let w = world.borrow();
    assert_eq!(w.nodes().len(), count, "nodes: {:?}", w.nodes());
}

#[then("node {index} has class {class} and text {text}")]
fn then_node_has_class(world: &RefCell<TestWorld>, index: usize, class: String, text: String) {
    let w = world.borrow();
    let node = w.nodes().get(index).expect("node index in range");
    assert_eq!(node.class(), Some(unquote(&class).as_str()));
    assert_eq!(node.value(), unquote(&text));
}

#[then("node {index} has no class and text {text}")]
fn then_node_has_no_class(world: &RefCell<TestWorld>, index: usize, text: String) {
    let w = world.borrow();
    let node = w.nodes().get(index).expect("node index in range");
    assert_eq!(node.class(), None);
    assert_eq!(node.value(), unquote(&text));
}

#[then("compilation fails with a protocol violation")]
fn then_protocol_violation(world: &RefCell<TestWorld>) {
    let w = world.borrow();
    assert!(
        matches!(w.outcome, Some(Err(_))),
        "expected a protocol violation, got {:?}",
        w.outcome
    );
}

#[then("the normalized text is {text}")]
fn then_normalized_text(world: &RefCell<TestWorld>, text: String) {
    let w = world.borrow();
    assert_eq!(w.normalized.as_deref(), Some(unquote(&text).as_str()));
}

// =============================================================================
// Scenario Bindings
// =============================================================================

#[scenario(
    path = "tests/features/event_compiler.feature",
    name = "Keyword followed by plain text"
)]
fn keyword_then_plain_text(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/event_compiler.feature",
    name = "Injected language starts a fresh highlight scope"
)]
fn injection_resets_scope(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/event_compiler.feature",
    name = "Repeated tags render the innermost distinct tag"
)]
fn repeated_tags_dedupe(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/event_compiler.feature",
    name = "Unbalanced end aborts compilation"
)]
fn unbalanced_end_aborts(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/event_compiler.feature",
    name = "Gaps in source coverage abort compilation"
)]
fn coverage_gap_aborts(world: RefCell<TestWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/event_compiler.feature",
    name = "Raw code is normalized before compilation"
)]
fn raw_code_normalized(world: RefCell<TestWorld>) {
    drop(world);
}
