//! Collection of highlight and injection regions from query matches.

use std::ops::Range;

use tree_sitter::{
    Node, Point, Query, QueryCursor, QueryPredicate, QueryPredicateArg, StreamingIterator,
};

/// Predicate operator that highlight patterns are skipped for.
const LUA_MATCH: &str = "lua-match?";
/// Predicate operator shifting an injection capture's range.
const OFFSET: &str = "offset!";
/// Capture names that never render.
const SILENT_CAPTURES: [&str; 3] = ["spell", "nospell", "conceal"];

const INJECTION_CONTENT: &str = "injection.content";
const INJECTION_LANGUAGE: &str = "injection.language";

/// A highlight capture over a byte range of the parsed text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct HighlightCapture {
    pub(crate) range: Range<usize>,
    pub(crate) highlight: String,
    pub(crate) pattern_index: usize,
}

/// A byte range of the parsed text holding code in another language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InjectionCapture {
    pub(crate) range: Range<usize>,
    pub(crate) language: String,
}

/// Returns whether a capture name renders as a highlight.
fn renders(name: &str) -> bool {
    !name.starts_with('_') && !SILENT_CAPTURES.contains(&name)
}

fn capture_name<'q>(query: &'q Query, index: u32) -> Option<&'q str> {
    usize::try_from(index)
        .ok()
        .and_then(|index| query.capture_names().get(index).copied())
}

/// Runs a highlights query and returns every rendering capture.
///
/// Patterns using `lua-match?` are skipped entirely since the predicate
/// cannot be evaluated here and the pattern only matches conditionally.
pub(crate) fn collect_highlights(
    query: &Query,
    root: Node<'_>,
    source: &[u8],
) -> Vec<HighlightCapture> {
    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(query, root, source);
    let mut captures = Vec::new();

    while let Some(query_match) = matches.next() {
        let pattern_index = query_match.pattern_index;
        if query
            .general_predicates(pattern_index)
            .iter()
            .any(|predicate| &*predicate.operator == LUA_MATCH)
        {
            continue;
        }

        for capture in query_match.captures {
            let Some(name) = capture_name(query, capture.index) else {
                continue;
            };
            if !renders(name) {
                continue;
            }
            captures.push(HighlightCapture {
                range: capture.node.byte_range(),
                highlight: name.to_owned(),
                pattern_index,
            });
        }
    }

    captures
}

/// Runs an injections query and returns every embedded region.
///
/// The language comes from an `injection.language` property set on the
/// pattern, falling back to the text of an `@injection.language` capture.
/// Matches without a language or content capture are ignored, as are
/// `#offset!` shifts that land outside the source.
pub(crate) fn collect_injections(
    query: &Query,
    root: Node<'_>,
    source: &str,
) -> Vec<InjectionCapture> {
    let Some(content_index) = query.capture_index_for_name(INJECTION_CONTENT) else {
        return Vec::new();
    };
    let language_index = query.capture_index_for_name(INJECTION_LANGUAGE);
    let lines = LineIndex::new(source);

    let mut cursor = QueryCursor::new();
    let mut matches = cursor.matches(query, root, source.as_bytes());
    let mut injections = Vec::new();

    while let Some(query_match) = matches.next() {
        let pattern_index = query_match.pattern_index;
        let mut language = query
            .property_settings(pattern_index)
            .iter()
            .find(|property| &*property.key == INJECTION_LANGUAGE)
            .and_then(|property| property.value.as_deref())
            .map(str::to_owned);
        let mut content = None;

        for capture in query_match.captures {
            if language.is_none() && Some(capture.index) == language_index {
                language = capture
                    .node
                    .utf8_text(source.as_bytes())
                    .ok()
                    .map(str::to_owned);
            }
            if capture.index == content_index {
                content = Some(capture.node);
            }
        }

        let (Some(language), Some(content)) = (language, content) else {
            continue;
        };

        let range = match offset_for(query.general_predicates(pattern_index), content_index) {
            Some(offset) => lines.shift(&content.range(), &offset),
            None => Some(content.byte_range()),
        };
        if let Some(range) = range {
            injections.push(InjectionCapture { range, language });
        }
    }

    injections
}

/// Row and column deltas from an `#offset!` predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RangeOffset {
    start_row: isize,
    start_column: isize,
    end_row: isize,
    end_column: isize,
}

/// Finds a well-formed `#offset!` predicate targeting `capture`.
fn offset_for(predicates: &[QueryPredicate], capture: u32) -> Option<RangeOffset> {
    predicates
        .iter()
        .filter(|predicate| &*predicate.operator == OFFSET)
        .find_map(|predicate| match &*predicate.args {
            [
                QueryPredicateArg::Capture(target),
                QueryPredicateArg::String(start_row),
                QueryPredicateArg::String(start_column),
                QueryPredicateArg::String(end_row),
                QueryPredicateArg::String(end_column),
            ] if *target == capture => Some(RangeOffset {
                start_row: start_row.parse().ok()?,
                start_column: start_column.parse().ok()?,
                end_row: end_row.parse().ok()?,
                end_column: end_column.parse().ok()?,
            }),
            _ => None,
        })
}

/// Maps row and column positions back to byte offsets.
struct LineIndex<'a> {
    source: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(source: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(source.match_indices('\n').map(|(index, _)| index + 1))
            .collect();
        Self {
            source,
            line_starts,
        }
    }

    /// Converts a point to a byte offset, rejecting points past the end of
    /// their line or inside a multi-byte character.
    fn byte_at(&self, point: Point) -> Option<usize> {
        let start = *self.line_starts.get(point.row)?;
        let end = self
            .line_starts
            .get(point.row + 1)
            .map_or(self.source.len(), |next| next.saturating_sub(1));
        let byte = start.checked_add(point.column)?;
        (byte <= end && self.source.is_char_boundary(byte)).then_some(byte)
    }

    fn shift(&self, range: &tree_sitter::Range, offset: &RangeOffset) -> Option<Range<usize>> {
        let start = Point {
            row: range.start_point.row.checked_add_signed(offset.start_row)?,
            column: range
                .start_point
                .column
                .checked_add_signed(offset.start_column)?,
        };
        let end = Point {
            row: range.end_point.row.checked_add_signed(offset.end_row)?,
            column: range.end_point.column.checked_add_signed(offset.end_column)?,
        };
        let start_byte = self.byte_at(start)?;
        let end_byte = self.byte_at(end)?;
        (start_byte <= end_byte).then_some(start_byte..end_byte)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tree_sitter::Parser;

    use crate::language::SupportedLanguage;

    fn parse(language: SupportedLanguage, source: &str) -> tree_sitter::Tree {
        let mut parser = Parser::new();
        parser
            .set_language(&language.tree_sitter_language())
            .expect("set language");
        parser.parse(source, None).expect("parse")
    }

    fn query(language: SupportedLanguage, text: &str) -> Query {
        Query::new(&language.tree_sitter_language(), text).expect("compile query")
    }

    #[rstest]
    #[case("keyword", true)]
    #[case("string.special", true)]
    #[case("spell", false)]
    #[case("nospell", false)]
    #[case("conceal", false)]
    #[case("_private", false)]
    fn filters_silent_captures(#[case] name: &str, #[case] expected: bool) {
        assert_eq!(renders(name), expected);
    }

    #[test]
    fn collects_rendering_captures_with_ranges() {
        let source = "let x = 1;";
        let tree = parse(SupportedLanguage::Rust, source);
        let highlights = query(
            SupportedLanguage::Rust,
            "\"let\" @keyword\n(integer_literal) @number\n(identifier) @spell",
        );

        let captures = collect_highlights(&highlights, tree.root_node(), source.as_bytes());

        let found: Vec<(&str, Range<usize>)> = captures
            .iter()
            .map(|capture| (capture.highlight.as_str(), capture.range.clone()))
            .collect();
        assert_eq!(found, vec![("keyword", 0..3), ("number", 8..9)]);
    }

    #[test]
    fn skips_patterns_with_lua_match() {
        let source = "let x = 1;";
        let tree = parse(SupportedLanguage::Rust, source);
        let highlights = query(
            SupportedLanguage::Rust,
            "((identifier) @constant (#lua-match? @constant \"^x$\"))\n\"let\" @keyword",
        );

        let captures = collect_highlights(&highlights, tree.root_node(), source.as_bytes());

        assert_eq!(captures.len(), 1);
        assert_eq!(
            captures.first().map(|capture| capture.highlight.as_str()),
            Some("keyword")
        );
    }

    #[test]
    fn injection_language_comes_from_the_property() {
        let source = "let s = \"def f(): pass\";";
        let tree = parse(SupportedLanguage::Rust, source);
        let injections = query(
            SupportedLanguage::Rust,
            "((string_content) @injection.content (#set! injection.language \"python\"))",
        );

        let found = collect_injections(&injections, tree.root_node(), source);

        assert_eq!(
            found,
            vec![InjectionCapture {
                range: 9..22,
                language: "python".to_owned(),
            }]
        );
    }

    #[test]
    fn offset_predicate_shifts_the_content_range() {
        let source = "let s = \"def f(): pass\";";
        let tree = parse(SupportedLanguage::Rust, source);
        let injections = query(
            SupportedLanguage::Rust,
            "((string_literal) @injection.content \
             (#set! injection.language \"python\") \
             (#offset! @injection.content 0 1 0 -1))",
        );

        let found = collect_injections(&injections, tree.root_node(), source);

        assert_eq!(found.first().map(|capture| capture.range.clone()), Some(9..22));
    }

    #[test]
    fn offsets_outside_the_source_drop_the_injection() {
        let source = "let s = \"x\";";
        let tree = parse(SupportedLanguage::Rust, source);
        let injections = query(
            SupportedLanguage::Rust,
            "((string_literal) @injection.content \
             (#set! injection.language \"python\") \
             (#offset! @injection.content 3 0 3 0))",
        );

        assert!(collect_injections(&injections, tree.root_node(), source).is_empty());
    }

    #[test]
    fn matches_without_language_are_ignored() {
        let source = "let s = \"x\";";
        let tree = parse(SupportedLanguage::Rust, source);
        let injections = query(SupportedLanguage::Rust, "(string_content) @injection.content");

        assert!(collect_injections(&injections, tree.root_node(), source).is_empty());
    }

    #[rstest]
    #[case(0, 0, Some(0))]
    #[case(0, 2, Some(2))]
    #[case(1, 0, Some(3))]
    #[case(1, 3, Some(6))]
    #[case(1, 4, None)]
    #[case(2, 0, None)]
    fn line_index_maps_points_to_bytes(
        #[case] row: usize,
        #[case] column: usize,
        #[case] expected: Option<usize>,
    ) {
        let lines = LineIndex::new("ab\ncde");
        assert_eq!(lines.byte_at(Point { row, column }), expected);
    }

    #[test]
    fn line_index_rejects_points_inside_a_character() {
        let lines = LineIndex::new("é");
        assert_eq!(lines.byte_at(Point { row: 0, column: 1 }), None);
    }
}
