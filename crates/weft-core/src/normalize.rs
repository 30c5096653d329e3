//! Indentation normalization for extracted code text.
//!
//! Code blocks lifted out of a document usually carry the indentation of
//! the markup around them plus blank lines at either end. [`normalize`]
//! removes both while keeping indentation relative to the first line.

/// Code text with block indentation and boundary blank lines removed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NormalizedSource {
    text: String,
    offset: usize,
}

impl NormalizedSource {
    /// Returns the normalized text. Non-empty text always ends in `\n`.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the number of leading whitespace characters removed from the
    /// first line.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    /// Consumes the value and returns the normalized text.
    #[must_use]
    pub fn into_text(self) -> String {
        self.text
    }
}

/// Normalizes raw code text.
///
/// Leading and trailing whitespace-only lines are dropped. The indentation
/// of the first remaining line becomes the offset; every line then loses up
/// to that many leading whitespace characters, but never more than its own
/// indentation. The result ends with a single newline.
///
/// # Examples
///
/// ```
/// use weft_core::normalize;
///
/// let source = normalize("\n    if x:\n        y()\n  \n");
/// assert_eq!(source.text(), "if x:\n    y()\n");
/// assert_eq!(source.offset(), 4);
/// ```
#[must_use]
pub fn normalize(raw: &str) -> NormalizedSource {
    let lines: Vec<&str> = raw.split('\n').collect();

    let Some(first) = lines.iter().position(|line| !is_blank(line)) else {
        return NormalizedSource::default();
    };
    let last = lines
        .iter()
        .rposition(|line| !is_blank(line))
        .unwrap_or(first);
    let body = lines.get(first..=last).unwrap_or_default();

    let offset = body.first().map_or(0, |line| indent_width(line));

    let mut text = String::with_capacity(raw.len());
    for line in body {
        text.push_str(strip_indent(line, offset));
        text.push('\n');
    }

    NormalizedSource { text, offset }
}

fn is_blank(line: &str) -> bool {
    line.chars().all(char::is_whitespace)
}

/// Counts leading whitespace characters.
fn indent_width(line: &str) -> usize {
    line.chars().take_while(|c| c.is_whitespace()).count()
}

/// Removes `min(offset, own indentation)` leading characters.
fn strip_indent(line: &str, offset: usize) -> &str {
    let width = indent_width(line).min(offset);
    let cut = line
        .char_indices()
        .nth(width)
        .map_or(line.len(), |(index, _)| index);
    line.get(cut..).unwrap_or(line)
}
