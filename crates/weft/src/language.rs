//! Language detection from code element classes.

const LANGUAGE_PREFIX: &str = "language-";

/// Returns the language named by the first `language-*` class.
///
/// A bare `language-` class names no language and is passed over.
#[must_use]
pub fn extract_language(class_names: &[String]) -> Option<&str> {
    class_names.iter().find_map(|class| {
        class
            .strip_prefix(LANGUAGE_PREFIX)
            .filter(|language| !language.is_empty())
    })
}
