//! Parsing of code fence meta strings.
//!
//! A meta string is a space separated list of `key=value` tokens. A token
//! without `=` (or with nothing after it) is a flag. Double quotes are
//! removed from values, so `title="main.rs"` yields `main.rs`.

use std::collections::BTreeMap;

/// A parsed meta value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetaValue {
    /// A bare key.
    Flag,
    /// A key with a value.
    Text(String),
}

impl MetaValue {
    /// Returns the value text, or `None` for a flag.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Flag => None,
            Self::Text(text) => Some(text),
        }
    }
}

/// Parses `meta` into its keys and values.
///
/// Later tokens overwrite earlier ones with the same key. Anything after a
/// second `=` in a token is ignored.
#[must_use]
pub fn parse_meta(meta: &str) -> BTreeMap<String, MetaValue> {
    meta.split(' ')
        .filter(|token| !token.is_empty())
        .map(|token| {
            let mut parts = token.split('=');
            let key = parts.next().unwrap_or_default();
            let value = match parts.next() {
                Some(text) if !text.is_empty() => MetaValue::Text(text.replace('"', "")),
                _ => MetaValue::Flag,
            };
            (key.to_owned(), value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn parses_values_and_flags() {
        let meta = parse_meta("query=docs showLineNumbers title=\"main.rs\"");

        assert_eq!(meta.get("query"), Some(&MetaValue::Text("docs".to_owned())));
        assert_eq!(meta.get("showLineNumbers"), Some(&MetaValue::Flag));
        assert_eq!(
            meta.get("title").and_then(MetaValue::as_text),
            Some("main.rs")
        );
        assert_eq!(meta.len(), 3);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    fn blank_meta_is_empty(#[case] meta: &str) {
        assert!(parse_meta(meta).is_empty());
    }

    #[rstest]
    #[case("key=", MetaValue::Flag)]
    #[case("key=a=b", MetaValue::Text("a".to_owned()))]
    #[case("key=\"\"", MetaValue::Text(String::new()))]
    #[case("key=one key=two", MetaValue::Text("two".to_owned()))]
    fn edge_cases(#[case] meta: &str, #[case] expected: MetaValue) {
        assert_eq!(parse_meta(meta).get("key"), Some(&expected));
    }
}
