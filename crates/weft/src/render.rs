//! HTML serialisation of document trees.

use html_escape::{encode_double_quoted_attribute, encode_text};
use serde_json::Value;

use crate::document::{Element, Node};

const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Renders `node` as HTML.
///
/// Text and attribute values are escaped. `className` renders as `class`;
/// other properties render under their own names, with `true` as a bare
/// attribute and `false` or `null` omitted.
#[must_use]
pub fn to_html(node: &Node) -> String {
    let mut html = String::new();
    write_node(&mut html, node);
    html
}

fn write_node(html: &mut String, node: &Node) {
    match node {
        Node::Root { children } => children.iter().for_each(|child| write_node(html, child)),
        Node::Element(element) => write_element(html, element),
        Node::Text { value } => html.push_str(&encode_text(value)),
        Node::Comment { value } => {
            html.push_str("<!--");
            html.push_str(value);
            html.push_str("-->");
        }
    }
}

fn write_element(html: &mut String, element: &Element) {
    html.push('<');
    html.push_str(&element.tag_name);
    if !element.properties.class_name.is_empty() {
        write_attribute(html, "class", &element.properties.class_name.join(" "));
    }
    for (name, value) in &element.properties.other {
        match value {
            Value::Null | Value::Bool(false) => {}
            Value::Bool(true) => {
                html.push(' ');
                html.push_str(attribute_name(name));
            }
            Value::String(text) => write_attribute(html, attribute_name(name), text),
            Value::Array(items) => {
                let joined = items
                    .iter()
                    .map(|item| match item {
                        Value::String(text) => text.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                write_attribute(html, attribute_name(name), &joined);
            }
            other => write_attribute(html, attribute_name(name), &other.to_string()),
        }
    }
    html.push('>');

    if VOID_ELEMENTS.contains(&element.tag_name.as_str()) {
        return;
    }
    for child in &element.children {
        write_node(html, child);
    }
    html.push_str("</");
    html.push_str(&element.tag_name);
    html.push('>');
}

fn write_attribute(html: &mut String, name: &str, value: &str) {
    html.push(' ');
    html.push_str(name);
    html.push_str("=\"");
    html.push_str(&encode_double_quoted_attribute(value));
    html.push('"');
}

fn attribute_name(property: &str) -> &str {
    match property {
        "htmlFor" => "for",
        "httpEquiv" => "http-equiv",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn escapes_text_and_attributes() {
        let mut element = Element::new("code")
            .with_classes(["language-rust"])
            .with_children(vec![Node::text("a < b && c")]);
        element
            .properties
            .other
            .insert("title".to_owned(), json!("\"quoted\""));
        element.properties.other.insert("hidden".to_owned(), json!(true));
        element.properties.other.insert("open".to_owned(), json!(false));

        assert_eq!(
            to_html(&element.into()),
            "<code class=\"language-rust\" hidden title=\"&quot;quoted&quot;\">a &lt; b &amp;&amp; c</code>"
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        let tree = Node::root(vec![
            Element::new("br").into(),
            Node::Comment {
                value: " note ".to_owned(),
            },
        ]);

        assert_eq!(to_html(&tree), "<br><!-- note -->");
    }
}
