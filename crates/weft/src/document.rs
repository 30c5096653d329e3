//! A hast-shaped document tree.
//!
//! [`Node`] reads and writes the JSON form of hast trees, so documents
//! produced by markdown tooling can be highlighted and handed back. Only the
//! parts the highlighter inspects are typed; every other property and data
//! entry is carried through untouched.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use weft_core::CompiledNode;

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Node {
    /// The document root.
    Root {
        /// Top-level nodes.
        #[serde(default)]
        children: Vec<Node>,
    },
    /// An element such as `pre`, `code` or `span`.
    Element(Element),
    /// A text leaf.
    Text {
        /// Text content.
        value: String,
    },
    /// A comment, kept as written.
    Comment {
        /// Comment content.
        value: String,
    },
}

impl Node {
    /// Creates a text leaf.
    #[must_use]
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text {
            value: value.into(),
        }
    }

    /// Creates a root holding `children`.
    #[must_use]
    pub const fn root(children: Vec<Self>) -> Self {
        Self::Root { children }
    }

    /// Returns the children of a root or element.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Root { children } | Self::Element(Element { children, .. }) => {
                children.as_slice()
            }
            Self::Text { .. } | Self::Comment { .. } => &[],
        }
    }

    /// Returns the element when this node is one.
    #[must_use]
    pub const fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Concatenates the text leaves below this node.
    #[must_use]
    pub fn text_content(&self) -> String {
        match self {
            Self::Text { value } => value.clone(),
            Self::Comment { .. } => String::new(),
            Self::Root { children } | Self::Element(Element { children, .. }) => {
                children.iter().map(Self::text_content).collect()
            }
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Self::Element(element)
    }
}

impl From<CompiledNode> for Node {
    fn from(node: CompiledNode) -> Self {
        match node {
            CompiledNode::Text { value } => Self::Text { value },
            CompiledNode::Span { classes, value } => Element::new("span")
                .with_classes(classes)
                .with_children(vec![Self::Text { value }])
                .into(),
        }
    }
}

/// An element node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    /// Tag name, such as `code`.
    pub tag_name: String,
    /// Element properties.
    #[serde(default)]
    pub properties: Properties,
    /// Child nodes.
    #[serde(default)]
    pub children: Vec<Node>,
    /// Extra data attached by earlier processing, such as the code fence meta.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<ElementData>,
}

impl Element {
    /// Creates an element with no properties or children.
    #[must_use]
    pub fn new(tag_name: impl Into<String>) -> Self {
        Self {
            tag_name: tag_name.into(),
            properties: Properties::default(),
            children: Vec::new(),
            data: None,
        }
    }

    /// Replaces the class names.
    #[must_use]
    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties.class_name = classes.into_iter().map(Into::into).collect();
        self
    }

    /// Replaces the children.
    #[must_use]
    pub fn with_children(mut self, children: Vec<Node>) -> Self {
        self.children = children;
        self
    }

    /// Sets the meta string carried in the element data.
    #[must_use]
    pub fn with_meta(mut self, meta: impl Into<String>) -> Self {
        self.data.get_or_insert_with(ElementData::default).meta = Some(meta.into());
        self
    }

    /// Returns the meta string, if any.
    #[must_use]
    pub fn meta(&self) -> Option<&str> {
        self.data.as_ref().and_then(|data| data.meta.as_deref())
    }

    /// Returns whether the element has the given tag name.
    #[must_use]
    pub fn is(&self, tag_name: &str) -> bool {
        self.tag_name == tag_name
    }
}

/// Element properties.
///
/// `className` is kept as a list of strings; entries of other types are
/// dropped when reading, as is a `className` that is not a list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Properties {
    /// Class names.
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "string_entries"
    )]
    pub class_name: Vec<String>,
    /// Every other property.
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

/// Data attached to an element.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementData {
    /// The code fence meta string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<String>,
    /// Every other data entry.
    #[serde(flatten)]
    pub other: BTreeMap<String, Value>,
}

fn string_entries<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(entries) => entries
            .into_iter()
            .filter_map(|entry| match entry {
                Value::String(class) => Some(class),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}
