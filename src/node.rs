//! Tree values: canonical nodes and the loose shorthand they are built from
//!
//! A canonical tree is made of [`Element`]s (tag, attribute map, ordered
//! children) and [`TextNode`] leaves. Both are plain immutable values; there is
//! no parent pointer and no in-place mutation, so a tree can be cloned, shared
//! across threads and compared freely.
//!
//! [`Loose`] is the permissive shape accepted by the normalizer: a list that
//! starts with a tag, optionally followed by an attribute map and/or a list of
//! children, where children can themselves be loose lists, strings, finished
//! nodes, or values implementing [`ToElement`].
//!
//! # Examples
//!
//! ```rust
//! use hexp::node::{Element, Loose};
//! use serde_json::json;
//!
//! let loose = Loose::from(json!(["p", {"class": "intro"}, ["Hello"]]));
//! let element = hexp::normalize(&loose).expect("valid literal");
//!
//! assert_eq!(element.tag(), "p");
//! assert_eq!(element.attr("class"), Some("intro"));
//! assert_eq!(element, Element::new("p").with_attr("class", "intro").with_child("Hello"));
//! ```

use crate::equality::Markup;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Attribute names mapped to their string values
pub type Attributes = BTreeMap<String, String>;

/// A text leaf
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextNode(String);

impl TextNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TextNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A markup element in canonical form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    tag: String,
    #[serde(default)]
    attributes: Attributes,
    #[serde(default)]
    children: Vec<Node>,
}

/// A child of an element
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Node {
    /// Text leaf
    Text(TextNode),
    /// Nested element
    Element(Element),
}

impl Element {
    /// Create an element with no attributes and no children
    pub fn new(tag: impl Into<String>) -> Self {
        Self::from_parts(tag, Attributes::new(), Vec::new())
    }

    /// Create an element from already canonical parts
    pub fn from_parts(tag: impl Into<String>, attributes: Attributes, children: Vec<Node>) -> Self {
        Self {
            tag: tag.into(),
            attributes,
            children,
        }
    }

    /// Return a copy of this element with `name` set to `value`
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Return a copy of this element with `child` appended
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    /// Look up a single attribute value
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Compare this element, as the pattern side, against `actual`
    ///
    /// See [`crate::equality::equal`].
    pub fn matches<A: Markup>(&self, actual: &A) -> bool {
        crate::equality::equal(&self, actual)
    }

    /// Wrap this element back into the fully specified loose shape
    /// `[tag, attributes, children]`
    ///
    /// Normalizing the result yields an element equal to `self`.
    pub fn to_loose(&self) -> Loose {
        let attributes = self
            .attributes
            .iter()
            .map(|(k, v)| (Loose::Str(k.clone()), Loose::Str(v.clone())))
            .collect();
        let children = self
            .children
            .iter()
            .map(|child| match child {
                Node::Element(e) => Loose::Element(e.clone()),
                Node::Text(t) => Loose::Text(t.clone()),
            })
            .collect();

        Loose::List(vec![
            Loose::Str(self.tag.clone()),
            Loose::Map(attributes),
            Loose::List(children),
        ])
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl From<TextNode> for Node {
    fn from(text: TextNode) -> Self {
        Node::Text(text)
    }
}

impl From<&str> for Node {
    fn from(text: &str) -> Self {
        Node::Text(TextNode::new(text))
    }
}

impl From<String> for Node {
    fn from(text: String) -> Self {
        Node::Text(TextNode(text))
    }
}

/// A value that knows how to present itself as an element
///
/// The normalizer calls [`ToElement::to_element`] on every
/// [`Loose::Convertible`] child. The returned value must be
/// [`Loose::Element`]; anything else fails normalization with
/// [`FormatError::InvalidConversion`](crate::error::FormatError::InvalidConversion).
pub trait ToElement {
    fn to_element(&self) -> Loose;

    /// Human-readable description used in diagnostics
    fn describe(&self) -> String {
        std::any::type_name::<Self>().to_string()
    }
}

impl ToElement for Element {
    fn to_element(&self) -> Loose {
        Loose::Element(self.clone())
    }
}

/// The permissive input shape accepted by the normalizer
#[derive(Clone)]
pub enum Loose {
    /// Identifier-like scalar; usable as a tag, never taken as children
    Symbol(String),
    Str(String),
    Int(i64),
    /// Unsigned integer beyond the range of `Int`
    UInt(u64),
    Float(f64),
    Bool(bool),
    Nil,
    /// Key/value pairs in source order
    Map(Vec<(Loose, Loose)>),
    List(Vec<Loose>),
    /// Already canonical element
    Element(Element),
    /// Already canonical text leaf
    Text(TextNode),
    /// A value converted through [`ToElement`]
    Convertible(Arc<dyn ToElement + Send + Sync>),
}

impl Loose {
    pub fn symbol(name: impl Into<String>) -> Self {
        Loose::Symbol(name.into())
    }

    /// Build a map from key/value pairs
    pub fn map<K, V, I>(pairs: I) -> Self
    where
        K: Into<Loose>,
        V: Into<Loose>,
        I: IntoIterator<Item = (K, V)>,
    {
        Loose::Map(
            pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    pub fn list<T: Into<Loose>, I: IntoIterator<Item = T>>(items: I) -> Self {
        Loose::List(items.into_iter().map(Into::into).collect())
    }

    pub fn convertible(value: impl ToElement + Send + Sync + 'static) -> Self {
        Loose::Convertible(Arc::new(value))
    }

    /// String representation used for attribute keys and values
    ///
    /// Scalars render naturally (`3` → `"3"`, `3.0` → `"3.0"`, `nil` → `""`);
    /// composite values fall back to their debug rendering.
    pub fn to_scalar_string(&self) -> String {
        match self {
            Loose::Symbol(s) | Loose::Str(s) => s.clone(),
            Loose::Int(n) => n.to_string(),
            Loose::UInt(n) => n.to_string(),
            Loose::Float(n) => format!("{n:?}"),
            Loose::Bool(b) => b.to_string(),
            Loose::Nil => String::new(),
            Loose::Text(t) => t.as_str().to_string(),
            other => format!("{other:?}"),
        }
    }
}

impl fmt::Debug for Loose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Loose::Symbol(s) => write!(f, ":{s}"),
            Loose::Str(s) => write!(f, "{s:?}"),
            Loose::Int(n) => write!(f, "{n}"),
            Loose::UInt(n) => write!(f, "{n}"),
            Loose::Float(n) => write!(f, "{n:?}"),
            Loose::Bool(b) => write!(f, "{b}"),
            Loose::Nil => f.write_str("nil"),
            Loose::Map(pairs) => f
                .debug_map()
                .entries(pairs.iter().map(|(k, v)| (k, v)))
                .finish(),
            Loose::List(items) => f.debug_list().entries(items).finish(),
            Loose::Element(e) => write!(f, "{e:?}"),
            Loose::Text(t) => write!(f, "{t:?}"),
            Loose::Convertible(c) => write!(f, "<{}>", c.describe()),
        }
    }
}

impl From<&str> for Loose {
    fn from(s: &str) -> Self {
        Loose::Str(s.to_string())
    }
}

impl From<String> for Loose {
    fn from(s: String) -> Self {
        Loose::Str(s)
    }
}

impl From<i64> for Loose {
    fn from(n: i64) -> Self {
        Loose::Int(n)
    }
}

impl From<i32> for Loose {
    fn from(n: i32) -> Self {
        Loose::Int(i64::from(n))
    }
}

impl From<u64> for Loose {
    fn from(n: u64) -> Self {
        i64::try_from(n).map_or(Loose::UInt(n), Loose::Int)
    }
}

impl From<f64> for Loose {
    fn from(n: f64) -> Self {
        Loose::Float(n)
    }
}

impl From<bool> for Loose {
    fn from(b: bool) -> Self {
        Loose::Bool(b)
    }
}

impl From<Element> for Loose {
    fn from(e: Element) -> Self {
        Loose::Element(e)
    }
}

impl From<TextNode> for Loose {
    fn from(t: TextNode) -> Self {
        Loose::Text(t)
    }
}

impl From<Vec<Loose>> for Loose {
    fn from(items: Vec<Loose>) -> Self {
        Loose::List(items)
    }
}

impl<T: Into<Loose>> From<Option<T>> for Loose {
    fn from(value: Option<T>) -> Self {
        value.map_or(Loose::Nil, Into::into)
    }
}

/// JSON literals map arrays to lists and objects to maps; strings stay
/// strings, so a JSON tag in second position is read as a text child.
impl From<serde_json::Value> for Loose {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Loose::Nil,
            Value::Bool(b) => Loose::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Loose::Int(i)
                } else if let Some(u) = n.as_u64() {
                    Loose::UInt(u)
                } else {
                    Loose::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Loose::Str(s),
            Value::Array(items) => Loose::List(items.into_iter().map(Loose::from).collect()),
            Value::Object(map) => Loose::Map(
                map.into_iter()
                    .map(|(k, v)| (Loose::Str(k), Loose::from(v)))
                    .collect(),
            ),
        }
    }
}
