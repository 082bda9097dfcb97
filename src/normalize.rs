//! Normalizer - turns loose shorthand into canonical trees
//!
//! Loose literals come in four shapes:
//!
//! ```text
//! [tag]
//! [tag, attributes]
//! [tag, children]
//! [tag, attributes, children]
//! ```
//!
//! Which of the trailing items are attributes and which are children is
//! decided positionally by [`classify`]: a map in second position is the
//! attribute source, and the first trailing item that is neither a map nor an
//! identifier is the children source. Everything after that consumes the
//! classified triple, so no other code inspects raw input types.
//!
//! # Child normalization
//!
//! | child                    | result                               |
//! |--------------------------|--------------------------------------|
//! | `Element`                | passed through unchanged             |
//! | `Str` / `Text`           | text leaf                            |
//! | `List`                   | normalized recursively               |
//! | `Convertible`            | converted; must yield an element     |
//! | anything else            | handled per [`ChildPolicy`]          |
//!
//! # Examples
//!
//! ```rust
//! use hexp::node::Loose;
//! use hexp::normalize::{ChildPolicy, NormalizeOptions, Normalizer};
//! use serde_json::json;
//!
//! let loose = Loose::from(json!(["ul", [["li", "one"], 42]]));
//!
//! // Default policy drops the number
//! let element = Normalizer::new().normalize(&loose).expect("valid literal");
//! assert_eq!(element.children().len(), 1);
//!
//! // Strict policy rejects it
//! let strict = Normalizer::with_options(NormalizeOptions {
//!     unconvertible_children: ChildPolicy::Fail,
//! });
//! assert!(strict.normalize(&loose).is_err());
//! ```

use crate::error::{FormatError, Result};
use crate::node::{Attributes, Element, Loose, Node, TextNode};

/// What to do with a child that has no node representation
/// (numbers, booleans, nil, maps, identifiers)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChildPolicy {
    /// Omit the child from the normalized children
    #[default]
    Drop,
    /// Fail with [`FormatError::UnconvertibleChild`]
    Fail,
}

/// Normalization options
#[derive(Debug, Clone, Default)]
pub struct NormalizeOptions {
    /// Handling of children that cannot become nodes
    pub unconvertible_children: ChildPolicy,
}

/// Role of one positional item following the tag
#[derive(Debug, Clone, Copy)]
pub enum Slot<'a> {
    /// A map: attribute source when in second position
    Attributes(&'a [(Loose, Loose)]),
    /// Candidate children source
    Children(&'a Loose),
    /// Identifier-like scalar, skipped
    Identifier,
    /// Nothing at this position
    Absent,
}

/// Classify the item at one position after the tag
pub fn classify(item: Option<&Loose>) -> Slot<'_> {
    match item {
        None => Slot::Absent,
        Some(Loose::Map(pairs)) => Slot::Attributes(pairs),
        Some(Loose::Symbol(_)) => Slot::Identifier,
        Some(other) => Slot::Children(other),
    }
}

/// A loose node split into its three roles, before any coercion
#[derive(Debug)]
struct Shape<'a> {
    tag: &'a str,
    attributes: &'a [(Loose, Loose)],
    children: &'a [Loose],
}

impl<'a> Shape<'a> {
    fn parse(raw: &'a Loose) -> Result<Self> {
        let Loose::List(items) = raw else {
            return Err(FormatError::NotANode(format!("{raw:?}")));
        };

        let tag = match items.first() {
            Some(Loose::Symbol(tag) | Loose::Str(tag)) => tag.as_str(),
            _ => return Err(FormatError::MissingTag(format!("{raw:?}"))),
        };

        let slots = [classify(items.get(1)), classify(items.get(2))];

        let attributes = match slots[0] {
            Slot::Attributes(pairs) => pairs,
            _ => &[],
        };

        let children = slots
            .iter()
            .find_map(|slot| match *slot {
                Slot::Children(source) => Some(child_sequence(source)),
                _ => None,
            })
            .unwrap_or(&[]);

        Ok(Self {
            tag,
            attributes,
            children,
        })
    }
}

/// Coerce a children source to a sequence: lists as-is, nil as empty, any
/// other value as a single child
fn child_sequence(source: &Loose) -> &[Loose] {
    match source {
        Loose::List(items) => items,
        Loose::Nil => &[],
        single => std::slice::from_ref(single),
    }
}

/// Stringify every key and value; a repeated key keeps its last value
fn normalize_attributes(pairs: &[(Loose, Loose)]) -> Attributes {
    pairs
        .iter()
        .map(|(key, value)| (key.to_scalar_string(), value.to_scalar_string()))
        .collect()
}

/// Converts loose trees to canonical [`Element`]s
///
/// The normalizer holds no state between calls and can be shared freely.
#[derive(Debug, Clone, Default)]
pub struct Normalizer {
    options: NormalizeOptions,
}

impl Normalizer {
    /// Create a normalizer with default options (unconvertible children are
    /// dropped)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: NormalizeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &NormalizeOptions {
        &self.options
    }

    /// Normalize one loose node, recursively
    ///
    /// An already canonical [`Loose::Element`] is returned unchanged.
    ///
    /// # Errors
    ///
    /// - [`FormatError::NotANode`] if `raw` is neither a list nor an element
    /// - [`FormatError::MissingTag`] if the list does not start with a tag
    /// - [`FormatError::InvalidConversion`] if a convertible child does not
    ///   yield an element
    /// - [`FormatError::UnconvertibleChild`] under [`ChildPolicy::Fail`]
    pub fn normalize(&self, raw: &Loose) -> Result<Element> {
        if let Loose::Element(element) = raw {
            return Ok(element.clone());
        }

        let shape = Shape::parse(raw)?;

        let mut children = Vec::with_capacity(shape.children.len());
        for child in shape.children {
            if let Some(node) = self.normalize_child(shape.tag, child)? {
                children.push(node);
            }
        }

        Ok(Element::from_parts(
            shape.tag,
            normalize_attributes(shape.attributes),
            children,
        ))
    }

    fn normalize_child(&self, parent: &str, child: &Loose) -> Result<Option<Node>> {
        let node = match child {
            Loose::Element(element) => Node::Element(element.clone()),
            Loose::Str(text) => Node::Text(TextNode::new(text.as_str())),
            Loose::Text(text) => Node::Text(text.clone()),
            Loose::List(_) => Node::Element(self.normalize(child)?),
            Loose::Convertible(value) => match value.to_element() {
                Loose::Element(element) => Node::Element(element),
                other => {
                    tracing::debug!(
                        parent,
                        source = %value.describe(),
                        "to_element returned a non-element"
                    );
                    return Err(FormatError::InvalidConversion(format!("{other:?}")));
                }
            },
            other => return self.unconvertible(parent, other),
        };

        Ok(Some(node))
    }

    fn unconvertible(&self, parent: &str, child: &Loose) -> Result<Option<Node>> {
        match self.options.unconvertible_children {
            ChildPolicy::Drop => {
                tracing::debug!(parent, child = ?child, "dropping unconvertible child");
                Ok(None)
            }
            ChildPolicy::Fail => Err(FormatError::UnconvertibleChild {
                tag: parent.to_string(),
                child: format!("{child:?}"),
            }),
        }
    }
}

/// Normalize with default options
///
/// Shorthand for `Normalizer::new().normalize(raw)`.
pub fn normalize(raw: &Loose) -> Result<Element> {
    Normalizer::new().normalize(raw)
}
