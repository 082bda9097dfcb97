//! Structural equality between markup trees
//!
//! [`equal`] compares a *pattern* tree against an *actual* tree. Tags and
//! children are compared strictly, attributes are not: the pattern's
//! attributes must be a subset of the actual node's attributes. A hand-written
//! expected tree can therefore leave out incidental attributes that a parsed
//! document carries, while a missing or different expected attribute still
//! fails.
//!
//! Both operands only need to implement [`Markup`], so a canonical
//! [`Element`] can be compared directly against an html5ever node handle (see
//! [`crate::parser`]).
//!
//! # Examples
//!
//! ```rust
//! use hexp::equality::equal;
//! use hexp::node::Element;
//!
//! let pattern = Element::new("div").with_attr("class", "hello");
//! let actual = Element::new("div")
//!     .with_attr("class", "hello")
//!     .with_attr("id", "zigzag");
//!
//! assert!(equal(&&pattern, &&actual));
//! assert!(!equal(&&actual, &&pattern));
//! ```

use crate::node::{Element, Node};
use std::borrow::Cow;

/// A child as seen by the comparator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Child<N> {
    Element(N),
    Text(String),
}

/// Read-only view of a tree node
///
/// Implementors expose a tag (absent for root containers such as a document),
/// an attribute mapping and ordered children. Children that are neither
/// elements nor text (comments, doctypes) should be left out.
///
/// Leaf nodes that can be compared on their own (a parsed text or comment
/// node) report a `#`-prefixed tag and their content through
/// [`Markup::text`].
pub trait Markup: Sized {
    fn tag(&self) -> Option<Cow<'_, str>>;

    /// Content of a leaf node; `None` for elements and root containers
    fn text(&self) -> Option<Cow<'_, str>> {
        None
    }

    fn attributes(&self) -> Vec<(Cow<'_, str>, Cow<'_, str>)>;

    /// Value of a single attribute
    fn attribute(&self, name: &str) -> Option<Cow<'_, str>> {
        self.attributes()
            .into_iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    fn children(&self) -> Vec<Child<Self>>;
}

impl<'a> Markup for &'a Element {
    fn tag(&self) -> Option<Cow<'_, str>> {
        Some(Cow::Borrowed(Element::tag(self)))
    }

    fn attributes(&self) -> Vec<(Cow<'_, str>, Cow<'_, str>)> {
        Element::attributes(self)
            .iter()
            .map(|(k, v)| (Cow::Borrowed(k.as_str()), Cow::Borrowed(v.as_str())))
            .collect()
    }

    fn attribute(&self, name: &str) -> Option<Cow<'_, str>> {
        self.attr(name).map(Cow::Borrowed)
    }

    fn children(&self) -> Vec<Child<Self>> {
        let element: &'a Element = *self;
        element
            .children()
            .iter()
            .map(|child| match child {
                Node::Element(e) => Child::Element(e),
                Node::Text(t) => Child::Text(t.as_str().to_string()),
            })
            .collect()
    }
}

/// Why two nodes differ
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mismatch {
    Tag,
    Text,
    Attribute,
    ChildCount,
    Child,
}

/// Compare `pattern` against `actual`
///
/// Checks, in order and stopping at the first failure:
/// 1. tags are identical (two absent tags match), and leaf contents are
///    identical
/// 2. every pattern attribute exists on `actual` with the same value
/// 3. both have the same number of children
/// 4. children are pairwise equal, in order; text matches text with the
///    same content and never matches an element
///
/// The operands are not interchangeable: attributes present only on `actual`
/// are ignored, attributes present only on `pattern` are a mismatch.
pub fn equal<P: Markup, A: Markup>(pattern: &P, actual: &A) -> bool {
    match first_mismatch(pattern, actual) {
        None => true,
        Some(kind) => {
            let tag = pattern.tag();
            tracing::trace!(
                mismatch = ?kind,
                tag = tag.as_deref().unwrap_or("#root"),
                "trees differ"
            );
            false
        }
    }
}

fn first_mismatch<P: Markup, A: Markup>(pattern: &P, actual: &A) -> Option<Mismatch> {
    if pattern.tag().as_deref() != actual.tag().as_deref() {
        return Some(Mismatch::Tag);
    }
    if pattern.text().as_deref() != actual.text().as_deref() {
        return Some(Mismatch::Text);
    }

    let attributes_match = pattern
        .attributes()
        .iter()
        .all(|(name, value)| actual.attribute(name).as_deref() == Some(value.as_ref()));
    if !attributes_match {
        return Some(Mismatch::Attribute);
    }

    let pattern_children = pattern.children();
    let actual_children = actual.children();
    if pattern_children.len() != actual_children.len() {
        return Some(Mismatch::ChildCount);
    }

    let children_match = pattern_children
        .iter()
        .zip(&actual_children)
        .all(|pair| match pair {
            (Child::Text(p), Child::Text(a)) => p == a,
            (Child::Element(p), Child::Element(a)) => equal(p, a),
            _ => false,
        });
    (!children_match).then_some(Mismatch::Child)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn div_with_class() -> Element {
        Element::new("div").with_attr("class", "hello")
    }

    /// Minimal foreign tree: an empty root container with no tag
    #[derive(Debug, Clone)]
    struct Root;

    impl Markup for Root {
        fn tag(&self) -> Option<Cow<'_, str>> {
            None
        }

        fn attributes(&self) -> Vec<(Cow<'_, str>, Cow<'_, str>)> {
            Vec::new()
        }

        fn children(&self) -> Vec<Child<Self>> {
            Vec::new()
        }
    }

    #[test]
    fn test_same_attributes_are_equal() {
        assert!(equal(&&div_with_class(), &&div_with_class()));
    }

    #[test]
    fn test_extra_actual_attribute_is_ignored() {
        let actual = div_with_class().with_attr("id", "zigzag");
        assert!(equal(&&div_with_class(), &&actual));
    }

    #[test]
    fn test_extra_pattern_attribute_is_a_mismatch() {
        let pattern = div_with_class().with_attr("id", "zigzag");
        assert!(!equal(&&pattern, &&div_with_class()));
    }

    #[test]
    fn test_attribute_value_must_match() {
        let actual = Element::new("div").with_attr("class", "goodbye");
        assert!(!equal(&&div_with_class(), &&actual));
    }

    #[test]
    fn test_tag_mismatch() {
        assert!(!equal(&&Element::new("div"), &&Element::new("span")));
    }

    #[test]
    fn test_same_children_are_equal() {
        let a = Element::new("div").with_child(Element::new("p"));
        let b = Element::new("div").with_child(Element::new("p"));
        assert!(equal(&&a, &&b));
    }

    #[test]
    fn test_child_with_different_tag() {
        let a = Element::new("div").with_child(Element::new("p"));
        let b = Element::new("div").with_child(Element::new("em"));
        assert!(!equal(&&a, &&b));
    }

    #[test]
    fn test_extra_child_in_either_direction() {
        let one = Element::new("div").with_child(Element::new("p"));
        let two = one.clone().with_child(Element::new("em"));
        assert!(!equal(&&one, &&two));
        assert!(!equal(&&two, &&one));
    }

    #[test]
    fn test_child_order_matters() {
        let a = Element::new("div")
            .with_child(Element::new("p"))
            .with_child(Element::new("em"));
        let b = Element::new("div")
            .with_child(Element::new("em"))
            .with_child(Element::new("p"));
        assert!(!equal(&&a, &&b));
    }

    #[test]
    fn test_text_children() {
        let hello = Element::new("p").with_child("hello");
        assert!(equal(&&hello, &&Element::new("p").with_child("hello")));
        assert!(!equal(&&hello, &&Element::new("p").with_child("hullo")));
        assert!(!equal(&&hello, &&Element::new("p").with_child(Element::new("hello"))));
    }

    #[test]
    fn test_nested_attribute_subset() {
        let pattern = Element::new("ul").with_child(Element::new("li").with_attr("class", "a"));
        let actual = Element::new("ul").with_child(
            Element::new("li")
                .with_attr("class", "a")
                .with_attr("data-id", "7"),
        );
        assert!(equal(&&pattern, &&actual));
        assert!(!equal(&&actual, &&pattern));
    }

    #[test]
    fn test_empty_root_containers_are_equal() {
        assert!(equal(&Root, &Root));
    }

    #[test]
    fn test_root_never_equals_element() {
        assert!(!equal(&Root, &&Element::new("div")));
        assert!(!equal(&&Element::new("div"), &Root));
    }

    #[test]
    fn test_default_attribute_lookup() {
        let root = Root;
        assert_eq!(root.attribute("anything"), None);
    }

    fn element_strategy() -> impl Strategy<Value = Element> {
        let leaf = (
            prop::sample::select(vec!["div", "p", "em"]),
            prop::collection::btree_map("[a-z]{1,4}", "[a-z0-9]{0,4}", 0..3),
        )
            .prop_map(|(tag, attrs)| Element::from_parts(tag, attrs, Vec::new()));

        leaf.prop_recursive(3, 16, 3, |inner| {
            (
                prop::sample::select(vec!["section", "ul", "li"]),
                prop::collection::btree_map("[a-z]{1,4}", "[a-z0-9]{0,4}", 0..3),
                prop::collection::vec(
                    prop_oneof![
                        inner.prop_map(Node::Element),
                        "[a-z]{0,6}".prop_map(Node::from),
                    ],
                    0..3,
                ),
            )
                .prop_map(|(tag, attrs, children)| Element::from_parts(tag, attrs, children))
        })
    }

    proptest! {
        #[test]
        fn prop_equal_is_reflexive(element in element_strategy()) {
            prop_assert!(equal(&&element, &&element));
        }

        #[test]
        fn prop_extra_actual_attribute_keeps_equality(
            element in element_strategy(),
            name in "x-[a-z]{1,4}",
            value in "[a-z]{0,4}",
        ) {
            let actual = element.clone().with_attr(name, value);
            prop_assert!(equal(&&element, &&actual));
        }

        #[test]
        fn prop_missing_actual_attribute_breaks_equality(
            element in element_strategy(),
            name in "x-[a-z]{1,4}",
        ) {
            let pattern = element.clone().with_attr(name, "v");
            prop_assert!(!equal(&&pattern, &&element));
        }
    }
}
