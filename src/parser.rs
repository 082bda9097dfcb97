//! HTML5 document adapter using html5ever
//!
//! This module parses HTML text into an html5ever [`RcDom`] and exposes its
//! nodes to the comparator through the [`Markup`] trait, so a literal tree can
//! be checked against what a browser-grade parser actually produces.
//!
//! # Overview
//!
//! html5ever implements the WHATWG HTML5 parsing algorithm, so even a
//! fragment like `<div><p>Hi</div>` is wrapped in `html`/`head`/`body` and
//! repaired the way a browser would. Use [`find_element`] to pick the subtree
//! a literal pattern describes.
//!
//! # Node mapping
//!
//! | html5ever node           | `Markup` view                              |
//! |--------------------------|--------------------------------------------|
//! | `Document`               | no tag, no attributes                      |
//! | `Element`                | local name, attributes by local name       |
//! | `Text`                   | text child; `#text` + content on its own   |
//! | comment, doctype, PI     | omitted from `children()`; `#comment`,     |
//! |                          | `#doctype`, `#pi` + content on their own   |
//!
//! # Examples
//!
//! ```rust
//! use hexp::node::{Element, Loose};
//! use hexp::parser::{find_element, parse_html};
//! use serde_json::json;
//!
//! let dom = parse_html(r#"<div class="box" id="generated"><p>Hi</p></div>"#)
//!     .expect("Failed to parse HTML");
//! let div = find_element(&dom.document, "div").expect("div present");
//!
//! let pattern = hexp::normalize(&Loose::from(json!(["div", {"class": "box"}, [["p", "Hi"]]])))
//!     .expect("valid literal");
//! assert!(pattern.matches(&div));
//! ```

use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use std::borrow::Cow;

use crate::equality::{Child, Markup};
use crate::error::ParseError;

/// Parse HTML text into a DOM tree
///
/// # Errors
///
/// Returns [`ParseError::EmptyInput`] for an empty string. Any other input is
/// accepted; html5ever recovers from malformed markup.
pub fn parse_html(html: &str) -> Result<RcDom, ParseError> {
    if html.is_empty() {
        return Err(ParseError::EmptyInput);
    }

    let dom = parse_document(RcDom::default(), Default::default()).one(html);

    Ok(dom)
}

/// Find the first element named `tag` in document order, including `node`
/// itself
///
/// Dropping an `RcDom` detaches the children of every node it owns, so keep
/// the document alive for as long as the returned handle is compared.
pub fn find_element(node: &Handle, tag: &str) -> Option<Handle> {
    if let NodeData::Element { ref name, .. } = node.data
        && &*name.local == tag
    {
        return Some(node.clone());
    }

    node.children
        .borrow()
        .iter()
        .find_map(|child| find_element(child, tag))
}

impl Markup for Handle {
    fn tag(&self) -> Option<Cow<'_, str>> {
        match self.data {
            NodeData::Document => None,
            NodeData::Element { ref name, .. } => Some(Cow::Borrowed(&*name.local)),
            NodeData::Text { .. } => Some(Cow::Borrowed("#text")),
            NodeData::Comment { .. } => Some(Cow::Borrowed("#comment")),
            NodeData::Doctype { .. } => Some(Cow::Borrowed("#doctype")),
            NodeData::ProcessingInstruction { .. } => Some(Cow::Borrowed("#pi")),
        }
    }

    fn text(&self) -> Option<Cow<'_, str>> {
        match self.data {
            NodeData::Text { ref contents } => Some(Cow::Owned(contents.borrow().to_string())),
            NodeData::Comment { ref contents } => Some(Cow::Borrowed(&**contents)),
            NodeData::Doctype { ref name, .. } => Some(Cow::Borrowed(&**name)),
            NodeData::ProcessingInstruction { ref contents, .. } => Some(Cow::Borrowed(&**contents)),
            NodeData::Document | NodeData::Element { .. } => None,
        }
    }

    fn attributes(&self) -> Vec<(Cow<'_, str>, Cow<'_, str>)> {
        match self.data {
            NodeData::Element { ref attrs, .. } => attrs
                .borrow()
                .iter()
                .map(|attr| {
                    (
                        Cow::Owned(attr.name.local.to_string()),
                        Cow::Owned(attr.value.to_string()),
                    )
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    fn attribute(&self, name: &str) -> Option<Cow<'_, str>> {
        match self.data {
            NodeData::Element { ref attrs, .. } => attrs
                .borrow()
                .iter()
                .find(|attr| &*attr.name.local == name)
                .map(|attr| Cow::Owned(attr.value.to_string())),
            _ => None,
        }
    }

    fn children(&self) -> Vec<Child<Self>> {
        self.children
            .borrow()
            .iter()
            .filter_map(|child| match child.data {
                NodeData::Element { .. } => Some(Child::Element(child.clone())),
                NodeData::Text { ref contents } => Some(Child::Text(contents.borrow().to_string())),
                _ => None,
            })
            .collect()
    }
}
