//! hexp - HTML as literal trees
//!
//! This library represents markup as plain tree values (tag, attributes,
//! children) instead of objects built through a DOM API, and provides two
//! operations on them:
//!
//! - **Normalization**: shorthand literals such as `["p", "hello"]` or
//!   `["a", {"href": "/"}, ["home"]]` become canonical [`Element`] trees
//! - **Structural equality**: a literal tree is compared against another tree,
//!   typically one produced by an HTML parser, with attributes matched as a
//!   subset and children matched strictly
//!
//! # Architecture
//!
//! - `node`: canonical tree values and the loose input shape
//! - `normalize`: loose input to canonical trees
//! - `equality`: the `Markup` capability trait and the comparator
//! - `parser`: html5ever parsing and the `Markup` view of its DOM
//! - `error`: error types
//!
//! # Example
//!
//! ```rust
//! use hexp::node::Loose;
//! use hexp::parser::{find_element, parse_html};
//! use serde_json::json;
//!
//! let expected = hexp::normalize(&Loose::from(json!(["ul", [["li", "one"], ["li", "two"]]])))
//!     .expect("valid literal");
//!
//! let dom = parse_html(r#"<ul id="list"><li>one</li><li>two</li></ul>"#).expect("Failed to parse");
//! let ul = find_element(&dom.document, "ul").expect("ul present");
//!
//! assert!(hexp::equal(&&expected, &ul));
//! ```

// Module declarations
pub mod equality;
pub mod error;
pub mod node;
pub mod normalize;
pub mod parser;

// Re-export main types for convenience
pub use equality::{Markup, equal};
pub use error::{FormatError, ParseError};
pub use node::{Element, Loose, Node, TextNode, ToElement};
pub use normalize::{Normalizer, normalize};
pub use parser::parse_html;
