//! Error types for normalization and document parsing

/// Errors raised while normalizing a loose tree
///
/// Each variant carries the `Debug` rendering of the value that broke the
/// shape contract, so a mistake in a hand-written literal can be located.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// The top-level value is not a list
    #[error("expected a [tag, attributes?, children?] list, got {0}")]
    NotANode(String),
    /// The list is empty or does not start with a tag
    #[error("node must start with a tag, got {0}")]
    MissingTag(String),
    /// A `ToElement` conversion did not produce an element
    #[error("to_element must return an Element, got {0}")]
    InvalidConversion(String),
    /// A child could not be turned into a node (strict child policy only)
    #[error("child of <{tag}> cannot be normalized: {child}")]
    UnconvertibleChild { tag: String, child: String },
}

impl FormatError {
    /// Get numeric error code
    pub fn code(&self) -> u32 {
        match self {
            FormatError::NotANode(_) => 1,
            FormatError::MissingTag(_) => 2,
            FormatError::InvalidConversion(_) => 3,
            FormatError::UnconvertibleChild { .. } => 4,
        }
    }
}

/// Errors raised while parsing HTML into a document tree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    /// Nothing to parse
    #[error("HTML input is empty")]
    EmptyInput,
}

/// Result alias for normalization
pub type Result<T, E = FormatError> = std::result::Result<T, E>;
