//! Error types for building and reading micro documents.

use thiserror::Error;

/// Main error type for the micro-DOM builder and XML adapters.
#[derive(Debug, Error)]
pub enum MicroError {
    /// Element or attribute name is not a valid XML name.
    #[error("Invalid XML name: '{0}'")]
    InvalidName(String),

    /// A prefixed element name has no namespace URI to bind the prefix to.
    #[error("Prefix '{prefix}' of '{name}' is not bound to a namespace")]
    UnboundPrefix { prefix: String, name: String },

    /// An operation needs an open element but none is open.
    #[error("No open element for {0}")]
    NoOpenElement(&'static str),

    /// The builder was finished while elements were still open.
    #[error("Unclosed elements: {}", .0.join(", "))]
    UnclosedElements(Vec<String>),

    /// Element nesting exceeds the configured limit.
    #[error("Element nesting exceeds maximum depth of {max_depth}")]
    MaxDepthExceeded { max_depth: usize },

    /// XML parsing failed.
    #[error("XML parsing failed: {0}")]
    XmlParse(#[from] roxmltree::Error),
}

/// Result type alias for micro-DOM operations.
pub type Result<T> = std::result::Result<T, MicroError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = MicroError::InvalidName("1abc".to_string());
        assert_eq!(err.to_string(), "Invalid XML name: '1abc'");
    }

    #[test]
    fn test_unbound_prefix_display() {
        let err = MicroError::UnboundPrefix {
            prefix: "x".to_string(),
            name: "x:a".to_string(),
        };
        assert_eq!(err.to_string(), "Prefix 'x' of 'x:a' is not bound to a namespace");
    }

    #[test]
    fn test_unclosed_elements_display() {
        let err = MicroError::UnclosedElements(vec!["root".to_string(), "child".to_string()]);
        assert_eq!(err.to_string(), "Unclosed elements: root, child");
    }
}
