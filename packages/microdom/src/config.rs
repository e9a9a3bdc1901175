//! Configuration for reading and writing micro documents.
//!
//! Both settings structs deserialize with defaults for missing fields, so
//! they can be embedded in a caller's own configuration file.

use serde::Deserialize;

/// Maximum element nesting accepted by the builder.
///
/// Guards the recursive reader and writer against stack exhaustion.
pub const MAX_ELEMENT_DEPTH: usize = 256;

/// Namespace URI bound to the reserved `xml` prefix.
pub const XML_NS_URI: &str = "http://www.w3.org/XML/1998/namespace";

/// Settings for the XML reader.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReaderSettings {
    /// Keep text nodes consisting only of whitespace.
    pub keep_whitespace_text: bool,
    /// Keep comments.
    pub keep_comments: bool,
}

impl Default for ReaderSettings {
    fn default() -> Self {
        Self {
            keep_whitespace_text: false,
            keep_comments: true,
        }
    }
}

/// Settings for the XML writer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WriterSettings {
    /// Indentation per nesting level; empty disables indentation.
    pub indent: String,
    /// Line separator used between indented nodes.
    pub newline: String,
    /// Emit `<?xml version="1.0" encoding="UTF-8"?>` before a document.
    pub xml_declaration: bool,
    /// Write childless elements as `<a/>` instead of `<a></a>`.
    pub self_closing_empty: bool,
}

impl WriterSettings {
    /// Settings without indentation, newlines or declaration.
    #[must_use]
    pub fn compact() -> Self {
        Self {
            indent: String::new(),
            newline: String::new(),
            xml_declaration: false,
            self_closing_empty: true,
        }
    }

    /// Set the indentation string.
    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Enable or disable the XML declaration.
    #[must_use]
    pub fn with_xml_declaration(mut self, enabled: bool) -> Self {
        self.xml_declaration = enabled;
        self
    }

    /// Check if output is indented.
    #[must_use]
    pub fn is_indenting(&self) -> bool {
        !self.indent.is_empty()
    }
}

impl Default for WriterSettings {
    fn default() -> Self {
        Self {
            indent: "  ".to_string(),
            newline: "\n".to_string(),
            xml_declaration: true,
            self_closing_empty: true,
        }
    }
}
