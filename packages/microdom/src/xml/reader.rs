//! Read XML text into a micro document.
//!
//! `roxmltree` resolves namespaces and reports CDATA sections as plain
//! text, so CDATA content ends up in text nodes. Namespace declarations
//! are not kept as attributes; the writer recreates them. Whitespace-only
//! text is dropped unless [`ReaderSettings::keep_whitespace_text`] is set,
//! in which case it is kept as ignorable whitespace.

use roxmltree::{Node, NodeType};
use tracing::debug;

use crate::builder::MicroBuilder;
use crate::config::ReaderSettings;
use crate::document::MicroDocument;
use crate::error::Result;
use crate::parent::MicroParent;
use crate::qname::QName;

/// Parse XML text with default [`ReaderSettings`].
///
/// # Errors
/// Fails on malformed XML or when the tree exceeds the builder's limits.
///
/// # Example
/// ```
/// use microcommons_microdom::{xml, MicroParent};
///
/// let doc = xml::read_document(r#"<root a="1"><child/>text</root>"#)?;
/// let root = doc.document_element().unwrap();
/// assert_eq!(root.attribute_value_as_int("a", 0), 1);
/// assert_eq!(root.child_element_count(None), 1);
/// # Ok::<(), microcommons_microdom::MicroError>(())
/// ```
pub fn read_document(xml: &str) -> Result<MicroDocument> {
    read_document_with(xml, &ReaderSettings::default())
}

/// Parse XML text.
///
/// # Errors
/// Fails on malformed XML or when the tree exceeds the builder's limits.
pub fn read_document_with(xml: &str, settings: &ReaderSettings) -> Result<MicroDocument> {
    let doc = roxmltree::Document::parse(xml)?;

    let mut builder = MicroBuilder::new();
    for node in doc.root().children() {
        visit(node, &mut builder, settings)?;
    }
    let document = builder.finish()?;

    debug!(
        input_bytes = xml.len(),
        top_level_nodes = document.child_count(),
        "Read XML document"
    );
    Ok(document)
}

fn visit(node: Node<'_, '_>, builder: &mut MicroBuilder, settings: &ReaderSettings) -> Result<()> {
    match node.node_type() {
        NodeType::Element => {
            builder.start_element(node.tag_name().namespace(), &qualified_tag_name(node))?;
            for attr in node.attributes() {
                builder.attribute(
                    QName::with_optional_namespace(attr.namespace(), attr.name()),
                    attr.value(),
                )?;
            }
            for child in node.children() {
                visit(child, builder, settings)?;
            }
            builder.end_element()
        }
        NodeType::Text => {
            let text = node.text().unwrap_or_default();
            if !text.trim().is_empty() {
                builder.text(text)
            } else if settings.keep_whitespace_text {
                builder.ignorable_whitespace(text)
            } else {
                Ok(())
            }
        }
        NodeType::Comment if settings.keep_comments => {
            builder.comment(node.text().unwrap_or_default())
        }
        NodeType::PI => match node.pi() {
            Some(pi) => builder.processing_instruction(pi.target, pi.value),
            None => Ok(()),
        },
        _ => Ok(()),
    }
}

/// Tag name with the prefix bound to the element's namespace, if any.
fn qualified_tag_name(node: Node<'_, '_>) -> String {
    let name = node.tag_name();
    let prefix = name
        .namespace()
        .and_then(|ns| node.lookup_prefix(ns))
        .filter(|prefix| !prefix.is_empty());
    match prefix {
        Some(prefix) => format!("{prefix}:{}", name.name()),
        None => name.name().to_string(),
    }
}
