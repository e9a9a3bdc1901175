//! Event-driven construction of micro documents.
//!
//! A reader calls the builder in document order; the builder validates
//! names, tracks open elements and merges adjacent text.

use tracing::trace;

use crate::config::MAX_ELEMENT_DEPTH;
use crate::document::MicroDocument;
use crate::element::MicroElement;
use crate::error::{MicroError, Result};
use crate::name::{is_valid_local_name, is_valid_name};
use crate::node::{MicroCData, MicroComment, MicroNode, MicroProcessingInstruction, MicroText};
use crate::parent::MicroParent;
use crate::qname::QName;

/// Builds a [`MicroDocument`] from start/end events.
///
/// # Example
/// ```
/// use microcommons_microdom::{MicroBuilder, MicroParent};
///
/// let mut builder = MicroBuilder::new();
/// builder.start_element(None, "root")?;
/// builder.attribute("id", "1")?;
/// builder.text("hello")?;
/// builder.end_element()?;
/// let doc = builder.finish()?;
///
/// let root = doc.document_element().unwrap();
/// assert_eq!(root.attribute_value("id"), Some("1"));
/// assert_eq!(root.text_content(), "hello");
/// # Ok::<(), microcommons_microdom::MicroError>(())
/// ```
#[derive(Debug, Default)]
pub struct MicroBuilder {
    document: MicroDocument,
    open: Vec<MicroElement>,
}

impl MicroBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current nesting depth.
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Open a new element as child of the current one.
    ///
    /// A prefixed tag name (`p:local`) needs a namespace URI for the prefix.
    pub fn start_element(&mut self, namespace_uri: Option<&str>, tag_name: &str) -> Result<()> {
        check_tag_name(namespace_uri, tag_name)?;
        if self.open.len() >= MAX_ELEMENT_DEPTH {
            return Err(MicroError::MaxDepthExceeded {
                max_depth: MAX_ELEMENT_DEPTH,
            });
        }
        trace!(tag = tag_name, depth = self.open.len(), "Start element");

        let mut element = MicroElement::new(tag_name);
        element.set_namespace_uri(namespace_uri);
        self.open.push(element);
        Ok(())
    }

    /// Set an attribute on the current element.
    pub fn attribute(&mut self, name: impl Into<QName>, value: &str) -> Result<()> {
        let name = name.into();
        if !is_valid_local_name(name.local_name()) {
            return Err(MicroError::InvalidName(name.local_name().to_string()));
        }
        let element = self
            .open
            .last_mut()
            .ok_or(MicroError::NoOpenElement("attribute"))?;
        element.set_attribute(name, value);
        Ok(())
    }

    /// Append text, merging it with directly preceding text.
    pub fn text(&mut self, text: &str) -> Result<()> {
        match self.open.last_mut() {
            Some(element) => element.append_text(text),
            None => self.document.append_text(text),
        }
        Ok(())
    }

    /// Append formatting whitespace as a separate, ignorable text node.
    pub fn ignorable_whitespace(&mut self, text: &str) -> Result<()> {
        self.append(MicroText::ignorable_whitespace(text).into());
        Ok(())
    }

    pub fn cdata(&mut self, data: &str) -> Result<()> {
        self.append(MicroCData::new(data).into());
        Ok(())
    }

    pub fn comment(&mut self, comment: &str) -> Result<()> {
        self.append(MicroComment::new(comment).into());
        Ok(())
    }

    pub fn processing_instruction(&mut self, target: &str, data: Option<&str>) -> Result<()> {
        if !is_valid_name(target) {
            return Err(MicroError::InvalidName(target.to_string()));
        }
        self.append(MicroProcessingInstruction::new(target, data).into());
        Ok(())
    }

    /// Close the current element and attach it to its parent.
    pub fn end_element(&mut self) -> Result<()> {
        let element = self
            .open
            .pop()
            .ok_or(MicroError::NoOpenElement("end_element"))?;
        trace!(tag = element.tag_name(), "End element");
        self.append(element.into());
        Ok(())
    }

    /// Finish building.
    ///
    /// # Errors
    /// Fails with [`MicroError::UnclosedElements`] while elements are open.
    pub fn finish(self) -> Result<MicroDocument> {
        if !self.open.is_empty() {
            return Err(MicroError::UnclosedElements(
                self.open.iter().map(|e| e.tag_name().to_string()).collect(),
            ));
        }
        Ok(self.document)
    }

    fn append(&mut self, node: MicroNode) {
        match self.open.last_mut() {
            Some(element) => element.append_child(node),
            None => self.document.append_child(node),
        };
    }
}

fn check_tag_name(namespace_uri: Option<&str>, tag_name: &str) -> Result<()> {
    let Some((prefix, local_name)) = tag_name.split_once(':') else {
        return if is_valid_local_name(tag_name) {
            Ok(())
        } else {
            Err(MicroError::InvalidName(tag_name.to_string()))
        };
    };
    if !is_valid_local_name(prefix) || !is_valid_local_name(local_name) {
        return Err(MicroError::InvalidName(tag_name.to_string()));
    }
    if namespace_uri.unwrap_or_default().is_empty() {
        return Err(MicroError::UnboundPrefix {
            prefix: prefix.to_string(),
            name: tag_name.to_string(),
        });
    }
    Ok(())
}
