//! Document root.

use crate::element::MicroElement;
use crate::node::MicroNode;
use crate::parent::MicroParent;

/// A micro document: a list of top-level nodes, usually one element plus
/// comments and processing instructions.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MicroDocument {
    children: Vec<MicroNode>,
}

impl MicroDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a document with the given root element.
    pub fn with_root(root: MicroElement) -> Self {
        Self {
            children: vec![root.into()],
        }
    }

    /// The first top-level element, looking through containers.
    pub fn document_element(&self) -> Option<&MicroElement> {
        self.child_elements().next()
    }

    pub fn document_element_mut(&mut self) -> Option<&mut MicroElement> {
        self.child_elements_mut().next()
    }
}

impl MicroParent for MicroDocument {
    fn children(&self) -> &[MicroNode] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<MicroNode> {
        &mut self.children
    }
}
