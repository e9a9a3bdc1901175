//! Node kinds of a micro document tree.

use crate::element::MicroElement;
use crate::iter::Descendants;
use crate::parent::MicroParent;

/// A node in a micro tree.
#[derive(Debug, Clone, PartialEq)]
pub enum MicroNode {
    Element(MicroElement),
    Text(MicroText),
    CData(MicroCData),
    Comment(MicroComment),
    ProcessingInstruction(MicroProcessingInstruction),
    /// Transparent grouping node; its children belong to the enclosing
    /// parent for every child-element query.
    Container(MicroContainer),
}

impl MicroNode {
    /// Short name of the node kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            MicroNode::Element(_) => "element",
            MicroNode::Text(_) => "text",
            MicroNode::CData(_) => "cdata",
            MicroNode::Comment(_) => "comment",
            MicroNode::ProcessingInstruction(_) => "processing-instruction",
            MicroNode::Container(_) => "container",
        }
    }

    pub fn is_element(&self) -> bool {
        matches!(self, MicroNode::Element(_))
    }

    pub fn is_container(&self) -> bool {
        matches!(self, MicroNode::Container(_))
    }

    pub fn as_element(&self) -> Option<&MicroElement> {
        match self {
            MicroNode::Element(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut MicroElement> {
        match self {
            MicroNode::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Character data of text, CDATA and comment nodes.
    pub fn data(&self) -> Option<&str> {
        match self {
            MicroNode::Text(n) => Some(n.data()),
            MicroNode::CData(n) => Some(n.data()),
            MicroNode::Comment(n) => Some(n.data()),
            _ => None,
        }
    }

    /// Direct children of elements and containers.
    pub fn children(&self) -> Option<&[MicroNode]> {
        match self {
            MicroNode::Element(e) => Some(e.children()),
            MicroNode::Container(c) => Some(c.children()),
            _ => None,
        }
    }

    /// All nodes below this one in document order, excluding the node itself.
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants::new(self.children().unwrap_or_default())
    }
}

/// Nodes that carry character data.
pub trait DataAware {
    fn data(&self) -> &str;

    fn data_mut(&mut self) -> &mut String;

    fn set_data(&mut self, data: impl Into<String>) {
        *self.data_mut() = data.into();
    }

    fn append_data(&mut self, data: &str) {
        self.data_mut().push_str(data);
    }

    fn prepend_data(&mut self, data: &str) {
        self.data_mut().insert_str(0, data);
    }

    fn has_data(&self) -> bool {
        !self.data().is_empty()
    }
}

macro_rules! data_node {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Default, PartialEq, Eq)]
        pub struct $name {
            data: String,
        }

        impl $name {
            pub fn new(data: impl Into<String>) -> Self {
                Self { data: data.into() }
            }
        }

        impl DataAware for $name {
            fn data(&self) -> &str {
                &self.data
            }

            fn data_mut(&mut self) -> &mut String {
                &mut self.data
            }
        }
    };
}

data_node!(
    /// A CDATA section.
    MicroCData
);
data_node!(
    /// A comment.
    MicroComment
);

/// A text node.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MicroText {
    data: String,
    ignorable_whitespace: bool,
}

impl MicroText {
    pub fn new(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            ignorable_whitespace: false,
        }
    }

    /// Text that only exists for formatting.
    pub fn ignorable_whitespace(data: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            ignorable_whitespace: true,
        }
    }

    pub fn is_ignorable_whitespace(&self) -> bool {
        self.ignorable_whitespace
    }

    /// Check if the text is empty or consists of whitespace only.
    pub fn is_whitespace(&self) -> bool {
        self.data.chars().all(char::is_whitespace)
    }
}

impl DataAware for MicroText {
    fn data(&self) -> &str {
        &self.data
    }

    fn data_mut(&mut self) -> &mut String {
        &mut self.data
    }
}

/// A processing instruction `<?target data?>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MicroProcessingInstruction {
    target: String,
    data: Option<String>,
}

impl MicroProcessingInstruction {
    pub fn new(target: impl Into<String>, data: Option<&str>) -> Self {
        Self {
            target: target.into(),
            data: data.filter(|d| !d.is_empty()).map(str::to_string),
        }
    }

    pub fn target(&self) -> &str {
        &self.target
    }

    pub fn data(&self) -> Option<&str> {
        self.data.as_deref()
    }
}

/// Transparent grouping of nodes without a tag of its own.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MicroContainer {
    children: Vec<MicroNode>,
}

impl MicroContainer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_children(children: impl IntoIterator<Item = MicroNode>) -> Self {
        Self {
            children: children.into_iter().collect(),
        }
    }
}

impl MicroParent for MicroContainer {
    fn children(&self) -> &[MicroNode] {
        &self.children
    }

    fn children_mut(&mut self) -> &mut Vec<MicroNode> {
        &mut self.children
    }
}

impl From<MicroElement> for MicroNode {
    fn from(element: MicroElement) -> Self {
        MicroNode::Element(element)
    }
}

impl From<MicroText> for MicroNode {
    fn from(text: MicroText) -> Self {
        MicroNode::Text(text)
    }
}

impl From<MicroCData> for MicroNode {
    fn from(cdata: MicroCData) -> Self {
        MicroNode::CData(cdata)
    }
}

impl From<MicroComment> for MicroNode {
    fn from(comment: MicroComment) -> Self {
        MicroNode::Comment(comment)
    }
}

impl From<MicroProcessingInstruction> for MicroNode {
    fn from(pi: MicroProcessingInstruction) -> Self {
        MicroNode::ProcessingInstruction(pi)
    }
}

impl From<MicroContainer> for MicroNode {
    fn from(container: MicroContainer) -> Self {
        MicroNode::Container(container)
    }
}
