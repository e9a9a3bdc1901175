//! Child management and child-element queries shared by elements,
//! containers and documents.
//!
//! Every child-element query sees through [`MicroNode::Container`] nodes:
//! a container's children are spliced into the parent's sequence at the
//! container's position, however deeply containers are nested.

use std::ops::ControlFlow;

use crate::change::Change;
use crate::element::MicroElement;
use crate::iter::{ChildElements, ChildElementsMut, Descendants};
use crate::node::{DataAware, MicroComment, MicroContainer, MicroNode, MicroText};

/// Optional predicate narrowing a child-element query.
pub type ElementFilter<'f> = &'f dyn Fn(&MicroElement) -> bool;

fn accepts(filter: Option<ElementFilter<'_>>, element: &MicroElement) -> bool {
    match filter {
        Some(f) => f(element),
        None => true,
    }
}

/// A node that owns an ordered list of children.
pub trait MicroParent {
    fn children(&self) -> &[MicroNode];

    fn children_mut(&mut self) -> &mut Vec<MicroNode>;

    fn child_count(&self) -> usize {
        self.children().len()
    }

    fn has_children(&self) -> bool {
        !self.children().is_empty()
    }

    fn first_child(&self) -> Option<&MicroNode> {
        self.children().first()
    }

    fn last_child(&self) -> Option<&MicroNode> {
        self.children().last()
    }

    fn child_at(&self, index: usize) -> Option<&MicroNode> {
        self.children().get(index)
    }

    /// Append a node and return it.
    fn append_child(&mut self, child: impl Into<MicroNode>) -> &mut MicroNode {
        let children = self.children_mut();
        children.push(child.into());
        let last = children.len() - 1;
        &mut children[last]
    }

    /// Append a new element without namespace.
    fn append_element(&mut self, tag_name: &str) -> &mut MicroElement {
        push_element(self.children_mut(), MicroElement::new(tag_name))
    }

    /// Append a new element in the given namespace.
    fn append_element_ns(&mut self, namespace_uri: &str, tag_name: &str) -> &mut MicroElement {
        push_element(
            self.children_mut(),
            MicroElement::with_namespace(namespace_uri, tag_name),
        )
    }

    /// Append text. Adjacent text is merged into the preceding text node
    /// unless that node is ignorable whitespace.
    fn append_text(&mut self, text: &str) {
        let children = self.children_mut();
        if let Some(MicroNode::Text(last)) = children.last_mut() {
            if !last.is_ignorable_whitespace() {
                last.append_data(text);
                return;
            }
        }
        children.push(MicroText::new(text).into());
    }

    fn append_comment(&mut self, comment: &str) {
        self.children_mut().push(MicroComment::new(comment).into());
    }

    /// Append an empty container and return it for filling.
    fn append_container(&mut self) -> &mut MicroContainer {
        let children = self.children_mut();
        children.push(MicroContainer::new().into());
        match children.last_mut() {
            Some(MicroNode::Container(container)) => container,
            _ => unreachable!("container was just pushed"),
        }
    }

    /// Insert a node at `index`; an index past the end appends.
    fn insert_child_at(&mut self, index: usize, child: impl Into<MicroNode>) {
        let children = self.children_mut();
        let index = index.min(children.len());
        children.insert(index, child.into());
    }

    fn remove_child_at(&mut self, index: usize) -> Option<MicroNode> {
        let children = self.children_mut();
        (index < children.len()).then(|| children.remove(index))
    }

    fn remove_all_children(&mut self) -> Change {
        let children = self.children_mut();
        if children.is_empty() {
            return Change::Unchanged;
        }
        children.clear();
        Change::Changed
    }

    /// Concatenated text and CDATA content of all descendants.
    fn text_content(&self) -> String {
        self.descendants()
            .filter_map(|node| match node {
                MicroNode::Text(t) => Some(t.data()),
                MicroNode::CData(c) => Some(c.data()),
                _ => None,
            })
            .collect()
    }

    /// All nodes below this parent in document order.
    fn descendants(&self) -> Descendants<'_> {
        Descendants::new(self.children())
    }

    /// Iterate the logical child elements.
    fn child_elements(&self) -> ChildElements<'_> {
        ChildElements::new(self.children())
    }

    fn child_elements_mut(&mut self) -> ChildElementsMut<'_> {
        ChildElementsMut::new(self.children_mut())
    }

    fn all_child_elements(&self, filter: Option<ElementFilter<'_>>) -> Vec<&MicroElement> {
        self.child_elements()
            .filter(|e| accepts(filter, e))
            .collect()
    }

    fn first_child_element(&self, filter: Option<ElementFilter<'_>>) -> Option<&MicroElement> {
        self.child_elements().find(|e| accepts(filter, e))
    }

    fn first_child_element_mut(
        &mut self,
        filter: Option<ElementFilter<'_>>,
    ) -> Option<&mut MicroElement> {
        self.child_elements_mut().find(|e| accepts(filter, e))
    }

    fn for_all_child_elements<F>(&self, filter: Option<ElementFilter<'_>>, mut f: F)
    where
        F: FnMut(&MicroElement),
    {
        self.child_elements()
            .filter(|e| accepts(filter, e))
            .for_each(|e| f(e));
    }

    fn for_all_child_elements_mut<F>(&mut self, filter: Option<ElementFilter<'_>>, mut f: F)
    where
        F: FnMut(&mut MicroElement),
    {
        for element in self.child_elements_mut() {
            if accepts(filter, element) {
                f(element);
            }
        }
    }

    /// Like [`for_all_child_elements`](Self::for_all_child_elements), but
    /// stops at the first element for which `f` breaks.
    fn for_all_child_elements_breakable<F>(
        &self,
        filter: Option<ElementFilter<'_>>,
        mut f: F,
    ) -> ControlFlow<()>
    where
        F: FnMut(&MicroElement) -> ControlFlow<()>,
    {
        self.child_elements()
            .filter(|e| accepts(filter, e))
            .try_for_each(|e| f(e))
    }

    fn contains_any_child_element(&self, filter: Option<ElementFilter<'_>>) -> bool {
        self.child_elements().any(|e| accepts(filter, e))
    }

    fn child_element_count(&self, filter: Option<ElementFilter<'_>>) -> usize {
        self.child_elements().filter(|e| accepts(filter, e)).count()
    }

    /// All elements below this parent in document order, containers spliced.
    fn all_child_elements_recursive(&self) -> Vec<&MicroElement> {
        self.descendants().filter_map(MicroNode::as_element).collect()
    }
}

fn push_element(children: &mut Vec<MicroNode>, element: MicroElement) -> &mut MicroElement {
    children.push(element.into());
    match children.last_mut() {
        Some(MicroNode::Element(element)) => element,
        _ => unreachable!("element was just pushed"),
    }
}
