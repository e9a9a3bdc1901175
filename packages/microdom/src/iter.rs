//! Iterators over micro trees.

use std::slice;

use crate::element::MicroElement;
use crate::node::MicroNode;
use crate::parent::MicroParent;

/// Child elements of a parent, with [`MicroNode::Container`] children
/// spliced in place at any depth.
#[derive(Debug, Clone)]
pub struct ChildElements<'a> {
    stack: Vec<slice::Iter<'a, MicroNode>>,
}

impl<'a> ChildElements<'a> {
    pub(crate) fn new(children: &'a [MicroNode]) -> Self {
        Self {
            stack: vec![children.iter()],
        }
    }
}

impl<'a> Iterator for ChildElements<'a> {
    type Item = &'a MicroElement;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(MicroNode::Element(element)) => return Some(element),
                Some(MicroNode::Container(container)) => {
                    self.stack.push(container.children().iter());
                }
                Some(_) => {}
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// Mutable counterpart of [`ChildElements`].
#[derive(Debug)]
pub struct ChildElementsMut<'a> {
    stack: Vec<slice::IterMut<'a, MicroNode>>,
}

impl<'a> ChildElementsMut<'a> {
    pub(crate) fn new(children: &'a mut [MicroNode]) -> Self {
        Self {
            stack: vec![children.iter_mut()],
        }
    }
}

impl<'a> Iterator for ChildElementsMut<'a> {
    type Item = &'a mut MicroElement;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(MicroNode::Element(element)) => return Some(element),
                Some(MicroNode::Container(container)) => {
                    self.stack.push(container.children_mut().iter_mut());
                }
                Some(_) => {}
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

/// All nodes below a parent in document order (pre-order), containers
/// included.
#[derive(Debug, Clone)]
pub struct Descendants<'a> {
    stack: Vec<slice::Iter<'a, MicroNode>>,
}

impl<'a> Descendants<'a> {
    pub(crate) fn new(children: &'a [MicroNode]) -> Self {
        Self {
            stack: vec![children.iter()],
        }
    }
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a MicroNode;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(node) => {
                    if let Some(children) = node.children() {
                        self.stack.push(children.iter());
                    }
                    return Some(node);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}
