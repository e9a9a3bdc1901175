//! Element predicates for child-element queries.
//!
//! ```
//! use microcommons_microdom::{filter, MicroElement, MicroParent};
//!
//! let mut root = MicroElement::new("root");
//! root.append_element("item");
//! root.append_element("other");
//! assert_eq!(root.child_element_count(Some(&filter::name("item"))), 1);
//! ```

use crate::element::MicroElement;

/// Elements with the given tag name.
pub fn name(tag_name: &str) -> impl Fn(&MicroElement) -> bool + '_ {
    move |e| e.has_tag_name(tag_name)
}

/// Elements with the given local name, ignoring any prefix.
pub fn local_name(local_name: &str) -> impl Fn(&MicroElement) -> bool + '_ {
    move |e| e.has_local_name(local_name)
}

/// Elements in the given namespace.
pub fn namespace_uri(namespace_uri: &str) -> impl Fn(&MicroElement) -> bool + '_ {
    move |e| e.has_namespace_uri(namespace_uri)
}

/// Elements in the given namespace with the given local name.
///
/// An empty namespace URI matches on the tag name only.
pub fn namespace_uri_and_name<'a>(
    namespace_uri: &'a str,
    local_name: &'a str,
) -> impl Fn(&MicroElement) -> bool + 'a {
    move |e| {
        if namespace_uri.is_empty() {
            e.has_tag_name(local_name)
        } else {
            e.has_namespace_uri(namespace_uri) && e.has_local_name(local_name)
        }
    }
}
