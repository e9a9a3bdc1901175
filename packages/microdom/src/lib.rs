//! Microcommons micro-DOM
//!
//! A small mutable XML tree:
//! - [`MicroElement`] with namespace-aware, insertion-ordered attributes,
//!   lenient typed getters and registry-backed conversion
//! - [`MicroContainer`] grouping nodes that every child-element query sees
//!   through
//! - [`MicroBuilder`] for event-driven construction
//! - [`xml`] reader and writer adapters
//!
//! # Example
//!
//! ```
//! use microcommons_microdom::{filter, MicroElement, MicroParent};
//!
//! let mut list = MicroElement::new("list");
//! list.append_element("item").set_attribute("n", "1");
//! let group = list.append_container();
//! group.append_element("item").set_attribute("n", "abc");
//!
//! // The container is invisible to child-element queries
//! let items = list.all_child_elements(Some(&filter::name("item")));
//! assert_eq!(items.len(), 2);
//!
//! // Typed getters fall back to the default
//! assert_eq!(items[1].attribute_value_as_int("n", -1), -1);
//! ```

pub mod attributes;
pub mod builder;
pub mod change;
pub mod config;
pub mod document;
pub mod element;
pub mod error;
pub mod filter;
pub mod iter;
pub mod name;
pub mod node;
pub mod parent;
pub mod qname;
pub mod xml;

// Re-export commonly used items
pub use attributes::AttributeMap;
pub use builder::MicroBuilder;
pub use change::Change;
pub use config::{ReaderSettings, WriterSettings, MAX_ELEMENT_DEPTH};
pub use document::MicroDocument;
pub use element::MicroElement;
pub use error::{MicroError, Result};
pub use node::{
    DataAware, MicroCData, MicroComment, MicroContainer, MicroNode, MicroProcessingInstruction,
    MicroText,
};
pub use parent::{ElementFilter, MicroParent};
pub use qname::QName;
