//! XML adapters: a reader that drives [`MicroBuilder`](crate::MicroBuilder)
//! from `roxmltree`, and a writer that serializes micro trees to text.

mod reader;
mod writer;

pub use reader::{read_document, read_document_with};
pub use writer::{write_document, write_element, write_node};
