//! XML element tree (noun module)
//!
//! Every fragment producer builds an owned `XmlElement` tree; the writer turns
//! a finished tree into pretty-printed text.

mod element;
mod writer;

pub use element::XmlElement;
pub use writer::{write_document, write_fragment};
