//! Emitter errors

use thiserror::Error;

use crate::builder::BuildError;

#[derive(Debug, Error)]
pub enum EmitError {
    /// The accumulated model cannot form a document
    #[error(transparent)]
    Build(#[from] BuildError),
    /// Rendering the element tree failed
    #[error("failed to render XML document: {0}")]
    Xml(#[from] quick_xml::Error),
}
