//! Output errors

use std::path::PathBuf;
use thiserror::Error;

use crate::builder::BuildError;
use crate::emitter::EmitError;

#[derive(Debug, Error)]
pub enum OutputError {
    #[error(transparent)]
    Build(#[from] BuildError),
    #[error("failed to render XML document: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The extract writer could not produce its artifact
    #[error("failed to create extract {}: {source}", path.display())]
    Extract {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<EmitError> for OutputError {
    fn from(err: EmitError) -> Self {
        match err {
            EmitError::Build(e) => OutputError::Build(e),
            EmitError::Xml(e) => OutputError::Xml(e),
        }
    }
}
