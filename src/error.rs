//! Errors raised while loading datasource definitions

use thiserror::Error;

use crate::builder::BuildError;

#[derive(Debug, Error)]
pub enum ParseError {
    /// IO error reading file
    #[error("Failed to read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    /// YAML deserialization error
    #[error("Invalid YAML: {source}")]
    Yaml {
        #[from]
        source: serde_yaml::Error,
    },
    /// The definition parsed but describes an invalid document
    #[error("Invalid definition: {0}")]
    Build(#[from] BuildError),
}
