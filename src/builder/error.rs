//! Builder errors

use thiserror::Error;

/// Errors raised while describing a datasource
///
/// Validation is eager: the call that introduces a bad input fails, the
/// document is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// Unknown enum value, unknown datatype, empty required collection
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    /// Operation invoked out of sequence
    #[error("Invalid state: {0}")]
    State(String),
}
