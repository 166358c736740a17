//! Datasource builder (verb module)
//!
//! Accumulates the document model from a sequence of imperative calls.

mod datasource;
mod error;
mod ids;

pub use datasource::DatasourceBuilder;
pub use error::BuildError;
pub use ids::{IdGenerator, RandomCalculationIds, SequenceIds};
