//! Relation and filter compiler (verb module)
//!
//! Transforms relation and filter definitions into document fragments.

mod filter;
mod relation;

pub use filter::{compile_filter, compile_filters, USER_NAMESPACE};
pub use relation::{materialize_relation, render_relation};
