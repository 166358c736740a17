//! Datasource document types (nouns)
//!
//! The internal model the builder accumulates and the assembler walks.

mod column;
mod connection;
mod extract;
mod filter;
mod relation;
mod value;

pub use column::{quantitative_key_name, ColumnAlias, ColumnInstance, ColumnRole, Continuity, Datatype, LogicalType};
pub use connection::{resolve_connection_class, ConnectionSettings, CONNECTION_CLASSES};
pub use extract::{ColumnTypeTable, ExtractBinding, ExtractColumnType, PLACEHOLDER_COLUMN};
pub use filter::{
    CategoricalFilter, ContinuousFilter, FilterMode, FilterScope, FilterSpec, PeriodType, RelativeDateFilter,
    RelativeWindow,
};
pub use relation::{Join, JoinKind, JoinStep, OnClause, Relation, TableSource};
pub use value::{quote_literal, FilterValue};
